// What you SEE:
// • A pink heart with a white border on a dark page.
// • Hold Left Mouse and drag over the heart: red "scratch" marks appear.
// • Once half of the heart is covered it turns fully red, shakes, bursts,
//   shows the message and hearts start falling.
// • S saves a PNG snapshot of the window. ESC quits.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use log::{debug, info, warn};

use heart_scratch::draw::{compose_frame, Drawer};
use heart_scratch::logging::{init_logging, LoggingConfig};
use heart_scratch::snapshot::save_png;
use heart_scratch::{Error, FrameBuffer, HeartWidget, Layout, PointerTracker, SurfaceSize, WidgetConfig};

/// Space around the surface inside the initial window, in window pixels.
const WINDOW_MARGIN: u32 = 40;

#[derive(Debug, Parser)]
#[command(name = "heart-scratch", about = "Scratch the heart until it bursts")]
struct Args {
    /// Surface width in cells
    #[arg(long, env = "HEART_WIDTH", default_value_t = 400)]
    width: u32,

    /// Surface height in cells
    #[arg(long, env = "HEART_HEIGHT", default_value_t = 350)]
    height: u32,

    /// Integer display zoom
    #[arg(long, env = "HEART_ZOOM", default_value_t = 1)]
    zoom: u32,

    /// Brush radius in cells
    #[arg(long, env = "HEART_BRUSH", default_value_t = 10)]
    brush: u32,

    /// Fill ratio that triggers the celebration
    #[arg(long, env = "HEART_COMPLETION", default_value_t = 0.5)]
    completion: f64,

    /// Inward tightening of the heart membership test
    #[arg(long, env = "HEART_TIGHTENING", default_value_t = -0.05, allow_hyphen_values = true)]
    tightening: f64,

    /// Message revealed at the end
    #[arg(long, env = "HEART_MESSAGE", default_value = "I LOVE YOU")]
    message: String,

    /// Show the fill percentage
    #[arg(long)]
    hud: bool,

    /// Seed for the falling hearts
    #[arg(long, env = "HEART_SEED")]
    seed: Option<u64>,

    /// Directory for PNG snapshots
    #[arg(long, env = "HEART_SNAPSHOT_DIR", default_value = ".")]
    snapshot_dir: PathBuf,

    /// Log filter, env_logger syntax (falls back to RUST_LOG)
    #[arg(long)]
    log: Option<String>,
}

impl Args {
    fn widget_config(&self) -> Result<WidgetConfig, Error> {
        let config = WidgetConfig {
            surface: SurfaceSize::new(self.width, self.height),
            zoom: self.zoom,
            brush_radius: self.brush,
            completion_ratio: self.completion,
            tightening: self.tightening,
            message: self.message.clone(),
            show_hud: self.hud,
            rain_seed: self.seed,
            ..WidgetConfig::default()
        };
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    init_logging(LoggingConfig { env_filter: args.log.clone(), ..Default::default() });
    let config = args.widget_config()?;

    /* --- Window + layout ---
       Visual: window opens with the heart centered on the page. */
    let (win_w, win_h) = Layout::window_for(config.surface, config.zoom, WINDOW_MARGIN);
    let mut drawer = Drawer::new("Scratch the Heart", win_w, win_h)?;
    let mut window_size = drawer.size();
    let layout = Layout::fit(window_size, config.surface, config.zoom);

    let surface = FrameBuffer::new(layout.surface.width as usize, layout.surface.height as usize);
    let mut widget = HeartWidget::new(config, surface, layout.display)?;
    let mut screen = FrameBuffer::new(window_size.0, window_size.1);
    let mut pointer = PointerTracker::new();
    let mut snapshots = 0u32;
    info!("surface {}x{}, window {}x{}", layout.surface.width, layout.surface.height, window_size.0, window_size.1);

    let start = Instant::now();

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = start.elapsed();

        /* 1) Window resized → new surface size, heart recomputed, marks replayed. */
        let size = drawer.size();
        if size != window_size && size.0 > 0 && size.1 > 0 {
            window_size = size;
            let layout = Layout::fit(size, widget.config().surface, widget.config().zoom);
            widget.resize(layout);
            screen = FrameBuffer::new(size.0, size.1);
        }

        /* 2) Pointer → scratch strokes. */
        for event in pointer.poll(drawer.left_mouse_down(), drawer.mouse_pos()) {
            widget.handle(&event, now);
        }

        /* 3) Timed effects (fill, shake, dissolve, message, rain). */
        widget.tick(now);

        /* 4) Build the frame and present it. */
        compose_frame(&mut screen, &widget, now);

        if drawer.s_pressed_once() {
            snapshots += 1;
            let path = args.snapshot_dir.join(format!("heart-{snapshots:03}.png"));
            if let Err(e) = save_png(&screen, &path) {
                warn!("{e}");
            }
        }

        drawer.present(&screen)?;
    }

    debug!("window closed, fill {:.1}%", widget.fill_ratio() * 100.0);
    Ok(())
}
