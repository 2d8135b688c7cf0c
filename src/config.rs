// Widget configuration. Defaults reproduce the look and feel of the classic
// "scratch the heart" card: a 400x350 surface, a brush of radius 10 and
// completion at half coverage.

use crate::error::Error;
use crate::types::{Color, SurfaceSize};

/// Largest surface side accepted, in cells.
pub const MAX_SURFACE_SIDE: u32 = 4096;
/// Largest integer display zoom.
pub const MAX_ZOOM: u32 = 8;

/// Colours used by the widget. Visual only; none of these affect the geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Page behind the surface.
    pub background: Color,
    /// Unscratched heart area.
    pub heart_base: Color,
    /// Scratched cells, the completed heart and the dissolve.
    pub heart_paint: Color,
    /// Heart outline.
    pub outline: Color,
    /// Drop shadow under the outline.
    pub outline_shadow: Color,
    /// Instruction, HUD and message text.
    pub text: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::rgb(0x2b, 0x0f, 0x3a),
            heart_base: Color::rgba(255, 182, 193, 204), // rgba(255,182,193,0.8)
            heart_paint: Color::rgb(0xff, 0x17, 0x44),   // #ff1744
            outline: Color::WHITE,
            outline_shadow: Color::rgba(0, 0, 0, 204),   // rgba(0,0,0,0.8)
            text: Color::WHITE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WidgetConfig {
    /// Preferred surface size; also the reference size the heart scale is tuned for.
    pub surface: SurfaceSize,
    /// Heart scale at the reference size (the curve spans roughly 32*scale wide).
    pub heart_scale: f64,
    /// Inward tightening of the membership test. Empirical; keep at -0.05 for the classic look.
    pub tightening: f64,
    /// Brush radius in cells.
    pub brush_radius: u32,
    /// Fill ratio at which the celebration starts.
    pub completion_ratio: f64,
    /// Side of the square painted for each marked cell.
    pub mark_size: u32,
    /// Integer display zoom of the surface inside the window.
    pub zoom: u32,
    /// Text revealed after the heart dissolves.
    pub message: String,
    /// Text shown until completion.
    pub instruction: String,
    /// Show the fill percentage under the instruction.
    pub show_hud: bool,
    /// Seed for the falling hearts; random when `None`.
    pub rain_seed: Option<u64>,
    pub palette: Palette,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            surface: SurfaceSize::new(400, 350),
            heart_scale: 6.0,
            tightening: -0.05,
            brush_radius: 10,
            completion_ratio: 0.5,
            mark_size: 3,
            zoom: 1,
            message: String::from("I LOVE YOU"),
            instruction: String::from("SCRATCH THE HEART"),
            show_hud: false,
            rain_seed: None,
            palette: Palette::default(),
        }
    }
}

impl WidgetConfig {
    /// Reject values that would make the widget degenerate.
    pub fn validate(&self) -> Result<(), Error> {
        if self.surface.width == 0 || self.surface.height == 0 {
            return Err(Error::InvalidConfig(format!(
                "surface must be non-empty, got {}x{}",
                self.surface.width, self.surface.height
            )));
        }
        if self.surface.width > MAX_SURFACE_SIDE || self.surface.height > MAX_SURFACE_SIDE {
            return Err(Error::InvalidConfig(format!(
                "surface sides are limited to {MAX_SURFACE_SIDE}, got {}x{}",
                self.surface.width, self.surface.height
            )));
        }
        if !(self.heart_scale.is_finite() && self.heart_scale > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "heart scale must be positive, got {}",
                self.heart_scale
            )));
        }
        if !self.tightening.is_finite() {
            return Err(Error::InvalidConfig("tightening must be finite".into()));
        }
        if self.brush_radius == 0 {
            return Err(Error::InvalidConfig("brush radius must be at least 1".into()));
        }
        if !(self.completion_ratio > 0.0 && self.completion_ratio <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "completion ratio must be in (0, 1], got {}",
                self.completion_ratio
            )));
        }
        if self.mark_size == 0 {
            return Err(Error::InvalidConfig("mark size must be at least 1".into()));
        }
        if self.zoom == 0 || self.zoom > MAX_ZOOM {
            return Err(Error::InvalidConfig(format!(
                "zoom must be in 1..={MAX_ZOOM}, got {}",
                self.zoom
            )));
        }
        Ok(())
    }
}
