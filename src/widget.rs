//! The heart widget: one explicit instance wiring the paint session, the
//! completion sequencer and the falling hearts onto an injected surface.
//!
//! The widget is pure state plus drawing calls on its `Surface`. Everything
//! that lives outside the surface (instruction, message, shake, rain overlay)
//! is exposed through accessors so the host can compose its own frame.

use std::time::Duration;

use log::{debug, info};

use crate::config::WidgetConfig;
use crate::coords::{to_surface, DisplayRect, Layout};
use crate::error::Error;
use crate::heart::{HeartShape, OUTLINE_STEP};
use crate::input::{Gesture, InputEvent};
use crate::rain::{EmitterToken, HeartRain, RainDrop};
use crate::sequencer::{CompletionSequencer, Cue, Dissolve, DissolveFrame};
use crate::session::{MarkStyle, PaintSession, StrokeOutcome};
use crate::surface::{Shadow, StrokeStyle, Surface};
use crate::types::Cell;

/// How long the completion message takes to fade in.
const MESSAGE_FADE: Duration = Duration::from_millis(800);
/// Shake amplitude in surface pixels.
const SHAKE_AMPLITUDE: f64 = 5.0;

pub struct HeartWidget<S: Surface> {
    config: WidgetConfig,
    surface: S,
    display: DisplayRect,
    session: PaintSession,
    sequencer: Option<CompletionSequencer>,
    instruction_visible: bool,
    shaking_since: Option<Duration>,
    dissolve: Option<Dissolve>,
    message_shown_at: Option<Duration>,
    rain: Option<HeartRain>,
    rain_token: Option<EmitterToken>,
}

fn outline_style(config: &WidgetConfig) -> StrokeStyle {
    StrokeStyle {
        color: config.palette.outline,
        width: 3.0,
        shadow: Some(Shadow {
            color: config.palette.outline_shadow,
            blur: 5.0,
            offset_x: 2.0,
            offset_y: 2.0,
        }),
    }
}

fn fitted_shape(config: &WidgetConfig, surface: &dyn Surface) -> HeartShape {
    HeartShape::fitted(surface.size(), config.surface, config.heart_scale, config.tightening)
}

/// Pink heart with its white, shadowed border on a cleared surface.
fn draw_heart(shape: &HeartShape, surface: &mut dyn Surface, config: &WidgetConfig) {
    let outline = shape.outline(OUTLINE_STEP);
    surface.clear();
    surface.fill_polygon(&outline, config.palette.heart_base);
    surface.stroke_polygon(&outline, &outline_style(config));
}

/// Paint every cell inside the heart, marked or not, then re-stroke the border.
fn fill_complete_heart(shape: &HeartShape, surface: &mut dyn Surface, config: &WidgetConfig) {
    let size = surface.size();
    for x in 0..size.width as i32 {
        for y in 0..size.height as i32 {
            if shape.contains_cell(Cell::new(x, y)) {
                surface.fill_rect(x, y, 1, 1, config.palette.heart_paint);
            }
        }
    }
    surface.stroke_polygon(&shape.outline(OUTLINE_STEP), &outline_style(config));
}

fn draw_dissolve_frame(shape: &HeartShape, frame: DissolveFrame, surface: &mut dyn Surface, config: &WidgetConfig) {
    surface.clear();
    let grown = shape.scaled(frame.scale);
    surface.fill_polygon(&grown.outline(OUTLINE_STEP), config.palette.heart_paint.with_opacity(frame.opacity as f32));
}

impl<S: Surface> HeartWidget<S> {
    /// Build the widget on `surface` (already sized), shown at `display` in the window.
    pub fn new(config: WidgetConfig, mut surface: S, display: DisplayRect) -> Result<Self, Error> {
        config.validate()?;
        let shape = fitted_shape(&config, &surface);
        draw_heart(&shape, &mut surface, &config);
        let session = PaintSession::new(
            shape,
            surface.size(),
            config.brush_radius,
            config.completion_ratio,
            MarkStyle { color: config.palette.heart_paint, size: config.mark_size },
        );
        Ok(Self {
            config,
            surface,
            display,
            session,
            sequencer: None,
            instruction_visible: true,
            shaking_since: None,
            dissolve: None,
            message_shown_at: None,
            rain: None,
            rain_token: None,
        })
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn display(&self) -> DisplayRect {
        self.display
    }

    pub fn session(&self) -> &PaintSession {
        &self.session
    }

    pub fn fill_ratio(&self) -> f64 {
        self.session.fill_ratio()
    }

    pub fn is_completed(&self) -> bool {
        self.session.is_completed()
    }

    /// Dispatch one input event received at `now`.
    pub fn handle(&mut self, event: &InputEvent, now: Duration) -> Option<StrokeOutcome> {
        let gesture = Gesture::from_event(event)?;
        let outcome = match gesture {
            Gesture::Start(p) => {
                let p = to_surface(p, self.display, self.surface.size());
                self.session.start_drawing(p, &mut self.surface)
            }
            Gesture::Move(p) => {
                let p = to_surface(p, self.display, self.surface.size());
                self.session.draw(p, &mut self.surface)
            }
            Gesture::Stop => {
                self.session.stop_drawing();
                None
            }
        };
        if outcome.is_some_and(|o| o.completed) {
            self.begin_completion(now);
        }
        outcome
    }

    /// The window changed size: new surface, new heart, replayed marks.
    pub fn resize(&mut self, layout: Layout) {
        self.display = layout.display;
        self.surface.resize(layout.surface);
        let shape = fitted_shape(&self.config, &self.surface);
        if self.dissolve.is_none() {
            draw_heart(&shape, &mut self.surface, &self.config);
        }
        self.session.resize(shape, layout.surface, &mut self.surface);

        if self.dissolve.is_some() {
            // the next dissolve frame repaints; a finished dissolve stays empty
            self.surface.clear();
        } else if self.sequencer.as_ref().is_some_and(|s| s.has_fired(Cue::FillHeart)) {
            fill_complete_heart(self.session.shape(), &mut self.surface, &self.config);
        }
        debug!("widget resized to {}x{}", layout.surface.width, layout.surface.height);
    }

    /// Advance time: fire due cues, step the dissolve by one frame, run the rain.
    pub fn tick(&mut self, now: Duration) {
        self.run_due_cues(now);

        if let Some(dissolve) = self.dissolve.as_mut() {
            if let Some(frame) = dissolve.next() {
                draw_dissolve_frame(self.session.shape(), frame, &mut self.surface, &self.config);
            }
        }

        if let Some(rain) = self.rain.as_mut() {
            rain.tick(now);
        }
    }

    fn begin_completion(&mut self, now: Duration) {
        if self.sequencer.is_some() {
            return;
        }
        info!("celebration started");
        self.sequencer = Some(CompletionSequencer::new(now));
        self.run_due_cues(now);
    }

    fn run_due_cues(&mut self, now: Duration) {
        let cues = match self.sequencer.as_mut() {
            Some(seq) => seq.due(now),
            None => return,
        };
        for cue in cues {
            self.perform(cue, now);
        }
    }

    fn perform(&mut self, cue: Cue, now: Duration) {
        debug!("cue {cue:?} at {}ms", now.as_millis());
        match cue {
            Cue::FillHeart => {
                self.instruction_visible = false;
                fill_complete_heart(self.session.shape(), &mut self.surface, &self.config);
            }
            Cue::Shake => self.shaking_since = Some(now),
            Cue::Dissolve => {
                self.shaking_since = None;
                self.dissolve = Some(Dissolve::new());
            }
            Cue::RevealMessage => self.message_shown_at = Some(now),
            Cue::StartRain => {
                let (rain, token) = HeartRain::start(now, self.config.rain_seed);
                self.rain = Some(rain);
                self.rain_token = Some(token);
            }
        }
    }

    pub fn instruction_visible(&self) -> bool {
        self.instruction_visible
    }

    pub fn is_shaking(&self) -> bool {
        self.shaking_since.is_some()
    }

    /// Surface displacement while shaking, in surface pixels.
    pub fn shake_offset(&self, now: Duration) -> (i32, i32) {
        let Some(since) = self.shaking_since else {
            return (0, 0);
        };
        let t = now.saturating_sub(since).as_secs_f64();
        let dx = (t * std::f64::consts::TAU * 8.0).sin() * SHAKE_AMPLITUDE;
        let dy = (t * std::f64::consts::TAU * 6.0).cos() * SHAKE_AMPLITUDE * 0.4;
        (dx.round() as i32, dy.round() as i32)
    }

    pub fn is_dissolving(&self) -> bool {
        self.dissolve.as_ref().is_some_and(|d| !d.is_done())
    }

    pub fn message_visible(&self) -> bool {
        self.message_shown_at.is_some()
    }

    /// 0 before the reveal, ramping to 1 over the fade-in.
    pub fn message_opacity(&self, now: Duration) -> f32 {
        match self.message_shown_at {
            None => 0.0,
            Some(at) => (now.saturating_sub(at).as_secs_f32() / MESSAGE_FADE.as_secs_f32()).min(1.0),
        }
    }

    pub fn rain_drops(&self) -> &[RainDrop] {
        match &self.rain {
            Some(rain) => rain.drops(),
            None => &[],
        }
    }

    /// Handle of the running emitter, once the rain has started.
    pub fn rain_token(&self) -> Option<&EmitterToken> {
        self.rain_token.as_ref()
    }

    /// Stop spawning new hearts. Falling ones finish on their own.
    pub fn stop_rain(&mut self) {
        if let Some(token) = &self.rain_token {
            token.stop();
        }
    }

    /// Fill percentage line for the HUD.
    pub fn hud_text(&self) -> String {
        format!("FILLED {:.0}%", self.session.fill_ratio() * 100.0)
    }
}
