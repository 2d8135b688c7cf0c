//! Scratch-the-heart widget.
//!
//! The user scratches a heart on a small drawing surface; once half of it is
//! covered the widget fills it, shakes it, dissolves it, reveals a message
//! and lets hearts rain down.
//!
//! The library holds everything except the window: the membership oracle
//! ([`heart`]), the paint session ([`session`]), the completion sequence
//! ([`sequencer`], [`rain`]) and the [`widget`] tying them to a [`surface`].

pub mod config;
pub mod coords;
pub mod draw;
pub mod error;
pub mod heart;
pub mod input;
pub mod logging;
pub mod rain;
pub mod sequencer;
pub mod session;
pub mod snapshot;
pub mod surface;
pub mod types;
pub mod widget;

pub use config::{Palette, WidgetConfig};
pub use coords::{to_surface, DisplayRect, Layout};
pub use error::Error;
pub use heart::HeartShape;
pub use input::{Gesture, InputEvent, PointerTracker};
pub use rain::{EmitterToken, HeartRain, RainDrop};
pub use sequencer::{CompletionSequencer, Cue, Dissolve, DissolveFrame};
pub use session::{PaintSession, StrokeOutcome};
pub use surface::{Shadow, StrokeStyle, Surface};
pub use types::{Cell, Color, FrameBuffer, Point, SurfaceSize};
pub use widget::HeartWidget;
