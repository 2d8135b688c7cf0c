//! Input model: raw pointer/touch events and the gestures the paint session
//! understands.
//!
//! Mouse and touch events map 1:1 onto the same three gestures; touch events
//! only ever look at their first touch point. `PointerTracker` turns the
//! polled state a window library exposes (button held, cursor position) into
//! discrete events by edge detection.

use crate::types::Point;

/// A raw input event in window coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    MouseDown(Point),
    MouseMove(Point),
    MouseUp,
    /// The cursor left the window.
    MouseOut,
    TouchStart(Vec<Point>),
    TouchMove(Vec<Point>),
    TouchEnd,
}

/// What the paint session sees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Start(Point),
    Move(Point),
    Stop,
}

impl Gesture {
    /// Normalize an event. Touch events without any touch point are dropped.
    pub fn from_event(event: &InputEvent) -> Option<Self> {
        match event {
            InputEvent::MouseDown(p) => Some(Self::Start(*p)),
            InputEvent::MouseMove(p) => Some(Self::Move(*p)),
            InputEvent::MouseUp | InputEvent::MouseOut | InputEvent::TouchEnd => Some(Self::Stop),
            InputEvent::TouchStart(touches) => touches.first().map(|p| Self::Start(*p)),
            InputEvent::TouchMove(touches) => touches.first().map(|p| Self::Move(*p)),
        }
    }
}

/// Edge detector over polled mouse state.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    was_down: bool,
    last_pos: Option<Point>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame of polled state; `pos` is `None` while the cursor is
    /// outside the window. Returns the events this frame implies, in order.
    pub fn poll(&mut self, down: bool, pos: Option<Point>) -> Vec<InputEvent> {
        let mut events = Vec::new();

        match pos {
            None => {
                if self.last_pos.is_some() {
                    events.push(InputEvent::MouseOut);
                }
            }
            Some(p) => {
                if down && !self.was_down {
                    events.push(InputEvent::MouseDown(p));
                } else if self.last_pos != Some(p) {
                    events.push(InputEvent::MouseMove(p));
                }
            }
        }

        if !down && self.was_down {
            events.push(InputEvent::MouseUp);
        }

        self.was_down = down;
        self.last_pos = pos;
        events
    }
}
