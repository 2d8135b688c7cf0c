//! Completion sequencer: the fixed celebration that follows a completed heart.
//!
//! Every cue is a one-shot delayed action measured from the completion
//! instant `t0`. The host polls [`CompletionSequencer::due`] once per frame
//! with the current time and performs whatever cues came due, in order.
//! Nothing here can be cancelled or restarted.

use std::time::Duration;

/// One step of the celebration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Hide the instruction and paint the whole heart.
    FillHeart,
    /// Start shaking the surface.
    Shake,
    /// Stop shaking and start the scale/fade dissolve.
    Dissolve,
    /// Show the completion message.
    RevealMessage,
    /// Start the falling-heart emitter.
    StartRain,
}

/// Cue offsets from `t0`, strictly increasing.
pub static SCHEDULE: [(Duration, Cue); 5] = [
    (Duration::ZERO, Cue::FillHeart),
    (Duration::from_millis(500), Cue::Shake),
    (Duration::from_millis(2000), Cue::Dissolve),
    (Duration::from_millis(3000), Cue::RevealMessage),
    (Duration::from_millis(3500), Cue::StartRain),
];

#[derive(Debug, Clone)]
pub struct CompletionSequencer {
    t0: Duration,
    next: usize,
}

impl CompletionSequencer {
    pub fn new(t0: Duration) -> Self {
        Self { t0, next: 0 }
    }

    /// Cues whose time has come since the last call, in schedule order.
    /// Each cue is returned exactly once.
    pub fn due(&mut self, now: Duration) -> Vec<Cue> {
        let elapsed = now.saturating_sub(self.t0);
        let mut cues = Vec::new();
        while let Some((offset, cue)) = SCHEDULE.get(self.next) {
            if *offset > elapsed {
                break;
            }
            cues.push(*cue);
            self.next += 1;
        }
        cues
    }

    /// True once `cue` has been handed out.
    pub fn has_fired(&self, cue: Cue) -> bool {
        SCHEDULE[..self.next].iter().any(|(_, c)| *c == cue)
    }

    pub fn is_finished(&self) -> bool {
        self.next >= SCHEDULE.len()
    }
}

/// One frame of the dissolve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DissolveFrame {
    pub scale: f64,
    pub opacity: f64,
}

/// The exploding heart: grows by `SCALE_STEP` and fades by `OPACITY_STEP`
/// per frame. Yields the first frame at scale 1, opacity 1 and stops after
/// the frame whose successor would have opacity <= 0.
#[derive(Debug, Clone)]
pub struct Dissolve {
    scale: f64,
    opacity: f64,
    done: bool,
}

impl Dissolve {
    pub const SCALE_STEP: f64 = 0.08;
    pub const OPACITY_STEP: f64 = 0.03;

    pub fn new() -> Self {
        Self { scale: 1.0, opacity: 1.0, done: false }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

impl Default for Dissolve {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for Dissolve {
    type Item = DissolveFrame;

    fn next(&mut self) -> Option<DissolveFrame> {
        if self.done {
            return None;
        }
        let frame = DissolveFrame { scale: self.scale, opacity: self.opacity };
        self.scale += Self::SCALE_STEP;
        self.opacity -= Self::OPACITY_STEP;
        if self.opacity <= 0.0 {
            self.done = true;
        }
        Some(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn schedule_is_strictly_increasing() {
        for pair in SCHEDULE.windows(2) {
            assert!(pair[0].0 < pair[1].0);
        }
    }

    #[test]
    fn fill_is_due_immediately() {
        let mut s = CompletionSequencer::new(ms(10_000));
        assert_eq!(s.due(ms(10_000)), vec![Cue::FillHeart]);
        assert_eq!(s.due(ms(10_000)), Vec::<Cue>::new());
    }

    #[test]
    fn cues_fire_at_their_offsets() {
        let mut s = CompletionSequencer::new(ms(1000));
        assert_eq!(s.due(ms(1000)), vec![Cue::FillHeart]);
        assert_eq!(s.due(ms(1499)), Vec::<Cue>::new());
        assert_eq!(s.due(ms(1500)), vec![Cue::Shake]);
        assert_eq!(s.due(ms(2999)), Vec::<Cue>::new());
        assert_eq!(s.due(ms(3000)), vec![Cue::Dissolve]);
        assert_eq!(s.due(ms(4000)), vec![Cue::RevealMessage]);
        assert!(!s.is_finished());
        assert_eq!(s.due(ms(4500)), vec![Cue::StartRain]);
        assert!(s.is_finished());
        assert_eq!(s.due(ms(100_000)), Vec::<Cue>::new());
    }

    #[test]
    fn late_poll_returns_everything_in_order() {
        let mut s = CompletionSequencer::new(ms(0));
        let all: Vec<Cue> = SCHEDULE.iter().map(|(_, c)| *c).collect();
        assert_eq!(s.due(ms(60_000)), all);
    }

    #[test]
    fn clock_before_t0_fires_nothing_extra() {
        let mut s = CompletionSequencer::new(ms(5000));
        assert_eq!(s.due(ms(4000)), vec![Cue::FillHeart]);
        assert!(s.has_fired(Cue::FillHeart));
        assert!(!s.has_fired(Cue::Shake));
    }

    #[test]
    fn dissolve_runs_until_transparent() {
        let frames: Vec<DissolveFrame> = Dissolve::new().collect();
        assert_eq!(frames.len(), 34);
        assert_eq!(frames[0], DissolveFrame { scale: 1.0, opacity: 1.0 });
        assert!((frames[1].scale - 1.08).abs() < 1e-12);
        assert!((frames[1].opacity - 0.97).abs() < 1e-12);
        let last = frames[frames.len() - 1];
        assert!(last.opacity > 0.0 && last.opacity < 0.03);
        assert!(frames.windows(2).all(|w| w[1].scale > w[0].scale && w[1].opacity < w[0].opacity));
    }

    #[test]
    fn dissolve_stays_done() {
        let mut d = Dissolve::new();
        for _ in 0..34 {
            assert!(d.next().is_some());
        }
        assert!(d.is_done());
        assert!(d.next().is_none());
        assert!(d.next().is_none());
    }
}
