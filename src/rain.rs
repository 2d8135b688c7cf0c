// FX: falling hearts, the last act of the celebration.
// Visual outcomes:
// - One small heart appears at the top every 200 ms at a random column.
// - Each heart falls for 2–5 s at a random size and is gone 5 s after it appeared.
// - The emitter never stops on its own; the token handed out at start can stop it.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::Color;

/// Time between two spawns.
pub const SPAWN_INTERVAL: Duration = Duration::from_millis(200);
/// Each drop removes itself this long after its own spawn.
pub const DROP_LIFETIME: Duration = Duration::from_millis(5000);

/// The eight heart kinds that rain down. Visual: only the tint differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartGlyph {
    Sparkling,
    Twin,
    Growing,
    Beating,
    Ribbon,
    Arrow,
    Revolving,
    Decoration,
}

impl HeartGlyph {
    pub const ALL: [HeartGlyph; 8] = [
        HeartGlyph::Sparkling,
        HeartGlyph::Twin,
        HeartGlyph::Growing,
        HeartGlyph::Beating,
        HeartGlyph::Ribbon,
        HeartGlyph::Arrow,
        HeartGlyph::Revolving,
        HeartGlyph::Decoration,
    ];

    pub fn color(self) -> Color {
        match self {
            HeartGlyph::Sparkling => Color::rgb(0xff, 0x6e, 0xc7),
            HeartGlyph::Twin => Color::rgb(0xff, 0x8f, 0xb1),
            HeartGlyph::Growing => Color::rgb(0xff, 0x4f, 0x9a),
            HeartGlyph::Beating => Color::rgb(0xe9, 0x1e, 0x63),
            HeartGlyph::Ribbon => Color::rgb(0xff, 0xc1, 0x07),
            HeartGlyph::Arrow => Color::rgb(0xf0, 0x62, 0x92),
            HeartGlyph::Revolving => Color::rgb(0xd8, 0x1b, 0x60),
            HeartGlyph::Decoration => Color::rgb(0xba, 0x68, 0xc8),
        }
    }
}

/// One falling heart.
#[derive(Debug, Clone, PartialEq)]
pub struct RainDrop {
    pub spawned_at: Duration,
    /// Horizontal position as a percentage of the overlay width, in [0, 100).
    pub left_pct: f32,
    /// How long the fall takes, in [2, 5) s.
    pub fall: Duration,
    /// Glyph size in pixels, in [15, 25).
    pub size_px: f32,
    pub glyph: HeartGlyph,
}

impl RainDrop {
    pub fn expires_at(&self) -> Duration {
        self.spawned_at + DROP_LIFETIME
    }

    /// Top-left of the glyph inside a `width` x `height` overlay at `now`.
    /// Visual: starts just above the top edge and ends below the bottom edge.
    pub fn position(&self, now: Duration, width: f32, height: f32) -> (f32, f32) {
        let elapsed = now.saturating_sub(self.spawned_at).as_secs_f32();
        let progress = (elapsed / self.fall.as_secs_f32().max(f32::EPSILON)).clamp(0.0, 1.0);
        let x = self.left_pct / 100.0 * width;
        let y = -self.size_px + progress * (height + self.size_px);
        (x, y)
    }
}

/// Handle to a running emitter. Clones share the same switch.
#[derive(Debug, Clone, Default)]
pub struct EmitterToken(Rc<Cell<bool>>);

impl EmitterToken {
    /// No more drops will be spawned; the ones already falling finish normally.
    pub fn stop(&self) {
        self.0.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.get()
    }
}

pub struct HeartRain {
    rng: StdRng,
    started_at: Duration,
    spawned: u64,
    drops: Vec<RainDrop>,
    token: EmitterToken,
}

impl HeartRain {
    /// Start emitting at `now`. A fixed `seed` makes the rain reproducible.
    pub fn start(now: Duration, seed: Option<u64>) -> (Self, EmitterToken) {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let token = EmitterToken::default();
        debug!("heart rain started");
        let rain = Self {
            rng,
            started_at: now,
            spawned: 0,
            drops: Vec::new(),
            token: token.clone(),
        };
        (rain, token)
    }

    pub fn drops(&self) -> &[RainDrop] {
        &self.drops
    }

    /// Total drops spawned since start.
    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    /// Spawn every drop whose interval has elapsed, then drop the expired ones.
    pub fn tick(&mut self, now: Duration) {
        if !self.token.is_stopped() {
            let elapsed = now.saturating_sub(self.started_at).as_millis();
            let due = (elapsed / SPAWN_INTERVAL.as_millis()) as u64;
            while self.spawned < due {
                self.spawned += 1;
                let at = self.started_at + SPAWN_INTERVAL * self.spawned as u32;
                let drop = self.spawn(at);
                self.drops.push(drop);
            }
        }
        self.drops.retain(|d| now < d.expires_at());
    }

    fn spawn(&mut self, at: Duration) -> RainDrop {
        let glyph = HeartGlyph::ALL[self.rng.random_range(0..HeartGlyph::ALL.len())];
        RainDrop {
            spawned_at: at,
            left_pct: self.rng.random_range(0.0..100.0),
            fall: Duration::from_secs_f32(self.rng.random_range(2.0..5.0)),
            size_px: self.rng.random_range(15.0..25.0),
            glyph,
        }
    }
}
