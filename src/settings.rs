//! Difficulty tiers
//!
//! Each tier sets shot speed and the spawn cadence. Higher tiers are
//! always faster and denser.

use std::ops::Range;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Difficulty tier selected by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Padawan,
    Knight,
    Master,
}

impl Difficulty {
    /// All tiers, lowest first
    pub const ALL: [Difficulty; 3] = [Difficulty::Padawan, Difficulty::Knight, Difficulty::Master];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Padawan => "Padawan",
            Difficulty::Knight => "Knight",
            Difficulty::Master => "Master",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "padawan" | "1" => Some(Difficulty::Padawan),
            "knight" | "2" => Some(Difficulty::Knight),
            "master" | "3" => Some(Difficulty::Master),
            _ => None,
        }
    }

    /// Shot speed in pixels per collision tick
    pub fn shot_speed(&self) -> f32 {
        match self {
            Difficulty::Padawan => 5.0,
            Difficulty::Knight => 10.0,
            Difficulty::Master => 20.0,
        }
    }

    /// Delay before the first shot of a match (ms)
    pub fn first_shot_delay_ms(&self) -> u64 {
        match self {
            Difficulty::Padawan => 1500,
            Difficulty::Knight => 1000,
            Difficulty::Master => 500,
        }
    }

    /// Window the follow-up spawn delay is drawn from (ms).
    /// A single-value window means a fixed cadence.
    pub fn spawn_window_ms(&self) -> Range<u64> {
        match self {
            Difficulty::Padawan => 1500..1501,
            Difficulty::Knight => 500..1000,
            Difficulty::Master => 250..500,
        }
    }

    /// Whether the follow-up spawn delay is randomized
    pub fn randomized_spawns(&self) -> bool {
        !matches!(self, Difficulty::Padawan)
    }

    /// Pick the delay before the next shot
    pub fn next_spawn_delay_ms<R: Rng>(&self, rng: &mut R) -> u64 {
        let window = self.spawn_window_ms();
        if self.randomized_spawns() {
            rng.random_range(window)
        } else {
            window.start
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
