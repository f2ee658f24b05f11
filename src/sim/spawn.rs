//! Blaster shot spawning
//!
//! Shots appear along the top edge and are aimed at a random point on the
//! bottom edge, so they come in at an angle rather than straight down.

use glam::Vec2;
use rand::Rng;

use super::state::{ArenaBounds, Projectile, ProjectileId};
use crate::heading_between;
use crate::settings::Difficulty;

/// Delay before the first shot of a match (ms)
pub fn first_delay(tier: Difficulty) -> u64 {
    tier.first_shot_delay_ms()
}

/// Delay before the next shot (ms)
pub fn next_delay<R: Rng>(tier: Difficulty, rng: &mut R) -> u64 {
    tier.next_spawn_delay_ms(rng)
}

/// Where a shot starts and where it is aimed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPlan {
    pub start: Vec2,
    pub aim: Vec2,
}

impl SpawnPlan {
    /// Random start along the top edge, random aim along the bottom edge
    ///
    /// Returns None while the arena has not been measured.
    pub fn random<R: Rng>(bounds: ArenaBounds, shot_width: f32, rng: &mut R) -> Option<Self> {
        if !bounds.is_known() {
            return None;
        }
        let half = (shot_width / 2.0).min(bounds.width / 2.0);
        let start_x = if bounds.width - 2.0 * half > 0.0 {
            rng.random_range(half..bounds.width - half)
        } else {
            bounds.width / 2.0
        };
        let aim_x = rng.random_range(0.0..=bounds.width);
        Some(Self {
            start: Vec2::new(start_x, 0.0),
            aim: Vec2::new(aim_x, bounds.height),
        })
    }

    /// Heading from start to aim: atan2(height, aim_x - start_x)
    pub fn heading(&self) -> f32 {
        heading_between(self.start, self.aim)
    }

    pub fn into_projectile(self, id: ProjectileId) -> Projectile {
        Projectile::new(id, self.start, self.heading())
    }
}
