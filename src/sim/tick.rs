//! Fixed timestep collision tick
//!
//! Moves every live shot, retires the ones that left the arena and bounces
//! the ones that ran into the blade. Scoring and damage are left to the
//! caller, which gets a report of what happened.

use super::collision::{
    BladeContact, BoundsCheck, blade_contact, check_bounds, counts_as_miss, deflect,
};
use super::polygon::HitPolygon;
use super::state::{ArenaBounds, Projectile, ProjectileId, Rect};
use crate::tuning::Tuning;

/// Lookup of where the renderer actually drew a shot
pub trait RenderRegistry {
    /// On-screen extent of a shot, or None if the renderer has not caught up
    fn extent(&self, id: ProjectileId) -> Option<Rect>;
}

/// Everything one tick reads besides the shots themselves
pub struct TickInput<'a> {
    pub bounds: ArenaBounds,
    /// Pixels per tick
    pub speed: f32,
    pub blade: HitPolygon,
    pub tilt_radians: f32,
    pub registry: Option<&'a dyn RenderRegistry>,
}

/// What happened during one tick, in shot order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub deflected: Vec<ProjectileId>,
    pub missed: Vec<ProjectileId>,
    /// Shots removed without counting against the player
    pub retired: Vec<ProjectileId>,
}

/// Advance all shots by one tick
pub fn tick(shots: &mut Vec<Projectile>, input: &TickInput<'_>, tuning: &Tuning) -> TickReport {
    let mut report = TickReport::default();

    if !input.bounds.is_known() {
        log::debug!("Arena bounds unknown, deferring tick");
        return report;
    }

    shots.retain_mut(|shot| {
        shot.integrate(input.speed);

        let check = check_bounds(shot, input.bounds);
        if check != BoundsCheck::InPlay {
            if counts_as_miss(check, tuning.side_exit) {
                report.missed.push(shot.id);
            } else {
                report.retired.push(shot.id);
            }
            return false;
        }

        let probe = match input.registry {
            Some(registry) => match registry.extent(shot.id) {
                Some(rect) => rect.center(),
                None => {
                    // Renderer may lag a tick or two behind a fresh spawn
                    if shot.age_ticks > tuning.stale_grace_ticks && !shot.stale_warned {
                        log::warn!("No render handle found for {}", shot.id);
                        shot.stale_warned = true;
                    }
                    shot.pos
                }
            },
            None => shot.pos,
        };

        if blade_contact(shot, probe, &input.blade) == BladeContact::Entered {
            deflect(shot, input.tilt_radians, tuning.tilt_influence);
            report.deflected.push(shot.id);
        }

        true
    });

    report
}
