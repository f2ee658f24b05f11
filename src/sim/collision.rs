//! Collision detection and deflection response
//!
//! Shots are points, the blade is a rotated quadrilateral. A hit registers
//! when a shot's center enters the blade; the response sends it back up,
//! bent by the saber's tilt.

use glam::Vec2;

use super::polygon::HitPolygon;
use super::state::{ArenaBounds, Projectile};
use crate::HEADING_UP;
use crate::tuning::SideExitPolicy;

/// Result of checking a shot against the blade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BladeContact {
    /// Outside the blade
    Clear,
    /// Just entered the blade this tick
    Entered,
    /// Still inside from a previous tick
    Inside,
}

/// Where a shot stands relative to the arena after moving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsCheck {
    /// Still in play
    InPlay,
    /// Crossed the bottom edge; the player failed to block it
    Missed,
    /// Left through the left or right edge
    SideExit,
    /// Deflected shot left through the top
    Escaped,
}

/// Classify a shot's position against the arena
pub fn check_bounds(shot: &Projectile, bounds: ArenaBounds) -> BoundsCheck {
    if shot.pos.y > bounds.height {
        BoundsCheck::Missed
    } else if shot.pos.x < 0.0 || shot.pos.x > bounds.width {
        BoundsCheck::SideExit
    } else if shot.deflected && shot.pos.y < 0.0 {
        BoundsCheck::Escaped
    } else {
        BoundsCheck::InPlay
    }
}

/// Whether a bounds outcome counts against the player
pub fn counts_as_miss(check: BoundsCheck, side_exit: SideExitPolicy) -> bool {
    match check {
        BoundsCheck::Missed => true,
        BoundsCheck::SideExit => side_exit == SideExitPolicy::CountAsMiss,
        BoundsCheck::InPlay | BoundsCheck::Escaped => false,
    }
}

/// Test a shot against the blade and update its inside flag
///
/// `probe` is the point to test, normally the shot center.
pub fn blade_contact(shot: &mut Projectile, probe: Vec2, blade: &HitPolygon) -> BladeContact {
    let inside = blade.contains(probe);
    let was_inside = shot.inside_blade;
    shot.inside_blade = inside;
    match (inside, was_inside) {
        (false, _) => BladeContact::Clear,
        (true, false) => BladeContact::Entered,
        (true, true) => BladeContact::Inside,
    }
}

/// Heading after bouncing off a blade tilted by `tilt_radians`
///
/// `influence` is below one so tilt bends the return path without ever
/// fully deciding it.
#[inline]
pub fn deflect_heading(tilt_radians: f32, influence: f32) -> f32 {
    HEADING_UP + tilt_radians * influence
}

/// Send a shot back up off the blade
pub fn deflect(shot: &mut Projectile, tilt_radians: f32, influence: f32) {
    shot.heading = deflect_heading(tilt_radians, influence);
    shot.deflected = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ProjectileId;
    use std::f32::consts::FRAC_PI_2;

    fn shot_at(x: f32, y: f32) -> Projectile {
        Projectile::new(ProjectileId(1), Vec2::new(x, y), FRAC_PI_2)
    }

    #[test]
    fn test_bounds_classification() {
        let bounds = ArenaBounds::new(100.0, 100.0);
        assert_eq!(check_bounds(&shot_at(50.0, 50.0), bounds), BoundsCheck::InPlay);
        assert_eq!(check_bounds(&shot_at(50.0, 101.0), bounds), BoundsCheck::Missed);
        assert_eq!(check_bounds(&shot_at(-1.0, 50.0), bounds), BoundsCheck::SideExit);
        assert_eq!(check_bounds(&shot_at(101.0, 50.0), bounds), BoundsCheck::SideExit);

        // Undeflected shots above the top edge are still arriving
        assert_eq!(check_bounds(&shot_at(50.0, -1.0), bounds), BoundsCheck::InPlay);
        let mut up = shot_at(50.0, -1.0);
        up.deflected = true;
        assert_eq!(check_bounds(&up, bounds), BoundsCheck::Escaped);
    }

    #[test]
    fn test_bottom_takes_priority_over_side() {
        let bounds = ArenaBounds::new(100.0, 100.0);
        assert_eq!(check_bounds(&shot_at(120.0, 130.0), bounds), BoundsCheck::Missed);
    }

    #[test]
    fn test_side_exit_policy() {
        assert!(!counts_as_miss(BoundsCheck::SideExit, SideExitPolicy::Ignore));
        assert!(counts_as_miss(BoundsCheck::Missed, SideExitPolicy::Ignore));
        assert!(!counts_as_miss(BoundsCheck::Escaped, SideExitPolicy::CountAsMiss));
    }

    #[test]
    fn test_superseded_side_exit_counts_as_miss() {
        assert!(counts_as_miss(BoundsCheck::SideExit, SideExitPolicy::CountAsMiss));
    }

    #[test]
    fn test_deflect_upright_goes_straight_up() {
        let mut shot = shot_at(50.0, 50.0);
        deflect(&mut shot, 0.0, 0.5);
        assert!(shot.deflected);
        assert!((shot.heading - HEADING_UP).abs() < 1e-6);
    }

    #[test]
    fn test_deflect_tilt_bends_but_stays_upward() {
        let tilt = 120f32.to_radians();
        let heading = deflect_heading(tilt, 0.5);
        assert!(heading > HEADING_UP);
        assert!(heading.sin() < 0.0);
        let heading = deflect_heading(-tilt, 0.5);
        assert!(heading < HEADING_UP);
        assert!(heading.sin() < 0.0);
    }

    #[test]
    fn test_contact_registers_on_entry_only() {
        let blade = HitPolygon::blade(Vec2::new(50.0, 80.0), 0.0, 60.0, 10.0);
        let mut shot = shot_at(50.0, 10.0);
        let expected = [
            (10.0, BladeContact::Clear),
            (30.0, BladeContact::Entered),
            (35.0, BladeContact::Inside),
            (10.0, BladeContact::Clear),
            (30.0, BladeContact::Entered),
        ];
        for (y, contact) in expected {
            shot.pos.y = y;
            let center = shot.pos;
            assert_eq!(blade_contact(&mut shot, center, &blade), contact);
        }
    }
}
