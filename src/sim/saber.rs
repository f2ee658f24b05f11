//! Lightsaber pose
//!
//! Pointer samples set a target and an instantaneous tilt. Two independent
//! ticks then move the saber: a fast damping tick eases the position toward
//! the target, and a slower decay tick lets the tilt settle back to upright
//! once the pointer goes idle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::polygon::HitPolygon;
use crate::tuning::Tuning;

/// A raw pointer position with the session time it arrived at
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub pos: Vec2,
    pub at_ms: u64,
}

/// The player's saber
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Saber {
    /// Hilt pivot position (damped)
    pub pos: Vec2,
    /// Where the pointer last was
    pub target: Vec2,
    /// Clockwise tilt in degrees
    pub tilt_degrees: f32,
    /// Previous pointer sample, for deltas
    last_sample: Option<Vec2>,
    /// Session time of the last pointer sample
    last_sample_ms: Option<u64>,
}

impl Default for Saber {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            target: Vec2::ZERO,
            tilt_degrees: 0.0,
            last_sample: None,
            last_sample_ms: None,
        }
    }
}

impl Saber {
    /// Put the saber somewhere immediately, upright and at rest
    pub fn place_at(&mut self, pos: Vec2) {
        self.pos = pos;
        self.target = pos;
        self.tilt_degrees = 0.0;
        self.last_sample = Some(pos);
    }

    pub fn tilt_radians(&self) -> f32 {
        self.tilt_degrees.to_radians()
    }

    /// Apply one pointer sample
    pub fn apply_sample(&mut self, sample: PointerSample, tuning: &Tuning) {
        // First sample has nothing to compare against; treat it as no motion
        let prev = self.last_sample.unwrap_or(sample.pos);
        let delta = sample.pos - prev;

        self.target = sample.pos;
        self.last_sample = Some(sample.pos);
        self.last_sample_ms = Some(sample.at_ms);

        let max_tilt = if tuning.upward_tilt_widening && delta.y < 0.0 {
            tuning.max_tilt_upward_degrees
        } else {
            tuning.max_tilt_degrees
        };
        // Unvalidated tuning must not panic in clamp; NaN or negative means no tilt
        let max_tilt = max_tilt.max(0.0);
        self.tilt_degrees = (-delta.x * tuning.tilt_sensitivity).clamp(-max_tilt, max_tilt);
    }

    /// Ease toward the target. Never overshoots for damping in (0, 1).
    pub fn damp(&mut self, damping: f32) {
        self.pos += (self.target - self.pos) * damping;
    }

    /// Let the tilt settle when the pointer has been idle long enough
    ///
    /// Returns true if the tilt changed.
    pub fn decay_tilt(&mut self, now_ms: u64, tuning: &Tuning) -> bool {
        if self.tilt_degrees == 0.0 {
            return false;
        }
        let idle = match self.last_sample_ms {
            Some(at) => now_ms.saturating_sub(at) >= tuning.idle_window_ms,
            None => true,
        };
        if !idle {
            return false;
        }

        self.tilt_degrees *= tuning.tilt_decay;
        if self.tilt_degrees.abs() < tuning.tilt_snap_degrees {
            self.tilt_degrees = 0.0;
        }
        true
    }

    /// Collision polygon for the current pose
    pub fn hit_polygon(&self, tuning: &Tuning) -> HitPolygon {
        HitPolygon::blade(
            self.pos,
            self.tilt_radians(),
            tuning.blade_length,
            tuning.hit_half_width(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample(x: f32, y: f32, at_ms: u64) -> PointerSample {
        PointerSample {
            pos: Vec2::new(x, y),
            at_ms,
        }
    }

    #[test]
    fn test_moving_right_tilts_left() {
        let tuning = Tuning::default();
        let mut saber = Saber::default();
        saber.apply_sample(sample(100.0, 300.0, 0), &tuning);
        saber.apply_sample(sample(120.0, 300.0, 5), &tuning);
        assert_eq!(saber.tilt_degrees, -10.0);
        assert_eq!(saber.target, Vec2::new(120.0, 300.0));
    }

    #[test]
    fn test_first_sample_has_no_tilt() {
        let tuning = Tuning::default();
        let mut saber = Saber::default();
        saber.apply_sample(sample(400.0, 300.0, 0), &tuning);
        assert_eq!(saber.tilt_degrees, 0.0);
    }

    #[test]
    fn test_tilt_clamped() {
        let tuning = Tuning::default();
        let mut saber = Saber::default();
        saber.apply_sample(sample(0.0, 300.0, 0), &tuning);
        saber.apply_sample(sample(1000.0, 300.0, 1), &tuning);
        assert_eq!(saber.tilt_degrees, -90.0);
    }

    #[test]
    fn test_upward_motion_widens_clamp() {
        let tuning = Tuning::default();
        let mut saber = Saber::default();
        saber.apply_sample(sample(1000.0, 300.0, 0), &tuning);
        saber.apply_sample(sample(0.0, 250.0, 1), &tuning);
        assert_eq!(saber.tilt_degrees, 120.0);

        let flat = Tuning {
            upward_tilt_widening: false,
            ..Default::default()
        };
        saber.apply_sample(sample(1000.0, 200.0, 2), &flat);
        assert_eq!(saber.tilt_degrees, -90.0);
    }

    #[test]
    fn test_bad_tilt_clamp_means_no_tilt() {
        let tuning = Tuning {
            max_tilt_degrees: -1.0,
            upward_tilt_widening: false,
            ..Default::default()
        };
        let mut saber = Saber::default();
        saber.apply_sample(sample(0.0, 300.0, 0), &tuning);
        saber.apply_sample(sample(100.0, 300.0, 1), &tuning);
        assert_eq!(saber.tilt_degrees, 0.0);

        let nan = Tuning {
            max_tilt_degrees: f32::NAN,
            upward_tilt_widening: false,
            ..Default::default()
        };
        saber.apply_sample(sample(0.0, 300.0, 2), &nan);
        assert_eq!(saber.tilt_degrees, 0.0);
    }

    #[test]
    fn test_decay_waits_for_idle_then_snaps() {
        let tuning = Tuning::default();
        let mut saber = Saber::default();
        saber.apply_sample(sample(100.0, 300.0, 0), &tuning);
        saber.apply_sample(sample(80.0, 300.0, 10), &tuning);
        assert_eq!(saber.tilt_degrees, 10.0);

        // Still inside the idle window
        assert!(!saber.decay_tilt(50, &tuning));
        assert_eq!(saber.tilt_degrees, 10.0);

        let mut now = 10 + tuning.idle_window_ms;
        let mut previous = saber.tilt_degrees;
        while saber.tilt_degrees != 0.0 {
            assert!(saber.decay_tilt(now, &tuning));
            assert!(saber.tilt_degrees.abs() < previous.abs());
            previous = saber.tilt_degrees;
            now += tuning.saber_decay_ms;
            assert!(now < 100_000, "tilt never settled");
        }
        assert!(!saber.decay_tilt(now, &tuning));
    }

    #[test]
    fn test_hit_polygon_includes_margin() {
        let tuning = Tuning::default();
        let mut saber = Saber::default();
        saber.place_at(Vec2::new(200.0, 400.0));
        let poly = saber.hit_polygon(&tuning);
        let (min, max) = poly.bounding_box();
        assert!((max.x - min.x - 2.0 * tuning.hit_half_width()).abs() < 1e-3);
        assert!((max.y - min.y - tuning.blade_length).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn prop_damping_never_overshoots(
            start in -1000.0f32..1000.0,
            target in -1000.0f32..1000.0,
            damping in 0.01f32..0.99,
            ticks in 1usize..200,
        ) {
            let mut saber = Saber::default();
            saber.place_at(Vec2::new(start, 0.0));
            saber.target = Vec2::new(target, 0.0);
            let mut gap = (target - start).abs();
            for _ in 0..ticks {
                saber.damp(damping);
                let new_gap = (target - saber.pos.x).abs();
                prop_assert!(new_gap <= gap + 1e-3);
                // Stays on the starting side of the target
                prop_assert!((saber.pos.x - target) * (start - target).signum() >= -1e-2);
                gap = new_gap;
            }
        }
    }
}
