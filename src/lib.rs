//! Lightsaber Deflect - a blaster-deflection arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (saber pose, spawning, collisions, damage, game loop)
//! - `settings`: Difficulty tiers and their speed/spawn parameters
//! - `tuning`: Data-driven game balance loaded from JSON

pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Difficulty;
pub use tuning::{SideExitPolicy, Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Collision tick period (~60 Hz)
    pub const TICK_MS: u64 = 16;
    /// Saber damping tick period
    pub const SABER_DAMPING_MS: u64 = 16;
    /// Saber tilt-decay tick period
    pub const SABER_DECAY_MS: u64 = 50;

    /// Fraction of the remaining distance the saber covers per damping tick
    pub const SABER_DAMPING: f32 = 0.25;
    /// Tilt multiplier applied per decay tick while the pointer is idle
    pub const TILT_DECAY: f32 = 0.85;
    /// Tilt snaps to zero below this magnitude (degrees)
    pub const TILT_SNAP_DEGREES: f32 = 0.5;
    /// No pointer sample for this long counts as idle
    pub const POINTER_IDLE_MS: u64 = 100;

    /// Degrees of tilt per pixel of horizontal pointer travel
    pub const TILT_SENSITIVITY: f32 = 0.5;
    /// Tilt clamp (degrees)
    pub const MAX_TILT_DEGREES: f32 = 90.0;
    /// Tilt clamp while the pointer moves upward (degrees)
    pub const MAX_TILT_UPWARD_DEGREES: f32 = 120.0;

    /// Length of the blade from hilt pivot to tip
    pub const BLADE_LENGTH: f32 = 150.0;
    /// Half the visual blade width
    pub const BLADE_HALF_WIDTH: f32 = 4.0;
    /// Extra half-width added to the hit polygon so grazing shots still count
    pub const BLADE_MARGIN: f32 = 10.0;
    /// How much saber tilt bends the deflected heading away from straight up
    pub const TILT_INFLUENCE: f32 = 0.5;

    /// Blaster shot width, keeps spawns clear of the side edges
    pub const SHOT_WIDTH: f32 = 8.0;

    /// Ticks a shot may be missing from the render registry before we warn
    pub const STALE_GRACE_TICKS: u32 = 2;
}

/// Heading pointing straight up the screen (y grows downward)
pub const HEADING_UP: f32 = -std::f32::consts::FRAC_PI_2;

/// Unit direction for a heading in radians
#[inline]
pub fn heading_vector(heading: f32) -> Vec2 {
    Vec2::from_angle(heading)
}

/// Heading (radians) from one point toward another
#[inline]
pub fn heading_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Rotate a point about the origin. Positive angles turn clockwise on screen.
#[inline]
pub fn rotate_point(point: Vec2, radians: f32) -> Vec2 {
    Vec2::from_angle(radians).rotate(point)
}
