//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives in [`Tuning`], so a
//! shell can ship a JSON file instead of recompiling. Missing fields fall
//! back to the defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::damage::DamagePolicy;

/// What happens to a shot that leaves through the left or right edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SideExitPolicy {
    /// Removed silently. A side exit is not a failure to deflect.
    #[default]
    Ignore,
    /// Superseded: removed and credited as a miss
    CountAsMiss,
}

/// Errors from loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("Failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be in {range}, got {value}")]
    OutOfRange {
        field: &'static str,
        range: &'static str,
        value: f32,
    },

    #[error("{field} must be non-zero")]
    Zero { field: &'static str },
}

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Timing ===
    /// Collision tick period (ms)
    pub tick_ms: u64,
    /// Saber damping tick period (ms)
    pub saber_damping_ms: u64,
    /// Saber tilt-decay tick period (ms)
    pub saber_decay_ms: u64,

    // === Saber motion ===
    /// Fraction of remaining distance covered per damping tick, (0, 1)
    pub damping: f32,
    /// Tilt multiplier per idle decay tick, (0, 1)
    pub tilt_decay: f32,
    /// Tilt snaps to zero below this (degrees)
    pub tilt_snap_degrees: f32,
    /// Idle window before tilt starts to decay (ms)
    pub idle_window_ms: u64,
    /// Degrees of tilt per pixel of horizontal travel
    pub tilt_sensitivity: f32,
    /// Tilt clamp (degrees)
    pub max_tilt_degrees: f32,
    /// Tilt clamp while moving upward (degrees)
    pub max_tilt_upward_degrees: f32,
    /// Widen the clamp when the pointer moves upward
    pub upward_tilt_widening: bool,

    // === Blade geometry ===
    pub blade_length: f32,
    pub blade_half_width: f32,
    /// Playability padding added to each side of the hit polygon
    pub blade_margin: f32,
    /// Share of the saber tilt carried into the deflected heading, [0, 1)
    pub tilt_influence: f32,

    // === Shots ===
    pub shot_width: f32,
    /// Ticks a shot may be missing from the render registry before a warning
    pub stale_grace_ticks: u32,

    // === Rules ===
    pub side_exit: SideExitPolicy,
    pub damage_policy: DamagePolicy,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            saber_damping_ms: SABER_DAMPING_MS,
            saber_decay_ms: SABER_DECAY_MS,

            damping: SABER_DAMPING,
            tilt_decay: TILT_DECAY,
            tilt_snap_degrees: TILT_SNAP_DEGREES,
            idle_window_ms: POINTER_IDLE_MS,
            tilt_sensitivity: TILT_SENSITIVITY,
            max_tilt_degrees: MAX_TILT_DEGREES,
            max_tilt_upward_degrees: MAX_TILT_UPWARD_DEGREES,
            upward_tilt_widening: true,

            blade_length: BLADE_LENGTH,
            blade_half_width: BLADE_HALF_WIDTH,
            blade_margin: BLADE_MARGIN,
            tilt_influence: TILT_INFLUENCE,

            shot_width: SHOT_WIDTH,
            stale_grace_ticks: STALE_GRACE_TICKS,

            side_exit: SideExitPolicy::Ignore,
            damage_policy: DamagePolicy::HeadOnly,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every value the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        for (field, value) in [
            ("tick_ms", self.tick_ms),
            ("saber_damping_ms", self.saber_damping_ms),
            ("saber_decay_ms", self.saber_decay_ms),
        ] {
            if value == 0 {
                return Err(TuningError::Zero { field });
            }
        }

        open_unit("damping", self.damping)?;
        open_unit("tilt_decay", self.tilt_decay)?;

        if !(0.0..1.0).contains(&self.tilt_influence) {
            return Err(TuningError::OutOfRange {
                field: "tilt_influence",
                range: "[0, 1)",
                value: self.tilt_influence,
            });
        }

        for (field, value) in [
            ("tilt_snap_degrees", self.tilt_snap_degrees),
            ("tilt_sensitivity", self.tilt_sensitivity),
            ("max_tilt_degrees", self.max_tilt_degrees),
            ("max_tilt_upward_degrees", self.max_tilt_upward_degrees),
            ("blade_length", self.blade_length),
            ("blade_half_width", self.blade_half_width),
            ("blade_margin", self.blade_margin),
            ("shot_width", self.shot_width),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(TuningError::OutOfRange {
                    field,
                    range: "[0, inf)",
                    value,
                });
            }
        }

        Ok(())
    }

    /// Half-width of the hit polygon (visual blade plus margin)
    pub fn hit_half_width(&self) -> f32 {
        self.blade_half_width + self.blade_margin
    }
}

fn open_unit(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(TuningError::OutOfRange {
            field,
            range: "(0, 1)",
            value,
        })
    }
}
