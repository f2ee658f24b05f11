//! Simulation state types
//!
//! Shots, arena bounds, phases, damage zones and the events the shell reads.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::heading_vector;

/// Current phase of play, driven by the shell except for GameOver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Choosing a difficulty, nothing spawns
    #[default]
    Selecting,
    /// Active gameplay
    Playing,
    /// Run ended
    GameOver,
}

/// Identifier of a live shot, unique within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProjectileId(pub u32);

impl std::fmt::Display for ProjectileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "shot-{}", self.0)
    }
}

/// A blaster shot in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: ProjectileId,
    /// Center of the shot
    pub pos: Vec2,
    /// Direction of travel (radians, y grows downward)
    pub heading: f32,
    /// Has bounced off the saber at least once
    pub deflected: bool,
    /// Ticks since spawn
    #[serde(default)]
    pub age_ticks: u32,
    /// Center was inside the blade polygon last tick (hits register on entry)
    #[serde(default)]
    pub inside_blade: bool,
    /// Already warned about a missing render handle
    #[serde(skip)]
    pub stale_warned: bool,
}

impl Projectile {
    pub fn new(id: ProjectileId, pos: Vec2, heading: f32) -> Self {
        Self {
            id,
            pos,
            heading,
            deflected: false,
            age_ticks: 0,
            inside_blade: false,
            stale_warned: false,
        }
    }

    /// Advance one tick along the current heading
    pub fn integrate(&mut self, speed: f32) {
        self.pos += heading_vector(self.heading) * speed;
        self.age_ticks = self.age_ticks.saturating_add(1);
    }
}

/// Play surface size. Zero in either dimension means not yet measured.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ArenaBounds {
    pub width: f32,
    pub height: f32,
}

impl ArenaBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Bounds usable for spawning and bounds checks
    pub fn is_known(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Axis-aligned rectangle reported by the renderer for a shot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self {
            min,
            max: min + size,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}

/// Body regions a missed shot can strike
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BodyPart {
    Head,
    Torso,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl BodyPart {
    pub const ALL: [BodyPart; 6] = [
        BodyPart::Head,
        BodyPart::Torso,
        BodyPart::LeftArm,
        BodyPart::RightArm,
        BodyPart::LeftLeg,
        BodyPart::RightLeg,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BodyPart::Head => "Head",
            BodyPart::Torso => "Torso",
            BodyPart::LeftArm => "LeftArm",
            BodyPart::RightArm => "RightArm",
            BodyPart::LeftLeg => "LeftLeg",
            BodyPart::RightLeg => "RightLeg",
        }
    }
}

impl std::fmt::Display for BodyPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notifications for the shell (sound, flashes, HUD)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { id: ProjectileId },
    Deflected { id: ProjectileId, score: u64 },
    Missed { id: ProjectileId },
    ZoneHit { zone: BodyPart },
    GameOver { zone: BodyPart },
    PhaseChanged { phase: GamePhase },
}
