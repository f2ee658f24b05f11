//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Virtual millisecond clock only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod damage;
pub mod polygon;
pub mod saber;
pub mod session;
pub mod signal;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::{BladeContact, BoundsCheck, deflect_heading};
pub use damage::{Damage, DamageOutcome, DamagePolicy};
pub use polygon::HitPolygon;
pub use saber::{PointerSample, Saber};
pub use session::Session;
pub use signal::{Control, Signal};
pub use spawn::SpawnPlan;
pub use state::{ArenaBounds, BodyPart, GameEvent, GamePhase, Projectile, ProjectileId, Rect};
pub use tick::{RenderRegistry, TickInput, TickReport, tick};
pub use timer::FrameClock;
