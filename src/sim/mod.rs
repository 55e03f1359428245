//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame time comes in as a parameter, never from a global clock
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, asset decoding or input polling

pub mod collision;
pub mod difficulty;
pub mod entity;
pub mod facing;
pub mod geom;
pub mod kinematics;
pub mod shape;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{CollisionReport, detect};
pub use difficulty::{DifficultyRamp, SpawnTimer};
pub use entity::{Category, Entity, EntityKind, SpriteId, Trajectory};
pub use facing::Facing;
pub use geom::Rect;
pub use shape::{NoShapes, Shape, ShapeProvider, ShapeSet};
pub use state::{Session, SessionEvent, SessionPhase};
pub use tick::{MoveKeys, TickInput, tick, tick_at};
