//! Directional sprite state
//!
//! Which of four static orientations an entity displays. Derived from
//! velocity (or raw input for the player) and never fed back into
//! kinematics or collision.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Displayed orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    North,
    #[default]
    South,
    East,
    West,
}

impl Facing {
    /// Dominant axis wins; ties (including standing still) keep `previous`
    pub fn from_velocity(vel: Vec2, previous: Facing) -> Facing {
        let (ax, ay) = (vel.x.abs(), vel.y.abs());
        if ay > ax {
            if vel.y > 0.0 { Facing::South } else { Facing::North }
        } else if ax > ay {
            if vel.x > 0.0 { Facing::East } else { Facing::West }
        } else {
            previous
        }
    }

    /// Player rule: any vertical input decides, horizontal only when no vertical input
    pub fn from_input(dir: Vec2, previous: Facing) -> Facing {
        if dir.y < 0.0 {
            Facing::North
        } else if dir.y > 0.0 {
            Facing::South
        } else if dir.x < 0.0 {
            Facing::West
        } else if dir.x > 0.0 {
            Facing::East
        } else {
            previous
        }
    }
}
