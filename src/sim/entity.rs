//! Entity representation
//!
//! One struct for every variant: a kind tag carrying the variant-specific
//! fields plus the shared kinematic state. Behaviour is dispatched on the
//! tag in `kinematics`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::facing::Facing;
use super::geom::Rect;

/// Meteorite fall path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trajectory {
    /// Nearly vertical with a small random drift
    Straight,
    /// Drifts left proportionally to fall speed
    DiagonalLeft,
    /// Drifts right proportionally to fall speed
    DiagonalRight,
}

impl Trajectory {
    pub const ALL: [Trajectory; 3] = [
        Trajectory::Straight,
        Trajectory::DiagonalLeft,
        Trajectory::DiagonalRight,
    ];
}

/// Entity variant tag with its variant-specific data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    /// Velocity fixed at spawn
    StraightZombie,
    /// Re-aims at the player every tick
    TrackingZombie { speed: f32 },
    Meteorite { trajectory: Trajectory },
}

/// Hostile spawn/collision category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Zombie,
    Meteorite,
}

/// Key for looking up a collidable shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteId {
    Player,
    StraightZombie,
    TrackingZombie,
    Meteorite(Trajectory),
}

impl SpriteId {
    pub const ALL: [SpriteId; 6] = [
        SpriteId::Player,
        SpriteId::StraightZombie,
        SpriteId::TrackingZombie,
        SpriteId::Meteorite(Trajectory::Straight),
        SpriteId::Meteorite(Trajectory::DiagonalLeft),
        SpriteId::Meteorite(Trajectory::DiagonalRight),
    ];
}

impl EntityKind {
    /// `None` for the player
    pub fn category(&self) -> Option<Category> {
        match self {
            EntityKind::Player => None,
            EntityKind::StraightZombie | EntityKind::TrackingZombie { .. } => Some(Category::Zombie),
            EntityKind::Meteorite { .. } => Some(Category::Meteorite),
        }
    }

    pub fn sprite(&self) -> SpriteId {
        match *self {
            EntityKind::Player => SpriteId::Player,
            EntityKind::StraightZombie => SpriteId::StraightZombie,
            EntityKind::TrackingZombie { .. } => SpriteId::TrackingZombie,
            EntityKind::Meteorite { trajectory } => SpriteId::Meteorite(trajectory),
        }
    }
}

/// A live entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    /// Bounding box (top-left origin)
    pub rect: Rect,
    /// Displacement per tick
    pub vel: Vec2,
    pub facing: Facing,
}

impl Entity {
    pub fn new(id: u32, kind: EntityKind, rect: Rect, vel: Vec2) -> Self {
        let facing = match kind {
            EntityKind::StraightZombie => Facing::from_velocity(vel, Facing::default()),
            _ => Facing::default(),
        };
        Self {
            id,
            kind,
            rect,
            vel,
            facing,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    #[inline]
    pub fn category(&self) -> Option<Category> {
        self.kind.category()
    }

    #[inline]
    pub fn is_zombie(&self) -> bool {
        self.category() == Some(Category::Zombie)
    }

    #[inline]
    pub fn is_meteorite(&self) -> bool {
        self.category() == Some(Category::Meteorite)
    }
}
