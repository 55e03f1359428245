//! Hostile entity factories
//!
//! Each factory samples the variant's initial placement and velocity from
//! the session RNG. Zombies enter from a random screen edge, meteorites
//! from above the top edge.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind, Trajectory};
use super::geom::Rect;
use crate::tuning::Tuning;

/// Screen edge a zombie enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];

    /// Unit vector pointing into the screen
    pub fn inward(&self) -> Vec2 {
        match self {
            Edge::Top => Vec2::Y,
            Edge::Bottom => Vec2::NEG_Y,
            Edge::Left => Vec2::X,
            Edge::Right => Vec2::NEG_X,
        }
    }

    pub fn random(rng: &mut impl Rng) -> Edge {
        Edge::ALL[rng.random_range(0..Edge::ALL.len())]
    }
}

/// Top-left position just outside `edge`, uniformly along it
pub fn edge_position(edge: Edge, size: Vec2, rng: &mut impl Rng, tuning: &Tuning) -> Vec2 {
    let bounds = tuning.screen_size();
    match edge {
        Edge::Top => Vec2::new(rng.random_range(0.0..=bounds.x - size.x), -size.y),
        Edge::Bottom => Vec2::new(rng.random_range(0.0..=bounds.x - size.x), bounds.y),
        Edge::Left => Vec2::new(-size.x, rng.random_range(0.0..=bounds.y - size.y)),
        Edge::Right => Vec2::new(bounds.x, rng.random_range(0.0..=bounds.y - size.y)),
    }
}

/// Velocity for a straight zombie entering from `edge`
///
/// `speed` along the inward axis plus `jitter * speed` on the cross axis.
pub fn straight_velocity(edge: Edge, speed: f32, jitter: f32) -> Vec2 {
    let inward = edge.inward();
    let cross = inward.perp();
    inward * speed + cross * (jitter * speed)
}

/// Straight-line zombie with a velocity fixed for its lifetime
pub fn straight_zombie(id: u32, rng: &mut impl Rng, tuning: &Tuning) -> Entity {
    let edge = Edge::random(rng);
    let speed = rng.random_range(tuning.zombie_speed_range());
    let jitter = rng.random_range(-tuning.zombie_jitter..=tuning.zombie_jitter);
    let pos = edge_position(edge, tuning.zombie_size, rng, tuning);
    Entity::new(
        id,
        EntityKind::StraightZombie,
        Rect::new(pos, tuning.zombie_size),
        straight_velocity(edge, speed, jitter),
    )
}

/// Zombie that steers toward the player every tick
pub fn tracking_zombie(id: u32, rng: &mut impl Rng, tuning: &Tuning) -> Entity {
    let edge = Edge::random(rng);
    let pos = edge_position(edge, tuning.zombie_size, rng, tuning);
    Entity::new(
        id,
        EntityKind::TrackingZombie {
            speed: tuning.tracking_speed,
        },
        Rect::new(pos, tuning.zombie_size),
        Vec2::ZERO,
    )
}

/// Roll the zombie variant, then build it
pub fn zombie(id: u32, rng: &mut impl Rng, tuning: &Tuning) -> Entity {
    if rng.random_bool(tuning.tracking_chance) {
        tracking_zombie(id, rng, tuning)
    } else {
        straight_zombie(id, rng, tuning)
    }
}

/// Meteorite velocity for a fall speed and trajectory
pub fn meteorite_velocity(trajectory: Trajectory, fall_speed: f32, rng: &mut impl Rng, tuning: &Tuning) -> Vec2 {
    let dx = match trajectory {
        Trajectory::Straight => {
            let drift = tuning.meteorite_straight_drift;
            rng.random_range(-drift..=drift)
        }
        Trajectory::DiagonalLeft => -rng.random_range(tuning.diag_factor_range()) * fall_speed,
        Trajectory::DiagonalRight => rng.random_range(tuning.diag_factor_range()) * fall_speed,
    };
    Vec2::new(dx, fall_speed)
}

/// Meteorite spawned above the screen so it falls into view
pub fn meteorite(id: u32, trajectory: Trajectory, rng: &mut impl Rng, tuning: &Tuning) -> Entity {
    let size = tuning.meteorite_size;
    let x = rng.random_range(0.0..=tuning.screen_width - size.x);
    let y = rng.random_range(
        tuning.meteorite_spawn_top..=-(size.y + tuning.meteorite_spawn_clearance),
    );
    let fall_speed = rng.random_range(tuning.meteorite_speed_range());
    let vel = meteorite_velocity(trajectory, fall_speed, rng, tuning);
    Entity::new(
        id,
        EntityKind::Meteorite { trajectory },
        Rect::new(Vec2::new(x, y), size),
        vel,
    )
}

/// Uniform trajectory pick
pub fn random_trajectory(rng: &mut impl Rng) -> Trajectory {
    Trajectory::ALL[rng.random_range(0..Trajectory::ALL.len())]
}
