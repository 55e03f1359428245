//! Per-variant movement rules
//!
//! Velocities are displacements per tick. Everything here is pure with
//! respect to the session: callers pass the player's position in and get
//! updated entities back.

use glam::Vec2;

use super::entity::{Entity, EntityKind};
use super::facing::Facing;
use crate::direction_to;
use crate::tuning::Tuning;

/// Move the player along `dir` (each component in -1, 0 or 1) and keep it on screen
pub fn step_player(player: &mut Entity, dir: Vec2, tuning: &Tuning) {
    player.vel = dir * tuning.player_speed;
    player.facing = Facing::from_input(dir, player.facing);
    player.rect.pos += player.vel;
    player.rect.clamp_within(tuning.screen_size());
}

/// Pursuit steering: `speed` toward `target`, zero when already there
#[inline]
pub fn pursuit_velocity(from: Vec2, target: Vec2, speed: f32) -> Vec2 {
    direction_to(from, target) * speed
}

/// Advance one hostile entity by a tick
pub fn step_hostile(entity: &mut Entity, player_center: Vec2) {
    match entity.kind {
        EntityKind::Player => {}
        EntityKind::StraightZombie => {
            entity.rect.pos += entity.vel;
        }
        EntityKind::TrackingZombie { speed } => {
            entity.vel = pursuit_velocity(entity.center(), player_center, speed);
            entity.rect.pos += entity.vel;
            entity.facing = Facing::from_velocity(entity.vel, entity.facing);
        }
        EntityKind::Meteorite { .. } => {
            entity.rect.pos += entity.vel;
        }
    }
}

/// Whether a hostile has left the play area for good
pub fn is_expired(entity: &Entity, tuning: &Tuning) -> bool {
    let bounds = tuning.screen_size();
    match entity.kind {
        EntityKind::Player => false,
        EntityKind::StraightZombie => entity.rect.is_beyond(bounds, tuning.straight_zombie_margin),
        EntityKind::TrackingZombie { .. } => {
            entity.rect.is_beyond(bounds, tuning.tracking_zombie_margin)
        }
        // Meteorites start above the screen, so only the bottom and sides count
        EntityKind::Meteorite { .. } => {
            let margin = tuning.meteorite_margin;
            entity.rect.top() > bounds.y + margin
                || entity.rect.right() < -margin
                || entity.rect.left() > bounds.x + margin
        }
    }
}
