//! Player versus hostile collision detection
//!
//! Zombies are lethal but persist. Meteorites are lethal and consumed on
//! contact.

use super::entity::Entity;
use super::shape::{ShapeSet, overlaps};

/// Result of one frame's collision scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Zombies touching the player
    pub zombie_hits: Vec<u32>,
    /// Meteorites touching the player (to be removed)
    pub meteorite_hits: Vec<u32>,
}

impl CollisionReport {
    /// Any contact ends the session
    pub fn is_lethal(&self) -> bool {
        !self.zombie_hits.is_empty() || !self.meteorite_hits.is_empty()
    }
}

/// Whether two entities' opaque regions overlap
pub fn entities_touch(a: &Entity, b: &Entity, shapes: &ShapeSet) -> bool {
    overlaps(
        &a.rect,
        shapes.get(a.kind.sprite()),
        &b.rect,
        shapes.get(b.kind.sprite()),
    )
}

/// Scan every hostile against the player
pub fn detect(player: &Entity, hostiles: &[Entity], shapes: &ShapeSet) -> CollisionReport {
    let mut report = CollisionReport::default();
    for hostile in hostiles {
        if !entities_touch(player, hostile, shapes) {
            continue;
        }
        if hostile.is_zombie() {
            report.zombie_hits.push(hostile.id);
        } else if hostile.is_meteorite() {
            report.meteorite_hits.push(hostile.id);
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{EntityKind, SpriteId, Trajectory};
    use crate::sim::geom::Rect;
    use crate::sim::shape::{Shape, ShapeProvider};
    use crate::tuning::Tuning;
    use glam::Vec2;
    use std::collections::HashMap;

    fn entity(id: u32, kind: EntityKind, x: f32, y: f32, size: f32) -> Entity {
        Entity::new(id, kind, Rect::new(Vec2::new(x, y), Vec2::splat(size)), Vec2::ZERO)
    }

    fn player() -> Entity {
        entity(0, EntityKind::Player, 100.0, 100.0, 40.0)
    }

    #[test]
    fn test_no_contact() {
        let hostiles = vec![
            entity(1, EntityKind::StraightZombie, 300.0, 300.0, 30.0),
            entity(2, EntityKind::Meteorite { trajectory: Trajectory::Straight }, 140.0, 100.0, 60.0),
        ];
        let report = detect(&player(), &hostiles, &ShapeSet::bounding_boxes());
        assert!(!report.is_lethal());
    }

    #[test]
    fn test_sorts_hits_by_category() {
        let hostiles = vec![
            entity(1, EntityKind::StraightZombie, 120.0, 120.0, 30.0),
            entity(2, EntityKind::TrackingZombie { speed: 1.8 }, 500.0, 500.0, 30.0),
            entity(3, EntityKind::Meteorite { trajectory: Trajectory::DiagonalLeft }, 90.0, 50.0, 60.0),
            entity(4, EntityKind::TrackingZombie { speed: 1.8 }, 80.0, 80.0, 30.0),
        ];
        let report = detect(&player(), &hostiles, &ShapeSet::bounding_boxes());
        assert!(report.is_lethal());
        assert_eq!(report.zombie_hits, vec![1, 4]);
        assert_eq!(report.meteorite_hits, vec![3]);
    }

    #[test]
    fn test_masks_refine_contact() {
        let mut provided: HashMap<SpriteId, Shape> = HashMap::new();
        provided.insert(SpriteId::Player, Shape::disc(40, 40));
        provided.insert(SpriteId::StraightZombie, Shape::disc(30, 30));
        let shapes = ShapeSet::resolve(&provided as &dyn ShapeProvider, &Tuning::default());

        // Corner-to-corner: boxes overlap, discs do not
        let corner = vec![entity(1, EntityKind::StraightZombie, 136.0, 136.0, 30.0)];
        assert!(detect(&player(), &corner, &ShapeSet::bounding_boxes()).is_lethal());
        assert!(!detect(&player(), &corner, &shapes).is_lethal());

        // Tracking zombies have no mask here, so their box is used against the disc
        let head_on = vec![entity(2, EntityKind::TrackingZombie { speed: 1.8 }, 130.0, 105.0, 30.0)];
        assert!(detect(&player(), &head_on, &shapes).is_lethal());
    }
}
