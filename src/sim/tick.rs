//! Per-frame simulation tick
//!
//! Order within a tick: movement, difficulty, spawns, expiry, then
//! collisions. A tick on a terminated session does nothing.

use glam::Vec2;

use super::collision;
use super::kinematics::{is_expired, step_hostile, step_player};
use super::shape::ShapeSet;
use super::spawn;
use super::state::{Session, SessionEvent};

/// Held state of the eight movement keys (arrows plus WASD)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub w: bool,
    pub s: bool,
    pub a: bool,
    pub d: bool,
}

impl MoveKeys {
    /// Unit-per-axis direction. When opposing keys are both held, down and
    /// right win.
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.left || self.a {
            dir.x = -1.0;
        }
        if self.right || self.d {
            dir.x = 1.0;
        }
        if self.up || self.w {
            dir.y = -1.0;
        }
        if self.down || self.s {
            dir.y = 1.0;
        }
        dir
    }

    /// Keys that produce `dir` using the arrow bindings
    pub fn from_direction(dir: Vec2) -> Self {
        Self {
            up: dir.y < 0.0,
            down: dir.y > 0.0,
            left: dir.x < 0.0,
            right: dir.x > 0.0,
            ..Default::default()
        }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub keys: MoveKeys,
    /// Leave the game (handled by the lifecycle, not the tick)
    pub quit: bool,
    /// Replay requested; only polled while terminated
    pub restart: bool,
}

/// Advance a running session by one frame of `dt_ms` milliseconds,
/// accumulating the session clock from frame deltas
pub fn tick(session: &mut Session, input: &TickInput, dt_ms: f64, shapes: &ShapeSet) {
    let elapsed_ms = session.elapsed_ms + dt_ms;
    tick_at(session, input, dt_ms, elapsed_ms, shapes);
}

/// Advance a running session by one frame
///
/// `dt_ms` drives the spawn and difficulty timers. `elapsed_ms` is the time
/// since the session started as measured by the caller's clock and becomes
/// the session's score; it never moves backwards.
pub fn tick_at(
    session: &mut Session,
    input: &TickInput,
    dt_ms: f64,
    elapsed_ms: f64,
    shapes: &ShapeSet,
) {
    session.events.clear();
    if !session.is_running() {
        return;
    }

    session.time_ticks += 1;
    session.elapsed_ms = session.elapsed_ms.max(elapsed_ms);

    // Entities spawned below first move on the next tick
    step_player(&mut session.player, input.keys.direction(), &session.tuning);
    let player_center = session.player.center();
    for hostile in &mut session.hostiles {
        step_hostile(hostile, player_center);
    }

    // Difficulty only affects future spawns
    if session.difficulty.advance(dt_ms) {
        session.zombie_timer.tighten();
        session.meteorite_timer.tighten();
        session.events.push(SessionEvent::DifficultyRaised {
            level: session.difficulty.level,
            zombie_interval_ms: session.zombie_timer.interval_ms,
            meteorite_interval_ms: session.meteorite_timer.interval_ms,
        });
    }

    if session.zombie_timer.advance(dt_ms) {
        let id = session.next_entity_id();
        let (rng, tuning) = session.rng_and_tuning();
        let zombie = spawn::zombie(id, rng, tuning);
        session.insert_hostile(zombie);
    }

    if session.meteorite_timer.advance(dt_ms) {
        let id = session.next_entity_id();
        let (rng, tuning) = session.rng_and_tuning();
        let trajectory = spawn::random_trajectory(rng);
        let meteorite = spawn::meteorite(id, trajectory, rng, tuning);
        session.insert_hostile(meteorite);
    }

    let tuning = &session.tuning;
    let events = &mut session.events;
    session.hostiles.retain(|e| {
        let expired = is_expired(e, tuning);
        if expired {
            events.push(SessionEvent::Despawned { id: e.id });
        }
        !expired
    });

    let report = collision::detect(&session.player, &session.hostiles, shapes);
    for id in &report.meteorite_hits {
        session.remove_hostile(*id);
        session.events.push(SessionEvent::MeteoriteImpact { id: *id });
    }
    if !report.zombie_hits.is_empty() {
        session.events.push(SessionEvent::Caught {
            zombie_ids: report.zombie_hits.clone(),
        });
    }
    if report.is_lethal() {
        session.terminate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_MS;
    use crate::sim::entity::{Category, Entity, EntityKind, Trajectory};
    use crate::sim::geom::Rect;
    use crate::sim::state::SessionPhase;
    use crate::tuning::Tuning;

    fn session() -> Session {
        Session::new(12345, Tuning::default())
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    fn add(session: &mut Session, kind: EntityKind, rect: Rect, vel: Vec2) -> u32 {
        let id = session.next_entity_id();
        session.insert_hostile(Entity::new(id, kind, rect, vel));
        id
    }

    #[test]
    fn test_move_keys() {
        let keys = MoveKeys {
            w: true,
            d: true,
            ..Default::default()
        };
        assert_eq!(keys.direction(), Vec2::new(1.0, -1.0));

        let opposing = MoveKeys {
            left: true,
            right: true,
            up: true,
            s: true,
            ..Default::default()
        };
        assert_eq!(opposing.direction(), Vec2::new(1.0, 1.0));
        assert_eq!(MoveKeys::from_direction(Vec2::new(-1.0, 0.0)).direction(), Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_straight_zombie_scenario() {
        // Enters at the top edge with speed 2 and no jitter
        let mut s = session();
        let start = Vec2::new(600.0, -30.0);
        let id = add(
            &mut s,
            EntityKind::StraightZombie,
            Rect::new(start, Vec2::splat(30.0)),
            Vec2::new(0.0, 2.0),
        );
        for n in 1..=60 {
            tick(&mut s, &idle(), FRAME_MS, &ShapeSet::bounding_boxes());
            let z = s.hostile(id).unwrap();
            assert_eq!(z.rect.pos.y, start.y + 2.0 * n as f32);
            assert_eq!(z.rect.pos.x, start.x);
            assert_eq!(z.vel, Vec2::new(0.0, 2.0));
        }
        assert!(s.is_running());
    }

    #[test]
    fn test_tracking_zombie_scenario() {
        let mut s = session();
        s.player.rect = Rect::from_center(Vec2::new(100.0, 100.0), s.tuning.player_size);
        let id = add(
            &mut s,
            EntityKind::TrackingZombie { speed: 1.8 },
            Rect::from_center(Vec2::new(100.0, 200.0), Vec2::splat(30.0)),
            Vec2::ZERO,
        );
        tick(&mut s, &idle(), FRAME_MS, &ShapeSet::bounding_boxes());
        let z = s.hostile(id).unwrap();
        assert!((z.center().y - (200.0 - 1.8)).abs() < 1e-4);
        assert_eq!(z.center().x, 100.0);
    }

    #[test]
    fn test_meteorite_and_zombie_same_tick() {
        let mut s = session();
        let player_pos = s.player.rect.pos;
        let meteor = add(
            &mut s,
            EntityKind::Meteorite { trajectory: Trajectory::Straight },
            Rect::new(player_pos - Vec2::new(10.0, 30.0), Vec2::splat(60.0)),
            Vec2::new(0.0, 2.0),
        );
        let zombie = add(
            &mut s,
            EntityKind::StraightZombie,
            Rect::new(player_pos + Vec2::new(20.0, 0.0), Vec2::splat(30.0)),
            Vec2::new(-1.0, 0.0),
        );

        s.elapsed_ms = 4200.0;
        tick(&mut s, &idle(), FRAME_MS, &ShapeSet::bounding_boxes());
        assert_eq!(s.phase, SessionPhase::Terminated);
        assert_eq!(s.final_score_ms, Some(4200.0 + FRAME_MS));
        assert!(s.hostile(meteor).is_none());
        assert!(s.hostile(zombie).is_some());
        assert!(s.events.contains(&SessionEvent::MeteoriteImpact { id: meteor }));
        assert!(s.events.contains(&SessionEvent::Caught { zombie_ids: vec![zombie] }));

        // Terminated sessions are frozen
        let zombie_pos = s.hostile(zombie).unwrap().rect.pos;
        tick(&mut s, &idle(), FRAME_MS, &ShapeSet::bounding_boxes());
        assert!(s.events.is_empty());
        assert_eq!(s.final_score_ms, Some(4200.0 + FRAME_MS));
        assert_eq!(s.elapsed_ms, 4200.0 + FRAME_MS);
        assert_eq!(s.hostile(zombie).unwrap().rect.pos, zombie_pos);
        assert!(s.hostile(meteor).is_none());
    }

    #[test]
    fn test_zombie_contact_keeps_zombie() {
        let mut s = session();
        let player_pos = s.player.rect.pos;
        let zombie = add(
            &mut s,
            EntityKind::TrackingZombie { speed: 1.8 },
            Rect::new(player_pos + Vec2::new(5.0, 5.0), Vec2::splat(30.0)),
            Vec2::ZERO,
        );
        tick(&mut s, &idle(), FRAME_MS, &ShapeSet::bounding_boxes());
        assert_eq!(s.phase, SessionPhase::Terminated);
        assert!(s.hostile(zombie).is_some());
    }

    #[test]
    fn test_spawn_cadence() {
        let mut s = session();
        let shapes = ShapeSet::bounding_boxes();
        let mut zombies = 0;
        let mut meteorites = 0;
        for _ in 0..3600 {
            // Clear the field so nothing can reach the player
            s.hostiles.clear();
            tick(&mut s, &idle(), 1.0, &shapes);
            for event in &s.events {
                if let SessionEvent::Spawned { kind, .. } = event {
                    if kind.category() == Some(Category::Meteorite) {
                        meteorites += 1;
                    } else {
                        zombies += 1;
                    }
                }
            }
        }
        assert!(s.is_running());
        // Zombies at 1501 ms and 3002 ms, one meteorite at 3501 ms
        assert_eq!(zombies, 2);
        assert_eq!(meteorites, 1);
    }

    #[test]
    fn test_difficulty_ramps_intervals() {
        let mut s = session();
        // Keep the session alive regardless of spawns
        let shapes = ShapeSet::bounding_boxes();
        for _ in 0..5001 {
            s.hostiles.clear();
            tick(&mut s, &idle(), 1.0, &shapes);
        }
        assert_eq!(s.difficulty.level, 1);
        assert_eq!(s.zombie_timer.interval_ms, 1460.0);
        assert_eq!(s.meteorite_timer.interval_ms, 3440.0);
    }

    #[test]
    fn test_spawned_hostiles_hold_position_on_spawn_tick() {
        let mut tuning = Tuning::default();
        // One admissible spawn height, and both timers firing on the first tick
        tuning.meteorite_spawn_top = -(tuning.meteorite_size.y + tuning.meteorite_spawn_clearance);
        tuning.zombie_cadence.initial_ms = 0.5;
        tuning.zombie_cadence.floor_ms = 0.5;
        tuning.meteorite_cadence.initial_ms = 0.5;
        tuning.meteorite_cadence.floor_ms = 0.5;
        let mut s = Session::new(7, tuning);
        let shapes = ShapeSet::bounding_boxes();

        tick(&mut s, &idle(), 1.0, &shapes);
        assert_eq!(s.hostiles.len(), 2);

        let meteorite = s.meteorites().next().unwrap().clone();
        assert_eq!(meteorite.rect.pos.y, s.tuning.meteorite_spawn_top);
        assert_ne!(meteorite.vel, Vec2::ZERO);

        let zombie = s.zombies().next().unwrap().clone();
        let (size, bounds) = (s.tuning.zombie_size, s.tuning.screen_size());
        let p = zombie.rect.pos;
        assert!(p.y == -size.y || p.y == bounds.y || p.x == -size.x || p.x == bounds.x);

        // Movement starts on the following tick
        tick(&mut s, &idle(), 1.0, &shapes);
        assert_eq!(
            s.hostile(meteorite.id).unwrap().rect.pos,
            meteorite.rect.pos + meteorite.vel
        );
    }

    #[test]
    fn test_score_follows_caller_clock() {
        let mut s = session();
        let shapes = ShapeSet::bounding_boxes();

        // A stalled frame: timers see the clipped delta, the score sees wall time
        tick_at(&mut s, &idle(), 100.0, 300.0, &shapes);
        assert_eq!(s.elapsed_ms, 300.0);
        assert_eq!(s.score_ms(), 300.0);
        assert_eq!(s.zombie_timer.elapsed_ms, 100.0);
        assert_eq!(s.difficulty.elapsed_ms, 100.0);

        // Never runs backwards
        tick_at(&mut s, &idle(), 16.0, 250.0, &shapes);
        assert_eq!(s.elapsed_ms, 300.0);

        tick(&mut s, &idle(), 20.0, &shapes);
        assert_eq!(s.elapsed_ms, 320.0);
    }

    #[test]
    fn test_difficulty_floor_over_long_session() {
        let mut s = session();
        let shapes = ShapeSet::bounding_boxes();
        for t in 1..=200_000u32 {
            s.hostiles.clear();
            tick(&mut s, &idle(), 1.0, &shapes);

            let level = s.difficulty.level as f64;
            assert_eq!(s.zombie_timer.interval_ms, (1500.0 - 40.0 * level).max(250.0));
            assert_eq!(s.meteorite_timer.interval_ms, (3500.0 - 60.0 * level).max(1000.0));
            assert!(s.zombie_timer.interval_ms >= 250.0);

            // The ramp fires every 5001 ms of 1 ms frames
            match t {
                155_000 => assert_eq!(s.difficulty.level, 30),
                155_031 => {
                    assert_eq!(s.difficulty.level, 31);
                    assert_eq!(s.zombie_timer.interval_ms, 260.0);
                }
                160_032 => {
                    assert_eq!(s.difficulty.level, 32);
                    assert_eq!(s.zombie_timer.interval_ms, 250.0);
                }
                _ => {}
            }
        }
        assert!(s.is_running());
        assert_eq!(s.difficulty.level, 39);
        assert!(s.zombie_timer.at_floor());
    }

    #[test]
    fn test_offscreen_hostiles_removed() {
        let mut s = session();
        let gone = add(
            &mut s,
            EntityKind::StraightZombie,
            Rect::new(Vec2::new(-79.0, 100.0), Vec2::splat(30.0)),
            Vec2::new(-2.0, 0.0),
        );
        let kept = add(
            &mut s,
            EntityKind::TrackingZombie { speed: 1.8 },
            Rect::new(Vec2::new(-170.0, 100.0), Vec2::splat(30.0)),
            Vec2::ZERO,
        );
        tick(&mut s, &idle(), FRAME_MS, &ShapeSet::bounding_boxes());
        assert!(s.hostile(gone).is_none());
        assert!(s.hostile(kept).is_some());
        assert!(s.events.contains(&SessionEvent::Despawned { id: gone }));
    }

    #[test]
    fn test_determinism() {
        let mut a = Session::new(99999, Tuning::default());
        let mut b = Session::new(99999, Tuning::default());
        let shapes = ShapeSet::bounding_boxes();
        let inputs = [
            TickInput::default(),
            TickInput {
                keys: MoveKeys { left: true, ..Default::default() },
                ..Default::default()
            },
            TickInput {
                keys: MoveKeys { s: true, d: true, ..Default::default() },
                ..Default::default()
            },
        ];

        for i in 0..1200 {
            let input = &inputs[i % inputs.len()];
            tick(&mut a, input, FRAME_MS, &shapes);
            tick(&mut b, input, FRAME_MS, &shapes);
        }

        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
