//! Session state and core simulation types
//!
//! Everything a running session owns lives here, so a session can be
//! snapshotted and two sessions with the same seed compared tick for tick.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::{DifficultyRamp, SpawnTimer};
use super::entity::{Category, Entity, EntityKind};
use super::geom::Rect;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Active gameplay
    Running,
    /// Player was caught; score frozen
    Terminated,
}

/// Things that happened during a tick, drained by the lifecycle layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    Spawned { id: u32, kind: EntityKind },
    Despawned { id: u32 },
    DifficultyRaised {
        level: u32,
        zombie_interval_ms: f64,
        meteorite_interval_ms: f64,
    },
    MeteoriteImpact { id: u32 },
    Caught { zombie_ids: Vec<u32> },
    Terminated { final_score_ms: f64 },
}

/// One play session from spawn to game over
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub tuning: Tuning,
    pub phase: SessionPhase,
    /// Simulated time since the session started (ms)
    pub elapsed_ms: f64,
    /// Set exactly once, on termination
    pub final_score_ms: Option<f64>,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Entity,
    /// Live hostiles in spawn order
    pub hostiles: Vec<Entity>,
    pub zombie_timer: SpawnTimer,
    pub meteorite_timer: SpawnTimer,
    pub difficulty: DifficultyRamp,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<SessionEvent>,
    next_id: u32,
}

impl Session {
    /// Fresh session: player centred, no hostiles, timers at zero
    ///
    /// `tuning` must pass [`Tuning::validate`]; empty spawn ranges panic on
    /// the first spawn.
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        debug_assert!(tuning.validate().is_ok(), "session built from invalid tuning");
        let player_rect = Rect::from_center(tuning.screen_size() / 2.0, tuning.player_size);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: SessionPhase::Running,
            elapsed_ms: 0.0,
            final_score_ms: None,
            time_ticks: 0,
            player: Entity::new(0, EntityKind::Player, player_rect, Vec2::ZERO),
            hostiles: Vec::new(),
            zombie_timer: SpawnTimer::new(tuning.zombie_cadence),
            meteorite_timer: SpawnTimer::new(tuning.meteorite_cadence),
            difficulty: DifficultyRamp::new(tuning.difficulty_interval_ms),
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Session RNG and tuning, borrowed together for the spawn factories
    pub(crate) fn rng_and_tuning(&mut self) -> (&mut Pcg32, &Tuning) {
        (&mut self.rng, &self.tuning)
    }

    /// Add a hostile; it is live from this tick on
    pub fn insert_hostile(&mut self, entity: Entity) {
        debug_assert!(entity.category().is_some(), "player cannot be inserted as a hostile");
        self.events.push(SessionEvent::Spawned {
            id: entity.id,
            kind: entity.kind,
        });
        self.hostiles.push(entity);
    }

    /// Remove a hostile by ID; returns it if it was live
    pub fn remove_hostile(&mut self, id: u32) -> Option<Entity> {
        let idx = self.hostiles.iter().position(|e| e.id == id)?;
        Some(self.hostiles.remove(idx))
    }

    pub fn hostile(&self, id: u32) -> Option<&Entity> {
        self.hostiles.iter().find(|e| e.id == id)
    }

    /// Hostiles of one category
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Entity> {
        self.hostiles
            .iter()
            .filter(move |e| e.category() == Some(category))
    }

    pub fn zombies(&self) -> impl Iterator<Item = &Entity> {
        self.by_category(Category::Zombie)
    }

    pub fn meteorites(&self) -> impl Iterator<Item = &Entity> {
        self.by_category(Category::Meteorite)
    }

    /// Player first, then hostiles in spawn order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        std::iter::once(&self.player).chain(self.hostiles.iter())
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    /// Live score while running, frozen score afterwards
    pub fn score_ms(&self) -> f64 {
        self.final_score_ms.unwrap_or(self.elapsed_ms)
    }

    /// Running -> Terminated, once; later calls are ignored
    pub(crate) fn terminate(&mut self) -> bool {
        if self.phase != SessionPhase::Running {
            return false;
        }
        self.phase = SessionPhase::Terminated;
        self.final_score_ms = Some(self.elapsed_ms);
        self.events.push(SessionEvent::Terminated {
            final_score_ms: self.elapsed_ms,
        });
        true
    }
}
