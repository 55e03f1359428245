//! Data-driven game balance
//!
//! Every gameplay constant lives here so a session can be replayed or
//! rebalanced from a JSON file without recompiling.

use std::ops::RangeInclusive;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse tuning file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning: {field} {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Interval schedule for one spawn category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnCadence {
    /// Interval at session start (ms)
    pub initial_ms: f64,
    /// Amount removed per difficulty ramp (ms)
    pub decrement_ms: f64,
    /// Interval never drops below this (ms)
    pub floor_ms: f64,
}

/// Gameplay balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Player ===
    pub player_size: Vec2,
    /// Displacement per frame per held axis
    pub player_speed: f32,

    // === Zombies ===
    pub zombie_size: Vec2,
    pub zombie_min_speed: f32,
    pub zombie_max_speed: f32,
    /// Cross-axis jitter as a fraction of speed
    pub zombie_jitter: f32,
    pub tracking_speed: f32,
    /// Probability that a zombie spawn produces a tracking zombie
    pub tracking_chance: f64,
    pub straight_zombie_margin: f32,
    pub tracking_zombie_margin: f32,

    // === Meteorites ===
    pub meteorite_size: Vec2,
    pub meteorite_min_speed: f32,
    pub meteorite_max_speed: f32,
    pub meteorite_diag_factor_min: f32,
    pub meteorite_diag_factor_max: f32,
    pub meteorite_straight_drift: f32,
    pub meteorite_spawn_top: f32,
    pub meteorite_spawn_clearance: f32,
    pub meteorite_margin: f32,

    // === Pacing ===
    pub zombie_cadence: SpawnCadence,
    pub meteorite_cadence: SpawnCadence,
    pub difficulty_interval_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            player_size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            player_speed: PLAYER_SPEED,

            zombie_size: Vec2::new(ZOMBIE_WIDTH, ZOMBIE_HEIGHT),
            zombie_min_speed: ZOMBIE_MIN_SPEED,
            zombie_max_speed: ZOMBIE_MAX_SPEED,
            zombie_jitter: ZOMBIE_JITTER,
            tracking_speed: TRACKING_ZOMBIE_SPEED,
            tracking_chance: TRACKING_ZOMBIE_CHANCE,
            straight_zombie_margin: STRAIGHT_ZOMBIE_MARGIN,
            tracking_zombie_margin: TRACKING_ZOMBIE_MARGIN,

            meteorite_size: Vec2::new(METEORITE_WIDTH, METEORITE_HEIGHT),
            meteorite_min_speed: METEORITE_MIN_SPEED,
            meteorite_max_speed: METEORITE_MAX_SPEED,
            meteorite_diag_factor_min: METEORITE_DIAG_FACTOR_MIN,
            meteorite_diag_factor_max: METEORITE_DIAG_FACTOR_MAX,
            meteorite_straight_drift: METEORITE_STRAIGHT_DRIFT,
            meteorite_spawn_top: METEORITE_SPAWN_TOP,
            meteorite_spawn_clearance: METEORITE_SPAWN_CLEARANCE,
            meteorite_margin: METEORITE_MARGIN,

            zombie_cadence: SpawnCadence {
                initial_ms: ZOMBIE_SPAWN_INTERVAL_MS,
                decrement_ms: ZOMBIE_SPAWN_DECREMENT_MS,
                floor_ms: ZOMBIE_SPAWN_FLOOR_MS,
            },
            meteorite_cadence: SpawnCadence {
                initial_ms: METEORITE_SPAWN_INTERVAL_MS,
                decrement_ms: METEORITE_SPAWN_DECREMENT_MS,
                floor_ms: METEORITE_SPAWN_FLOOR_MS,
            },
            difficulty_interval_ms: DIFFICULTY_RAMP_INTERVAL_MS,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning document
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a tuning file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Visible area size
    #[inline]
    pub fn screen_size(&self) -> Vec2 {
        Vec2::new(self.screen_width, self.screen_height)
    }

    /// Reject values that would break sampling or the interval invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("screen_width", self.screen_width as f64)?;
        positive("screen_height", self.screen_height as f64)?;
        positive("player_speed", self.player_speed as f64)?;
        positive("tracking_speed", self.tracking_speed as f64)?;
        positive("difficulty_interval_ms", self.difficulty_interval_ms)?;

        for (field, size) in [
            ("player_size", self.player_size),
            ("zombie_size", self.zombie_size),
            ("meteorite_size", self.meteorite_size),
        ] {
            if size.x <= 0.0 || size.y <= 0.0 {
                return Err(invalid(field, format!("must be positive, got {size}")));
            }
            if size.x > self.screen_width || size.y > self.screen_height {
                return Err(invalid(field, format!("{size} does not fit on screen")));
            }
        }

        ordered("zombie speed", self.zombie_min_speed, self.zombie_max_speed)?;
        ordered("meteorite speed", self.meteorite_min_speed, self.meteorite_max_speed)?;
        ordered(
            "meteorite diagonal factor",
            self.meteorite_diag_factor_min,
            self.meteorite_diag_factor_max,
        )?;
        ordered(
            "meteorite spawn height",
            self.meteorite_spawn_top,
            -(self.meteorite_size.y + self.meteorite_spawn_clearance),
        )?;

        if self.zombie_min_speed <= 0.0 || self.meteorite_min_speed <= 0.0 {
            return Err(invalid("min speed", "must be positive".to_string()));
        }
        if self.zombie_jitter < 0.0 || self.meteorite_straight_drift < 0.0 {
            return Err(invalid("jitter/drift", "must not be negative".to_string()));
        }
        if !(0.0..=1.0).contains(&self.tracking_chance) {
            return Err(invalid(
                "tracking_chance",
                format!("must be within [0, 1], got {}", self.tracking_chance),
            ));
        }

        cadence("zombie_cadence", &self.zombie_cadence)?;
        cadence("meteorite_cadence", &self.meteorite_cadence)?;
        Ok(())
    }

    pub fn zombie_speed_range(&self) -> RangeInclusive<f32> {
        self.zombie_min_speed..=self.zombie_max_speed
    }

    pub fn meteorite_speed_range(&self) -> RangeInclusive<f32> {
        self.meteorite_min_speed..=self.meteorite_max_speed
    }

    pub fn diag_factor_range(&self) -> RangeInclusive<f32> {
        self.meteorite_diag_factor_min..=self.meteorite_diag_factor_max
    }
}

fn invalid(field: &'static str, reason: String) -> TuningError {
    TuningError::Invalid { field, reason }
}

fn positive(field: &'static str, value: f64) -> Result<(), TuningError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be positive, got {value}")))
    }
}

fn ordered(field: &'static str, min: f32, max: f32) -> Result<(), TuningError> {
    if min <= max {
        Ok(())
    } else {
        Err(invalid(field, format!("range is empty ({min} > {max})")))
    }
}

fn cadence(field: &'static str, c: &SpawnCadence) -> Result<(), TuningError> {
    if c.floor_ms <= 0.0 {
        return Err(invalid(field, format!("floor must be positive, got {}", c.floor_ms)));
    }
    if c.decrement_ms < 0.0 {
        return Err(invalid(field, "decrement must not be negative".to_string()));
    }
    if c.initial_ms < c.floor_ms {
        return Err(invalid(
            field,
            format!("initial {} is below floor {}", c.initial_ms, c.floor_ms),
        ));
    }
    Ok(())
}
