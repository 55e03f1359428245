//! Zombie Survival - a top-down survival arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, spawning, collisions, session state)
//! - `tuning`: Data-driven game balance
//! - `lifecycle`: Outer replay loop and the collaborator traits it drives
//! - `autopilot`: Headless input provider that plays the game

pub mod autopilot;
pub mod lifecycle;
pub mod sim;
pub mod tuning;

pub use lifecycle::{Clock, InputProvider, RenderFrame, Renderer, RunSummary};
pub use sim::{Session, SessionPhase, TickInput, tick};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Target simulation rate (ticks per second)
    pub const TARGET_FPS: u32 = 60;
    /// Nominal frame duration in milliseconds at the target rate
    pub const FRAME_MS: f64 = 1000.0 / TARGET_FPS as f64;

    /// Visible area
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    pub const PLAYER_SPEED: f32 = 5.0;

    /// Zombie defaults (shared by straight and tracking zombies)
    pub const ZOMBIE_WIDTH: f32 = 30.0;
    pub const ZOMBIE_HEIGHT: f32 = 30.0;
    pub const ZOMBIE_MIN_SPEED: f32 = 1.0;
    pub const ZOMBIE_MAX_SPEED: f32 = 3.0;
    /// Cross-axis jitter as a fraction of speed, sampled in [-J, J]
    pub const ZOMBIE_JITTER: f32 = 0.5;
    pub const TRACKING_ZOMBIE_SPEED: f32 = 1.8;
    pub const TRACKING_ZOMBIE_CHANCE: f64 = 0.2;

    /// Meteorite defaults
    pub const METEORITE_WIDTH: f32 = 60.0;
    pub const METEORITE_HEIGHT: f32 = 60.0;
    pub const METEORITE_MIN_SPEED: f32 = 2.0;
    pub const METEORITE_MAX_SPEED: f32 = 6.0;
    pub const METEORITE_DIAG_FACTOR_MIN: f32 = 0.3;
    pub const METEORITE_DIAG_FACTOR_MAX: f32 = 0.7;
    pub const METEORITE_STRAIGHT_DRIFT: f32 = 0.3;
    /// Highest spawn point above the screen (most negative y)
    pub const METEORITE_SPAWN_TOP: f32 = -150.0;
    /// Minimum clearance between a fresh meteorite's bottom edge and the screen top
    pub const METEORITE_SPAWN_CLEARANCE: f32 = 10.0;

    /// Destruction margins beyond the visible bounds
    pub const STRAIGHT_ZOMBIE_MARGIN: f32 = 50.0;
    pub const TRACKING_ZOMBIE_MARGIN: f32 = 150.0;
    pub const METEORITE_MARGIN: f32 = 10.0;

    /// Spawn cadence (milliseconds)
    pub const ZOMBIE_SPAWN_INTERVAL_MS: f64 = 1500.0;
    pub const ZOMBIE_SPAWN_DECREMENT_MS: f64 = 40.0;
    pub const ZOMBIE_SPAWN_FLOOR_MS: f64 = 250.0;
    pub const METEORITE_SPAWN_INTERVAL_MS: f64 = 3500.0;
    pub const METEORITE_SPAWN_DECREMENT_MS: f64 = 60.0;
    pub const METEORITE_SPAWN_FLOOR_MS: f64 = 1000.0;

    /// Difficulty ramp period (milliseconds)
    pub const DIFFICULTY_RAMP_INTERVAL_MS: f64 = 5000.0;
}

/// Normalize a vector, returning zero for a zero-length input
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    let delta = to - from;
    let distance = delta.length();
    if distance > 0.0 {
        delta / distance
    } else {
        Vec2::ZERO
    }
}

/// Format a millisecond duration as seconds with two decimals
#[inline]
pub fn format_seconds(ms: f64) -> String {
    format!("{:.2}", ms / 1000.0)
}
