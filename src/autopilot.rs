//! Idle/demo mode - AI plays the game
//!
//! Steers the player away from nearby hostiles and where they will be a few
//! ticks from now, with a weak pull back toward the middle of the screen.
//! Replays automatically after a short pause on the game-over screen.

use glam::Vec2;

use crate::lifecycle::InputProvider;
use crate::sim::{MoveKeys, Session, TickInput};

/// Autopilot behaviour knobs
#[derive(Debug, Clone)]
pub struct AutopilotConfig {
    /// Hostiles farther than this are ignored
    pub danger_radius: f32,
    /// Ticks of velocity added when predicting a hostile's position
    pub lookahead_ticks: f32,
    /// Strength of the pull toward the screen centre
    pub center_pull: f32,
    /// Per-axis threshold below which no key is pressed
    pub deadzone: f32,
    /// Frames to linger on the game-over screen before replaying
    pub restart_delay_frames: u32,
}

impl Default for AutopilotConfig {
    fn default() -> Self {
        Self {
            danger_radius: 160.0,
            lookahead_ticks: 12.0,
            center_pull: 0.002,
            deadzone: 0.15,
            restart_delay_frames: 60,
        }
    }
}

/// Input provider that plays on its own
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    pub config: AutopilotConfig,
    terminated_frames: u32,
}

impl Autopilot {
    pub fn new(config: AutopilotConfig) -> Self {
        Self {
            config,
            terminated_frames: 0,
        }
    }

    /// Desired movement for the player (not yet quantized to keys)
    pub fn steer(&self, session: &Session) -> Vec2 {
        let me = session.player.center();
        let radius = self.config.danger_radius;

        let mut push = Vec2::ZERO;
        for hostile in &session.hostiles {
            let predicted = hostile.center() + hostile.vel * self.config.lookahead_ticks;
            for threat in [hostile.center(), predicted] {
                let away = me - threat;
                let dist = away.length();
                if dist < 1e-3 || dist > radius {
                    continue;
                }
                // Closer threats push harder
                let weight = (radius - dist) / radius;
                push += away / dist * weight * weight;
            }
        }

        let home = session.tuning.screen_size() / 2.0 - me;
        push + home * self.config.center_pull
    }

    fn keys_for(&self, steer: Vec2) -> MoveKeys {
        let axis = |v: f32| {
            if v > self.config.deadzone {
                1.0
            } else if v < -self.config.deadzone {
                -1.0
            } else {
                0.0
            }
        };
        MoveKeys::from_direction(Vec2::new(axis(steer.x), axis(steer.y)))
    }
}

impl InputProvider for Autopilot {
    fn poll(&mut self, session: &Session) -> TickInput {
        if !session.is_running() {
            self.terminated_frames += 1;
            let restart = self.terminated_frames > self.config.restart_delay_frames;
            if restart {
                self.terminated_frames = 0;
            }
            return TickInput {
                restart,
                ..Default::default()
            };
        }

        TickInput {
            keys: self.keys_for(self.steer(session)),
            ..Default::default()
        }
    }
}
