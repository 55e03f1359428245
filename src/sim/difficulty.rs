//! Spawn timers and the difficulty ramp
//!
//! Timers accumulate frame time and fire once the accumulated time strictly
//! exceeds their interval, then restart from zero.

use serde::{Deserialize, Serialize};

use crate::tuning::SpawnCadence;

/// Accumulating spawn timer for one hostile category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimer {
    /// Time since the last spawn (ms)
    pub elapsed_ms: f64,
    /// Current interval (ms); only ever shrinks toward `cadence.floor_ms`
    pub interval_ms: f64,
    pub cadence: SpawnCadence,
}

impl SpawnTimer {
    pub fn new(cadence: SpawnCadence) -> Self {
        Self {
            elapsed_ms: 0.0,
            interval_ms: cadence.initial_ms,
            cadence,
        }
    }

    /// Accumulate `dt_ms`; returns true when a spawn is due
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        self.elapsed_ms += dt_ms;
        if self.elapsed_ms > self.interval_ms {
            self.elapsed_ms = 0.0;
            true
        } else {
            false
        }
    }

    /// One difficulty step: shorten the interval, never below the floor
    pub fn tighten(&mut self) {
        self.interval_ms = (self.interval_ms - self.cadence.decrement_ms).max(self.cadence.floor_ms);
    }

    pub fn at_floor(&self) -> bool {
        self.interval_ms <= self.cadence.floor_ms
    }
}

/// Periodic difficulty timer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyRamp {
    pub elapsed_ms: f64,
    pub interval_ms: f64,
    /// Number of times the ramp has fired this session
    pub level: u32,
}

impl DifficultyRamp {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            elapsed_ms: 0.0,
            interval_ms,
            level: 0,
        }
    }

    /// Accumulate `dt_ms`; returns true when the ramp fires
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        self.elapsed_ms += dt_ms;
        if self.elapsed_ms > self.interval_ms {
            self.elapsed_ms = 0.0;
            self.level += 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    #[test]
    fn test_timer_fires_strictly_after_interval() {
        let mut timer = SpawnTimer::new(Tuning::default().zombie_cadence);
        assert!(!timer.advance(1000.0));
        assert!(!timer.advance(500.0)); // exactly 1500 is not enough
        assert!(timer.advance(1.0));
        assert_eq!(timer.elapsed_ms, 0.0);
    }

    #[test]
    fn test_timer_resets_without_carry() {
        let mut timer = SpawnTimer::new(Tuning::default().zombie_cadence);
        assert!(timer.advance(2900.0));
        // Overshoot is dropped, so one more full interval is needed
        assert!(!timer.advance(1500.0));
        assert!(timer.advance(0.5));
    }

    #[test]
    fn test_zombie_interval_floors() {
        let mut timer = SpawnTimer::new(Tuning::default().zombie_cadence);
        for _ in 0..31 {
            timer.tighten();
        }
        assert_eq!(timer.interval_ms, 260.0);
        assert!(!timer.at_floor());

        timer.tighten();
        assert_eq!(timer.interval_ms, 250.0);
        for _ in 0..100 {
            timer.tighten();
        }
        assert_eq!(timer.interval_ms, 250.0);
        assert!(timer.at_floor());
    }

    #[test]
    fn test_meteorite_interval_floors() {
        let mut timer = SpawnTimer::new(Tuning::default().meteorite_cadence);
        for _ in 0..41 {
            timer.tighten();
        }
        assert_eq!(timer.interval_ms, 1040.0);
        timer.tighten();
        assert_eq!(timer.interval_ms, 1000.0);
        timer.tighten();
        assert_eq!(timer.interval_ms, 1000.0);
    }

    #[test]
    fn test_ramp_fires_every_interval() {
        let mut ramp = DifficultyRamp::new(5000.0);
        let mut fired = 0;
        // 155 s of 1 ms frames
        for _ in 0..155_000 {
            if ramp.advance(1.0) {
                fired += 1;
            }
        }
        // Each period needs 5001 ms before it fires
        assert_eq!(fired, 155_000 / 5001);
        assert_eq!(ramp.level, fired);
    }

    proptest! {
        #[test]
        fn prop_interval_non_increasing_and_floored(steps in 0usize..200) {
            let cadence = Tuning::default().zombie_cadence;
            let mut timer = SpawnTimer::new(cadence);
            let mut last = timer.interval_ms;
            for _ in 0..steps {
                timer.tighten();
                prop_assert!(timer.interval_ms <= last);
                prop_assert!(timer.interval_ms >= cadence.floor_ms);
                last = timer.interval_ms;
            }
        }
    }
}
