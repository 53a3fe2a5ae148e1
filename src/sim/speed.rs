//! World speed and difficulty growth
//!
//! `base` is the difficulty baseline, `effective` is what motion uses. They
//! only differ while a slow-down is on the plateau or ramping back up.

use serde::{Deserialize, Serialize};

/// Speed perturbation phase (driven by [`super::effects`])
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpeedPhase {
    /// Ordinary difficulty growth
    Normal,
    /// Speed held at half the captured pre-pickup speed
    SlowPlateau { remaining_ms: u64, captured: f32 },
    /// Speed climbing back in discrete increments toward `target`
    RampUp {
        target: f32,
        step: f32,
        steps_left: u32,
        step_remaining_ms: u64,
    },
    /// Growth resumed, power-ups still held back
    Cooldown { remaining_ms: u64 },
}

impl SpeedPhase {
    pub fn is_normal(&self) -> bool {
        matches!(self, SpeedPhase::Normal)
    }
}

/// Current speed of the world (track units per tick)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedState {
    pub base: f32,
    pub effective: f32,
    pub phase: SpeedPhase,
}

impl SpeedState {
    pub fn new(initial: f32) -> Self {
        Self {
            base: initial,
            effective: initial,
            phase: SpeedPhase::Normal,
        }
    }

    /// Ordinary increments are suspended while the slow-down owns `effective`
    pub fn increment_suspended(&self) -> bool {
        matches!(
            self.phase,
            SpeedPhase::SlowPlateau { .. } | SpeedPhase::RampUp { .. }
        )
    }

    /// Apply one ordinary difficulty increment, clamped to `max`.
    /// Returns false if suspended.
    pub fn apply_increment(&mut self, increment: f32, max: f32) -> bool {
        if self.increment_suspended() {
            return false;
        }
        self.base = (self.base + increment).min(max);
        self.effective = self.base;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_increment_clamps_to_max() {
        let mut speed = SpeedState::new(11.95);
        assert!(speed.apply_increment(0.1, 12.0));
        assert_eq!(speed.base, 12.0);
        assert_eq!(speed.effective, 12.0);

        assert!(speed.apply_increment(0.1, 12.0));
        assert_eq!(speed.effective, 12.0);
    }

    #[test]
    fn test_increment_suspended_during_slow_down() {
        let mut speed = SpeedState::new(4.0);
        speed.effective = 2.0;
        speed.phase = SpeedPhase::SlowPlateau {
            remaining_ms: 5000,
            captured: 4.0,
        };
        assert!(!speed.apply_increment(0.5, 12.0));
        assert_eq!(speed.effective, 2.0);
        assert_eq!(speed.base, 4.0);
    }

    #[test]
    fn test_increment_runs_during_cooldown() {
        let mut speed = SpeedState::new(3.0);
        speed.phase = SpeedPhase::Cooldown { remaining_ms: 2500 };
        assert!(speed.apply_increment(0.5, 12.0));
        assert_eq!(speed.effective, 3.5);
    }

    proptest! {
        #[test]
        fn prop_speed_stays_in_bounds(
            initial in 0.1f32..10.0,
            extra in 0.0f32..10.0,
            increment in 0.0f32..2.0,
            count in 0usize..200,
        ) {
            let max = initial + extra;
            let mut speed = SpeedState::new(initial);
            for _ in 0..count {
                speed.apply_increment(increment, max);
                prop_assert!(speed.effective >= 0.0);
                prop_assert!(speed.effective <= max);
            }
        }
    }
}
