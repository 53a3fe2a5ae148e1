//! Power-up effects: shield inventory and the slow-down state machine
//!
//! The slow-down runs Normal -> SlowPlateau -> RampUp -> Cooldown -> Normal.
//! Phase and remaining time live in [`SpeedPhase`], advanced by the frame
//! tick, so a pause freezes the sequence exactly where it is.

use serde::{Deserialize, Serialize};

use super::speed::{SpeedPhase, SpeedState};
use crate::config::GameConfig;

/// Fraction of the pre-pickup speed the ramp climbs back to
pub const RAMP_TARGET_FRACTION: f32 = 0.75;

/// Fraction of the pre-pickup speed held during the plateau
pub const PLATEAU_FRACTION: f32 = 0.5;

/// Shields collected and not yet spent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShieldInventory {
    count: u32,
    max: u32,
}

impl ShieldInventory {
    pub fn new(max: u32) -> Self {
        Self { count: 0, max }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Add a shield, saturating at the cap. Returns false if already full.
    pub fn collect(&mut self) -> bool {
        if self.count >= self.max {
            return false;
        }
        self.count += 1;
        true
    }

    /// Spend one shield to absorb a hit. Returns false if none left.
    pub fn absorb(&mut self) -> bool {
        if self.count == 0 {
            return false;
        }
        self.count -= 1;
        true
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }
}

/// Slow-down transitions the session must react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectEvent {
    /// Entered the plateau; ordinary speed growth must stop
    SlowDownStarted,
    /// Plateau over, ramp begins
    RampStarted,
    /// Ramp reached its target; ordinary speed growth restarts
    RampCompleted,
    /// Cooldown over; power-ups may spawn again
    SlowDownFinished,
}

/// Start the slow-down sequence. No-op (returns false) unless in `Normal`.
pub fn trigger_slow_down(speed: &mut SpeedState, config: &GameConfig) -> bool {
    if !speed.phase.is_normal() {
        return false;
    }
    let captured = speed.effective;
    speed.effective = captured * PLATEAU_FRACTION;
    speed.phase = SpeedPhase::SlowPlateau {
        remaining_ms: config.slow_plateau_ms,
        captured,
    };
    log::debug!("Slow-down: {:.2} -> {:.2}", captured, speed.effective);
    true
}

/// Advance the slow-down sequence by `dt_ms` (at most one tick).
pub fn advance_slow_down(
    speed: &mut SpeedState,
    config: &GameConfig,
    dt_ms: u64,
) -> Option<EffectEvent> {
    match speed.phase {
        SpeedPhase::Normal => None,

        SpeedPhase::SlowPlateau {
            remaining_ms,
            captured,
        } => {
            let remaining_ms = remaining_ms.saturating_sub(dt_ms);
            if remaining_ms > 0 {
                speed.phase = SpeedPhase::SlowPlateau {
                    remaining_ms,
                    captured,
                };
                return None;
            }
            let target = captured * RAMP_TARGET_FRACTION;
            let steps = config.ramp_steps.max(1);
            speed.phase = SpeedPhase::RampUp {
                target,
                step: (target - speed.effective) / steps as f32,
                steps_left: steps,
                step_remaining_ms: config.ramp_step_ms(),
            };
            Some(EffectEvent::RampStarted)
        }

        SpeedPhase::RampUp {
            target,
            step,
            steps_left,
            step_remaining_ms,
        } => {
            let step_remaining_ms = step_remaining_ms.saturating_sub(dt_ms);
            if step_remaining_ms > 0 {
                speed.phase = SpeedPhase::RampUp {
                    target,
                    step,
                    steps_left,
                    step_remaining_ms,
                };
                return None;
            }

            speed.effective += step;
            let steps_left = steps_left.saturating_sub(1);
            if steps_left == 0 || speed.effective >= target {
                // Ramped value becomes the new baseline
                speed.effective = target;
                speed.base = target;
                speed.phase = SpeedPhase::Cooldown {
                    remaining_ms: config.cooldown_ms,
                };
                return Some(EffectEvent::RampCompleted);
            }
            speed.phase = SpeedPhase::RampUp {
                target,
                step,
                steps_left,
                step_remaining_ms: config.ramp_step_ms(),
            };
            None
        }

        SpeedPhase::Cooldown { remaining_ms } => {
            let remaining_ms = remaining_ms.saturating_sub(dt_ms);
            if remaining_ms > 0 {
                speed.phase = SpeedPhase::Cooldown { remaining_ms };
                return None;
            }
            speed.phase = SpeedPhase::Normal;
            Some(EffectEvent::SlowDownFinished)
        }
    }
}
