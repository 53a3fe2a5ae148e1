//! Game tuning constants
//!
//! Fixed at initialization time. Every timing is in milliseconds and must line
//! up with the simulation tick.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Initialization-time tuning for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Track ===
    /// Number of lanes (track width)
    pub lane_count: usize,

    // === Speed (track units per tick) ===
    /// Starting fall rate
    pub initial_speed: f32,
    /// Difficulty ceiling
    pub max_speed: f32,
    /// Growth applied once per speed period
    pub speed_increment: f32,

    // === Power-ups ===
    /// Shield cap
    pub max_shields: u32,
    /// Chance of a power-up on each spawn period (0.0 - 1.0)
    pub power_up_chance: f64,
    /// Slow-down plateau duration
    pub slow_plateau_ms: u64,
    /// Slow-down ramp duration
    pub ramp_ms: u64,
    /// Number of discrete ramp increments
    pub ramp_steps: u32,
    /// Delay after the ramp before power-ups spawn again
    pub cooldown_ms: u64,
    /// Window after a shielded hit during which obstacles are ignored
    pub collision_cooldown_ms: u64,

    // === Timing ===
    /// Fixed simulation step
    pub tick_ms: u64,
    pub spawn_interval_ms: u64,
    pub score_interval_ms: u64,
    pub speed_interval_ms: u64,

    // === Scoring ===
    pub score_per_second: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            lane_count: 5,

            initial_speed: 3.0,
            max_speed: 12.0,
            speed_increment: 0.1,

            max_shields: 3,
            power_up_chance: 0.1,
            slow_plateau_ms: 5000,
            ramp_ms: 5000,
            ramp_steps: 10,
            cooldown_ms: 2500,
            collision_cooldown_ms: 500,

            tick_ms: 20, // 50 Hz
            spawn_interval_ms: 1000,
            score_interval_ms: 1000,
            speed_interval_ms: 1000,

            score_per_second: 10,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON override. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Lane the actor starts in (center)
    pub fn center_lane(&self) -> usize {
        self.lane_count / 2
    }

    /// Length of a single ramp increment
    pub fn ramp_step_ms(&self) -> u64 {
        self.ramp_ms / u64::from(self.ramp_steps.max(1))
    }

    /// Reject out-of-range constants before any session starts
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lane_count < 2 {
            return Err(ConfigError::TooFewLanes(self.lane_count));
        }
        if !self.initial_speed.is_finite() || self.initial_speed <= 0.0 {
            return Err(ConfigError::InvalidInitialSpeed(self.initial_speed));
        }
        if !self.max_speed.is_finite() || self.max_speed < self.initial_speed {
            return Err(ConfigError::MaxBelowInitial {
                initial: self.initial_speed,
                max: self.max_speed,
            });
        }
        if !self.speed_increment.is_finite() || self.speed_increment < 0.0 {
            return Err(ConfigError::InvalidSpeedIncrement(self.speed_increment));
        }
        if !(0.0..=1.0).contains(&self.power_up_chance) {
            return Err(ConfigError::InvalidPowerUpChance(self.power_up_chance));
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        if self.ramp_steps == 0 {
            return Err(ConfigError::ZeroRampSteps);
        }

        let periods = [
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("score_interval_ms", self.score_interval_ms),
            ("speed_interval_ms", self.speed_interval_ms),
            ("slow_plateau_ms", self.slow_plateau_ms),
            ("ramp_ms", self.ramp_ms),
            ("cooldown_ms", self.cooldown_ms),
            ("collision_cooldown_ms", self.collision_cooldown_ms),
        ];
        for (name, value_ms) in periods {
            self.check_aligned(name, value_ms)?;
        }
        // Each ramp increment must itself be a whole number of ticks
        if self.ramp_ms % u64::from(self.ramp_steps) != 0 {
            return Err(ConfigError::MisalignedPeriod {
                name: "ramp_ms / ramp_steps",
                value_ms: self.ramp_ms,
                tick_ms: self.tick_ms,
            });
        }
        self.check_aligned("ramp step", self.ramp_step_ms())?;

        Ok(())
    }

    fn check_aligned(&self, name: &'static str, value_ms: u64) -> Result<(), ConfigError> {
        if value_ms == 0 || value_ms % self.tick_ms != 0 {
            return Err(ConfigError::MisalignedPeriod {
                name,
                value_ms,
                tick_ms: self.tick_ms,
            });
        }
        Ok(())
    }
}
