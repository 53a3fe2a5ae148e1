//! Error types for configuration and high score storage.

use thiserror::Error;

/// Out-of-range initialization constants. Fatal: no session starts with these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The no-repeat spawn rule needs at least one alternative lane.
    #[error("lane count must be at least 2, got {0}")]
    TooFewLanes(usize),

    #[error("initial speed must be positive and finite, got {0}")]
    InvalidInitialSpeed(f32),

    #[error("max speed {max} is below initial speed {initial}")]
    MaxBelowInitial { initial: f32, max: f32 },

    #[error("speed increment must be non-negative and finite, got {0}")]
    InvalidSpeedIncrement(f32),

    #[error("power-up chance must be within [0, 1], got {0}")]
    InvalidPowerUpChance(f64),

    #[error("tick length must be non-zero")]
    ZeroTick,

    #[error("ramp must have at least one step")]
    ZeroRampSteps,

    /// Periods must be whole numbers of ticks so timers stay exact.
    #[error("{name} ({value_ms} ms) must be a positive multiple of the {tick_ms} ms tick")]
    MisalignedPeriod {
        name: &'static str,
        value_ms: u64,
        tick_ms: u64,
    },

    #[error("failed to parse config: {0}")]
    Parse(String),
}

/// Failures of the high score persistence collaborator.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("high score storage unavailable: {0}")]
    Unavailable(String),

    #[error("high score storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored high score is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}
