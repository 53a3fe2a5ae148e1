//! Lane Dodge - simulation core for a lane-based dodging game
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (spawning, motion, collisions, power-ups, session)
//! - `config`: Initialization-time tuning with validation
//! - `highscore`: High score persistence collaborator
//! - `error`: Configuration and storage errors

pub mod config;
pub mod error;
pub mod highscore;
pub mod sim;

pub use config::GameConfig;
pub use error::{ConfigError, StorageError};
pub use highscore::{HighScoreStore, JsonFileStore, MemoryStore};

/// Track geometry constants
pub mod consts {
    /// Maximum fixed steps per `update` call to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Track dimensions (track units)
    pub const TRACK_HEIGHT: f32 = 600.0;
    pub const LANE_WIDTH: f32 = 100.0;

    /// Actor hitbox: fixed band near the bottom of the track
    pub const ACTOR_WIDTH: f32 = 60.0;
    pub const ACTOR_TOP_OFFSET: f32 = 120.0; // Top edge sits this far above the track bottom
    pub const ACTOR_BOTTOM_OFFSET: f32 = 20.0;

    /// Obstacle hitbox
    pub const OBSTACLE_WIDTH: f32 = 60.0;
    pub const OBSTACLE_HEIGHT: f32 = 50.0;

    /// Power-up hitbox
    pub const POWER_UP_SIZE: f32 = 40.0;

    /// A power-up never spawns in a lane holding an obstacle closer than this to the top
    pub const MIN_POWER_UP_SEPARATION: f32 = 150.0;
}

/// Left edge of a lane in track units
#[inline]
pub fn lane_left(lane: usize) -> f32 {
    lane as f32 * consts::LANE_WIDTH
}

/// Horizontal center of a lane in track units
#[inline]
pub fn lane_center(lane: usize) -> f32 {
    lane_left(lane) + consts::LANE_WIDTH / 2.0
}
