//! Fixed-step simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only, every timer a whole number of ticks
//! - One owned [`Session`] holds all state; components take what they need by reference
//! - No rendering, input or storage dependencies beyond the [`crate::HighScoreStore`] trait

pub mod collision;
pub mod effects;
pub mod entities;
pub mod motion;
pub mod scheduler;
pub mod session;
pub mod snapshot;
pub mod spawn;
pub mod speed;
pub mod state;

pub use collision::{CollisionCooldown, CollisionOutcome, ObstacleHit, PickupResult, Rect};
pub use effects::{EffectEvent, ShieldInventory};
pub use entities::{EntityStore, Lane, Obstacle, PowerUp, PowerUpKind};
pub use scheduler::{Scheduler, Task};
pub use session::Session;
pub use snapshot::{ObstacleView, PowerUpView, Snapshot};
pub use spawn::{SpawnPolicy, SpawnReport};
pub use speed::{SpeedPhase, SpeedState};
pub use state::{Actor, Command, Direction, GamePhase, ScoreBoard};
