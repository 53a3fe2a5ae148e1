//! Read-only view of a session for the rendering collaborator

use serde::Serialize;

use super::entities::{Lane, PowerUpKind};
use super::state::GamePhase;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObstacleView {
    pub lane: Lane,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PowerUpView {
    pub lane: Lane,
    pub y: f32,
    pub kind: PowerUpKind,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub actor_lane: Lane,
    pub obstacles: Vec<ObstacleView>,
    pub power_ups: Vec<PowerUpView>,
    pub shields: u32,
    pub max_shields: u32,
    pub slow_down_active: bool,
    pub speed: f32,
    pub timer: u64,
    pub score: u64,
    pub high_score: u64,
    pub paused: bool,
    pub game_over: bool,
}
