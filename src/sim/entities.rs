//! Obstacle and power-up entities and the store that owns them

use serde::{Deserialize, Serialize};

/// Lane index in [0, lane_count - 1]
pub type Lane = usize;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Timed slow-down of the whole world
    Slow,
    /// Absorbs one otherwise-fatal obstacle hit
    Shield,
}

/// A falling obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub lane: Lane,
    /// Top edge, growing downward from 0 at the top of the track
    pub y: f32,
}

/// A falling power-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub lane: Lane,
    pub y: f32,
    pub kind: PowerUpKind,
}

/// Active entities in spawn order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityStore {
    pub obstacles: Vec<Obstacle>,
    pub power_ups: Vec<PowerUp>,
    next_id: u32,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            obstacles: Vec::new(),
            power_ups: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn an obstacle at the top of the track
    pub fn spawn_obstacle(&mut self, lane: Lane) -> u32 {
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle { id, lane, y: 0.0 });
        id
    }

    /// Spawn a power-up at the top of the track
    pub fn spawn_power_up(&mut self, lane: Lane, kind: PowerUpKind) -> u32 {
        let id = self.next_entity_id();
        self.power_ups.push(PowerUp {
            id,
            lane,
            y: 0.0,
            kind,
        });
        id
    }

    pub fn remove_obstacle(&mut self, id: u32) -> Option<Obstacle> {
        let idx = self.obstacles.iter().position(|o| o.id == id)?;
        Some(self.obstacles.remove(idx))
    }

    pub fn remove_power_up(&mut self, id: u32) -> Option<PowerUp> {
        let idx = self.power_ups.iter().position(|p| p.id == id)?;
        Some(self.power_ups.remove(idx))
    }

    /// Drop entities whose top edge has passed `track_height`.
    /// Returns the number removed.
    pub fn prune_below(&mut self, track_height: f32) -> usize {
        let before = self.len();
        self.obstacles.retain(|o| o.y <= track_height);
        self.power_ups.retain(|p| p.y <= track_height);
        before - self.len()
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.power_ups.clear();
    }

    pub fn len(&self) -> usize {
        self.obstacles.len() + self.power_ups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
