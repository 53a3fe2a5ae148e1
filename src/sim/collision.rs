//! Collision detection and resolution
//!
//! Hitboxes are axis-aligned rectangles. An entity hits the actor only when it
//! shares the actor's lane AND its rectangle overlaps the actor's fixed band
//! near the bottom of the track. The rectangle test runs even though lane
//! equality implies horizontal overlap, so edge lanes are judged by the same
//! geometry a renderer would draw.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::effects::{ShieldInventory, trigger_slow_down};
use super::entities::{EntityStore, Lane, Obstacle, PowerUp, PowerUpKind};
use super::speed::SpeedState;
use crate::config::GameConfig;
use crate::consts::*;
use crate::lane_center;

/// Axis-aligned rectangle (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Rectangle horizontally centered on `center_x`, top edge at `top`
    pub fn centered(center_x: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(center_x - width / 2.0, top),
            max: Vec2::new(center_x + width / 2.0, top + height),
        }
    }

    #[inline]
    pub fn overlaps_vertically(&self, other: &Rect) -> bool {
        self.min.y < other.max.y && other.min.y < self.max.y
    }

    #[inline]
    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        self.min.x < other.max.x && other.min.x < self.max.x
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.overlaps_vertically(other) && self.overlaps_horizontally(other)
    }
}

/// Actor hitbox: fixed band near the bottom of the track
pub fn actor_hitbox(lane: Lane) -> Rect {
    let top = TRACK_HEIGHT - ACTOR_TOP_OFFSET;
    let height = ACTOR_TOP_OFFSET - ACTOR_BOTTOM_OFFSET;
    Rect::centered(lane_center(lane), top, ACTOR_WIDTH, height)
}

pub fn obstacle_hitbox(obstacle: &Obstacle) -> Rect {
    Rect::centered(
        lane_center(obstacle.lane),
        obstacle.y,
        OBSTACLE_WIDTH,
        OBSTACLE_HEIGHT,
    )
}

pub fn power_up_hitbox(power_up: &PowerUp) -> Rect {
    Rect::centered(
        lane_center(power_up.lane),
        power_up.y,
        POWER_UP_SIZE,
        POWER_UP_SIZE,
    )
}

#[inline]
fn touches_actor(actor_lane: Lane, actor: &Rect, entity_lane: Lane, entity: &Rect) -> bool {
    let same_lane_vertical = entity_lane == actor_lane && actor.overlaps_vertically(entity);
    same_lane_vertical && actor.overlaps_horizontally(entity)
}

/// Window after an absorbed hit during which obstacles are not evaluated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionCooldown {
    remaining_ms: u64,
}

impl CollisionCooldown {
    pub fn start(&mut self, duration_ms: u64) {
        self.remaining_ms = duration_ms;
    }

    pub fn advance(&mut self, dt_ms: u64) {
        self.remaining_ms = self.remaining_ms.saturating_sub(dt_ms);
    }

    pub fn is_active(&self) -> bool {
        self.remaining_ms > 0
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn clear(&mut self) {
        self.remaining_ms = 0;
    }
}

/// Entities removed by contact with the actor this tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionOutcome {
    /// First obstacle touching the actor, if obstacles were evaluated
    pub obstacle: Option<Obstacle>,
    /// Power-ups collected, in spawn order
    pub power_ups: Vec<PowerUpKind>,
}

/// Find and remove everything touching the actor.
///
/// Power-ups are always collected. Obstacles are skipped entirely while
/// `cooldown` is active; otherwise at most one is taken per tick.
pub fn detect(
    store: &mut EntityStore,
    actor_lane: Lane,
    cooldown: &CollisionCooldown,
) -> CollisionOutcome {
    let actor = actor_hitbox(actor_lane);
    let mut outcome = CollisionOutcome::default();

    store.power_ups.retain(|power_up| {
        if touches_actor(actor_lane, &actor, power_up.lane, &power_up_hitbox(power_up)) {
            outcome.power_ups.push(power_up.kind);
            false
        } else {
            true
        }
    });

    if !cooldown.is_active() {
        let hit = store
            .obstacles
            .iter()
            .find(|o| touches_actor(actor_lane, &actor, o.lane, &obstacle_hitbox(o)))
            .map(|o| o.id);
        if let Some(id) = hit {
            outcome.obstacle = store.remove_obstacle(id);
        }
    }

    outcome
}

/// Consequence of an obstacle hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleHit {
    /// A shield took the hit; cooldown started
    Absorbed,
    /// No shields left
    Fatal,
}

pub fn resolve_obstacle_hit(
    shields: &mut ShieldInventory,
    cooldown: &mut CollisionCooldown,
    config: &GameConfig,
) -> ObstacleHit {
    if shields.absorb() {
        cooldown.start(config.collision_cooldown_ms);
        ObstacleHit::Absorbed
    } else {
        ObstacleHit::Fatal
    }
}

/// Consequence of a power-up pickup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupResult {
    SlowDownStarted,
    /// A slow-down is already in progress
    SlowDownIgnored,
    ShieldAdded,
    /// Consumed at the cap without effect
    ShieldsFull,
}

pub fn apply_power_up(
    kind: PowerUpKind,
    shields: &mut ShieldInventory,
    speed: &mut SpeedState,
    config: &GameConfig,
) -> PickupResult {
    match kind {
        PowerUpKind::Slow => {
            if trigger_slow_down(speed, config) {
                PickupResult::SlowDownStarted
            } else {
                PickupResult::SlowDownIgnored
            }
        }
        PowerUpKind::Shield => {
            if shields.collect() {
                PickupResult::ShieldAdded
            } else {
                PickupResult::ShieldsFull
            }
        }
    }
}
