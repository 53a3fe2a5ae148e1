//! Per-tick entity motion

use super::entities::EntityStore;

/// Power-ups fall at this fraction of the obstacle rate
pub const POWER_UP_SPEED_FACTOR: f32 = 0.5;

/// Advance every entity by one tick at `effective_speed`
pub fn advance(store: &mut EntityStore, effective_speed: f32) {
    for obstacle in &mut store.obstacles {
        obstacle.y += effective_speed;
    }
    let power_up_speed = effective_speed * POWER_UP_SPEED_FACTOR;
    for power_up in &mut store.power_ups {
        power_up.y += power_up_speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::PowerUpKind;

    #[test]
    fn test_power_ups_move_at_half_rate() {
        let mut store = EntityStore::new();
        store.spawn_obstacle(0);
        store.spawn_power_up(1, PowerUpKind::Slow);

        for _ in 0..10 {
            advance(&mut store, 2.0);
        }
        assert_eq!(store.obstacles[0].y, 20.0);
        assert_eq!(store.power_ups[0].y, 10.0);
    }

    #[test]
    fn test_zero_speed_holds_position() {
        let mut store = EntityStore::new();
        store.spawn_obstacle(3);
        advance(&mut store, 0.0);
        assert_eq!(store.obstacles[0].y, 0.0);
    }
}
