//! Spawn policy: where and when obstacles and power-ups appear
//!
//! Rules, checked every spawn period:
//! - one obstacle, never in the same lane as the previous obstacle
//! - a power-up with low probability, only while no slow-down is in progress
//! - a power-up never lands in a lane with an obstacle near the top of the track

use rand::Rng;
use rand::seq::IndexedRandom;

use super::entities::{EntityStore, Lane, PowerUpKind};
use crate::config::GameConfig;
use crate::consts::MIN_POWER_UP_SEPARATION;

/// What a single spawn period produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnReport {
    pub obstacle_lane: Option<Lane>,
    pub power_up: Option<(Lane, PowerUpKind)>,
}

#[derive(Debug, Clone, Default)]
pub struct SpawnPolicy {
    last_obstacle_lane: Option<Lane>,
}

impl SpawnPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_obstacle_lane(&self) -> Option<Lane> {
        self.last_obstacle_lane
    }

    pub fn reset(&mut self) {
        self.last_obstacle_lane = None;
    }

    /// Uniform choice among every lane except the previous obstacle's
    pub fn choose_obstacle_lane<R: Rng>(&self, lane_count: usize, rng: &mut R) -> Option<Lane> {
        let lanes: Vec<Lane> = (0..lane_count)
            .filter(|&lane| Some(lane) != self.last_obstacle_lane)
            .collect();
        lanes.choose(rng).copied()
    }

    /// Run one spawn period
    pub fn spawn<R: Rng>(
        &mut self,
        store: &mut EntityStore,
        config: &GameConfig,
        power_ups_allowed: bool,
        rng: &mut R,
    ) -> SpawnReport {
        let mut report = SpawnReport::default();

        if let Some(lane) = self.choose_obstacle_lane(config.lane_count, rng) {
            store.spawn_obstacle(lane);
            self.last_obstacle_lane = Some(lane);
            report.obstacle_lane = Some(lane);
            log::debug!("Spawned obstacle in lane {}", lane);
        }

        if power_ups_allowed && rng.random_bool(config.power_up_chance) {
            match choose_power_up_lane(store, config.lane_count, rng) {
                Some(lane) => {
                    let kind = if rng.random_bool(0.5) {
                        PowerUpKind::Slow
                    } else {
                        PowerUpKind::Shield
                    };
                    store.spawn_power_up(lane, kind);
                    report.power_up = Some((lane, kind));
                    log::debug!("Spawned {:?} power-up in lane {}", kind, lane);
                }
                None => log::debug!("No clear lane for power-up, skipping"),
            }
        }

        report
    }
}

/// True if `lane` has no obstacle within the safe separation of the spawn point
pub fn lane_is_clear(store: &EntityStore, lane: Lane) -> bool {
    !store
        .obstacles
        .iter()
        .any(|o| o.lane == lane && o.y.abs() < MIN_POWER_UP_SEPARATION)
}

/// Uniform choice among clear lanes, `None` if every lane is blocked
pub fn choose_power_up_lane<R: Rng>(
    store: &EntityStore,
    lane_count: usize,
    rng: &mut R,
) -> Option<Lane> {
    let lanes: Vec<Lane> = (0..lane_count)
        .filter(|&lane| lane_is_clear(store, lane))
        .collect();
    lanes.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn always_power_up() -> GameConfig {
        GameConfig {
            power_up_chance: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_spawn_emits_obstacle_each_period() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut store = EntityStore::new();
        let mut policy = SpawnPolicy::new();

        for _ in 0..20 {
            let report = policy.spawn(&mut store, &config, false, &mut rng);
            assert!(report.obstacle_lane.is_some());
            assert!(report.power_up.is_none());
        }
        assert_eq!(store.obstacles.len(), 20);
    }

    #[test]
    fn test_power_up_avoids_obstacle_lane() {
        let config = always_power_up();
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..50 {
            let mut store = EntityStore::new();
            let mut policy = SpawnPolicy::new();
            let report = policy.spawn(&mut store, &config, true, &mut rng);
            let (power_lane, _) = report.power_up.expect("power-up with chance 1.0");
            assert_ne!(Some(power_lane), report.obstacle_lane);
        }
    }

    #[test]
    fn test_power_up_skipped_when_all_lanes_blocked() {
        let config = always_power_up();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut store = EntityStore::new();
        for lane in 0..config.lane_count {
            store.spawn_obstacle(lane);
            store.obstacles[lane].y = 40.0;
        }
        let mut policy = SpawnPolicy::new();
        let report = policy.spawn(&mut store, &config, true, &mut rng);
        assert!(report.power_up.is_none());
        assert!(store.power_ups.is_empty());
    }

    #[test]
    fn test_far_obstacles_do_not_block() {
        let mut store = EntityStore::new();
        store.spawn_obstacle(1);
        store.obstacles[0].y = MIN_POWER_UP_SEPARATION;
        assert!(lane_is_clear(&store, 1));
        store.obstacles[0].y = MIN_POWER_UP_SEPARATION - 1.0;
        assert!(!lane_is_clear(&store, 1));
    }

    #[test]
    fn test_power_ups_disallowed() {
        let config = always_power_up();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut store = EntityStore::new();
        let mut policy = SpawnPolicy::new();
        for _ in 0..10 {
            policy.spawn(&mut store, &config, false, &mut rng);
        }
        assert!(store.power_ups.is_empty());
    }

    #[test]
    fn test_both_kinds_appear() {
        let config = always_power_up();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut kinds = Vec::new();
        for _ in 0..100 {
            let mut store = EntityStore::new();
            let mut policy = SpawnPolicy::new();
            if let Some((_, kind)) = policy.spawn(&mut store, &config, true, &mut rng).power_up {
                kinds.push(kind);
            }
        }
        assert!(kinds.contains(&PowerUpKind::Slow));
        assert!(kinds.contains(&PowerUpKind::Shield));
    }

    proptest! {
        #[test]
        fn prop_no_consecutive_same_lane(seed in any::<u64>(), lanes in 2usize..9, count in 2usize..100) {
            let config = GameConfig { lane_count: lanes, ..Default::default() };
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut store = EntityStore::new();
            let mut policy = SpawnPolicy::new();

            let mut previous = None;
            for _ in 0..count {
                let lane = policy.spawn(&mut store, &config, false, &mut rng).obstacle_lane;
                prop_assert!(lane.is_some());
                prop_assert!(lane.unwrap() < lanes);
                prop_assert_ne!(lane, previous);
                previous = lane;
            }
        }

        #[test]
        fn prop_power_up_respects_separation(
            seed in any::<u64>(),
            positions in proptest::collection::vec((0usize..5, 0.0f32..400.0), 0..12),
        ) {
            let config = always_power_up();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut store = EntityStore::new();
            for (lane, y) in positions {
                store.spawn_obstacle(lane);
                if let Some(o) = store.obstacles.last_mut() {
                    o.y = y;
                }
            }
            let mut policy = SpawnPolicy::new();
            let snapshot = store.clone();
            if let Some((lane, _)) = policy.spawn(&mut store, &config, true, &mut rng).power_up {
                prop_assert!(lane_is_clear(&snapshot, lane));
                // Including the obstacle spawned this period
                prop_assert_ne!(Some(lane), policy.last_obstacle_lane());
            }
        }
    }
}
