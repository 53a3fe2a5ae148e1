//! Session controller
//!
//! Owns every piece of simulation state and the scheduler that drives it.
//! One fixed step fires whatever tasks are due, in the order
//! spawn -> frame (motion, collision) -> score -> speed increment.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::{self, CollisionCooldown, ObstacleHit, PickupResult};
use super::effects::{EffectEvent, ShieldInventory, advance_slow_down};
use super::entities::{EntityStore, Lane};
use super::motion;
use super::scheduler::{Scheduler, Task};
use super::snapshot::{ObstacleView, PowerUpView, Snapshot};
use super::spawn::{SpawnPolicy, SpawnReport};
use super::speed::SpeedState;
use super::state::{Actor, Command, Direction, GamePhase, ScoreBoard};
use crate::config::GameConfig;
use crate::consts::{MAX_SUBSTEPS, TRACK_HEIGHT};
use crate::error::ConfigError;
use crate::highscore::HighScoreStore;

/// A single game session and everything it owns
pub struct Session<S: HighScoreStore> {
    config: GameConfig,
    store: S,
    rng: Pcg32,
    phase: GamePhase,
    actor: Actor,
    entities: EntityStore,
    spawner: SpawnPolicy,
    speed: SpeedState,
    shields: ShieldInventory,
    cooldown: CollisionCooldown,
    scores: ScoreBoard,
    scheduler: Scheduler,
    /// Wall time not yet consumed by fixed steps
    accumulator_ms: u64,
    /// Fixed steps run since the last start/reset
    time_ticks: u64,
}

impl<S: HighScoreStore> Session<S> {
    /// Create a session. Rejects invalid configuration before anything runs.
    pub fn new(config: GameConfig, store: S, rng: Pcg32) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            actor: Actor::new(config.center_lane()),
            speed: SpeedState::new(config.initial_speed),
            shields: ShieldInventory::new(config.max_shields),
            config,
            store,
            rng,
            phase: GamePhase::Ready,
            entities: EntityStore::new(),
            spawner: SpawnPolicy::new(),
            cooldown: CollisionCooldown::default(),
            scores: ScoreBoard::default(),
            scheduler: Scheduler::new(),
            accumulator_ms: 0,
            time_ticks: 0,
        })
    }

    /// Create a session with an OS-seeded RNG
    pub fn with_entropy(config: GameConfig, store: S) -> Result<Self, ConfigError> {
        Self::new(config, store, Pcg32::from_os_rng())
    }

    // === Lifecycle ===

    /// Load the stored high score and begin play
    pub fn start(&mut self) {
        self.scores.high_score = match self.store.load() {
            Ok(stored) => stored.unwrap_or(0),
            Err(e) => {
                log::warn!("Could not load high score, starting from 0: {}", e);
                0
            }
        };
        self.restart();
        log::info!(
            "Session started: {} lanes, high score {}",
            self.config.lane_count,
            self.scores.high_score
        );
    }

    /// Abandon the current run and start a fresh one. The high score is kept.
    pub fn reset(&mut self) {
        self.restart();
        log::info!("Session reset");
    }

    fn restart(&mut self) {
        self.scheduler.cancel_all();
        self.actor = Actor::new(self.config.center_lane());
        self.entities.clear();
        self.spawner.reset();
        self.speed = SpeedState::new(self.config.initial_speed);
        self.shields.reset();
        self.cooldown.clear();
        self.scores.reset_run();
        self.accumulator_ms = 0;
        self.time_ticks = 0;
        self.phase = GamePhase::Running;
        self.schedule_all();
    }

    /// Start every periodic activity from a full period
    fn schedule_all(&mut self) {
        self.scheduler.every(Task::Spawn, self.config.spawn_interval_ms);
        self.scheduler.every(Task::Frame, self.config.tick_ms);
        self.scheduler.every(Task::Score, self.config.score_interval_ms);
        if !self.speed.increment_suspended() {
            self.scheduler
                .every(Task::SpeedIncrement, self.config.speed_interval_ms);
        }
    }

    /// Freeze everything. Returns false if not running.
    pub fn pause(&mut self) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        self.scheduler.cancel_all();
        self.accumulator_ms = 0;
        self.phase = GamePhase::Paused;
        log::info!("Paused at {}s", self.scores.timer);
        true
    }

    /// Unfreeze. Timers restart from a full period.
    pub fn resume(&mut self) -> bool {
        if self.phase != GamePhase::Paused {
            return false;
        }
        self.phase = GamePhase::Running;
        self.schedule_all();
        log::info!("Resumed");
        true
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Running => {
                self.pause();
            }
            GamePhase::Paused => {
                self.resume();
            }
            _ => log::debug!("Pause toggle ignored in {:?}", self.phase),
        }
    }

    /// Ignored unless running
    pub fn move_actor(&mut self, direction: Direction) {
        if self.phase != GamePhase::Running {
            log::debug!("Move {:?} ignored in {:?}", direction, self.phase);
            return;
        }
        self.actor.shift(direction, self.config.lane_count);
    }

    pub fn handle(&mut self, command: Command) {
        match command {
            Command::MoveLeft => self.move_actor(Direction::Left),
            Command::MoveRight => self.move_actor(Direction::Right),
            Command::TogglePause => self.toggle_pause(),
        }
    }

    pub fn clear_high_score(&mut self) {
        self.scores.high_score = 0;
        if let Err(e) = self.store.clear() {
            log::warn!("Could not clear stored high score: {}", e);
        }
        log::info!("High score cleared");
    }

    // === Simulation ===

    /// Feed elapsed wall time; runs as many fixed steps as are due.
    /// Returns the number of steps run.
    pub fn update(&mut self, elapsed_ms: u64) -> u32 {
        if self.phase != GamePhase::Running {
            self.accumulator_ms = 0;
            return 0;
        }
        let tick_ms = self.config.tick_ms;
        self.accumulator_ms = self
            .accumulator_ms
            .saturating_add(elapsed_ms)
            .min(tick_ms * u64::from(MAX_SUBSTEPS));

        let mut substeps = 0;
        while self.accumulator_ms >= tick_ms && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator_ms -= tick_ms;
            substeps += 1;
            if self.phase != GamePhase::Running {
                self.accumulator_ms = 0;
                break;
            }
        }
        substeps
    }

    /// Run exactly one fixed step
    pub fn step(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.time_ticks += 1;

        for task in self.scheduler.advance(self.config.tick_ms) {
            // Game over mid-step cancels whatever is left
            if self.phase != GamePhase::Running {
                break;
            }
            match task {
                Task::Spawn => self.on_spawn(),
                Task::Frame => self.on_frame(),
                Task::Score => self.on_score(),
                Task::SpeedIncrement => self.on_speed_increment(),
            }
        }
    }

    fn on_spawn(&mut self) {
        let power_ups_allowed = self.speed.phase.is_normal();
        let SpawnReport {
            obstacle_lane,
            power_up,
        } = self.spawner.spawn(
            &mut self.entities,
            &self.config,
            power_ups_allowed,
            &mut self.rng,
        );
        if let Some(lane) = obstacle_lane {
            log::trace!("Spawned obstacle in lane {}", lane);
        }
        if let Some((lane, kind)) = power_up {
            log::debug!("Spawned {:?} power-up in lane {}", kind, lane);
        }
    }

    fn on_frame(&mut self) {
        let dt = self.config.tick_ms;
        self.cooldown.advance(dt);
        if let Some(event) = advance_slow_down(&mut self.speed, &self.config, dt) {
            self.on_effect_event(event);
        }

        motion::advance(&mut self.entities, self.speed.effective);
        self.entities.prune_below(TRACK_HEIGHT);

        let outcome = collision::detect(&mut self.entities, self.actor.lane, &self.cooldown);

        for kind in outcome.power_ups {
            let result =
                collision::apply_power_up(kind, &mut self.shields, &mut self.speed, &self.config);
            log::debug!("Picked up {:?}: {:?}", kind, result);
            if result == PickupResult::SlowDownStarted {
                self.on_effect_event(EffectEvent::SlowDownStarted);
            }
        }

        if let Some(obstacle) = outcome.obstacle {
            match collision::resolve_obstacle_hit(&mut self.shields, &mut self.cooldown, &self.config)
            {
                ObstacleHit::Absorbed => log::info!(
                    "Shield absorbed obstacle {} in lane {} ({} left)",
                    obstacle.id,
                    obstacle.lane,
                    self.shields.count()
                ),
                ObstacleHit::Fatal => self.game_over(),
            }
        }
    }

    fn on_effect_event(&mut self, event: EffectEvent) {
        match event {
            EffectEvent::SlowDownStarted => {
                self.scheduler.cancel(Task::SpeedIncrement);
                log::info!("Slow-down started ({:.2})", self.speed.effective);
            }
            EffectEvent::RampStarted => log::debug!("Slow-down ramping up"),
            EffectEvent::RampCompleted => {
                self.scheduler
                    .every(Task::SpeedIncrement, self.config.speed_interval_ms);
                log::debug!("Slow-down ramp complete at {:.2}", self.speed.effective);
            }
            EffectEvent::SlowDownFinished => log::info!("Slow-down finished"),
        }
    }

    fn on_score(&mut self) {
        if self.scores.tick_second(self.config.score_per_second) {
            self.save_high_score();
        }
    }

    fn on_speed_increment(&mut self) {
        self.speed
            .apply_increment(self.config.speed_increment, self.config.max_speed);
    }

    fn game_over(&mut self) {
        self.scheduler.cancel_all();
        self.phase = GamePhase::GameOver;
        if self.scores.commit() {
            self.save_high_score();
        }
        log::info!(
            "Game over after {}s: score {}, high score {}",
            self.scores.timer,
            self.scores.score,
            self.scores.high_score
        );
    }

    fn save_high_score(&mut self) {
        if let Err(e) = self.store.save(self.scores.high_score) {
            log::warn!("Could not save high score {}: {}", self.scores.high_score, e);
        }
    }

    // === Queries ===

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn actor_lane(&self) -> Lane {
        self.actor.lane
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn entities(&self) -> &EntityStore {
        &self.entities
    }

    pub fn speed(&self) -> &SpeedState {
        &self.speed
    }

    pub fn shields(&self) -> &ShieldInventory {
        &self.shields
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            actor_lane: self.actor.lane,
            obstacles: self
                .entities
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    lane: o.lane,
                    y: o.y,
                })
                .collect(),
            power_ups: self
                .entities
                .power_ups
                .iter()
                .map(|p| PowerUpView {
                    lane: p.lane,
                    y: p.y,
                    kind: p.kind,
                })
                .collect(),
            shields: self.shields.count(),
            max_shields: self.shields.max(),
            slow_down_active: !self.speed.phase.is_normal(),
            speed: self.speed.effective,
            timer: self.scores.timer,
            score: self.scores.score,
            high_score: self.scores.high_score,
            paused: self.phase == GamePhase::Paused,
            game_over: self.phase == GamePhase::GameOver,
        }
    }
}
