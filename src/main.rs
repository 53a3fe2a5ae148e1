//! Lane Dodge headless driver
//!
//! Runs one session in demo mode: an autopilot steers the actor while the
//! simulation advances on a fixed step. Prints the final snapshot as JSON.

use std::process::ExitCode;

use lane_dodge::consts::{ACTOR_BOTTOM_OFFSET, ACTOR_TOP_OFFSET, TRACK_HEIGHT};
use lane_dodge::sim::{Command, Session, Snapshot};
use lane_dodge::{GameConfig, JsonFileStore};

/// Optional path to a JSON config override
const CONFIG_ENV: &str = "LANE_DODGE_CONFIG";

/// Simulated wall time per driver frame (~60 fps)
const FRAME_MS: u64 = 16;

/// Demo stops after this much simulated time even if still alive
const DEMO_LIMIT_MS: u64 = 120_000;

fn load_config() -> Result<GameConfig, String> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)
                .map_err(|e| format!("cannot read {}: {}", path, e))?;
            GameConfig::from_json(&json).map_err(|e| e.to_string())
        }
        Err(_) => Ok(GameConfig::default()),
    }
}

/// Pick a move for the actor, in the spirit of an idle/demo mode.
///
/// Danger in a lane is the lowest obstacle that has not yet passed the actor.
/// Stay put if the current lane is clear enough, otherwise step toward the
/// clearest lane. When safe, drift toward the nearest power-up.
fn autopilot(snapshot: &Snapshot, lane_count: usize) -> Option<Command> {
    let band_top = TRACK_HEIGHT - ACTOR_TOP_OFFSET;
    let band_bottom = TRACK_HEIGHT - ACTOR_BOTTOM_OFFSET;
    let danger = |lane: usize| -> f32 {
        snapshot
            .obstacles
            .iter()
            .filter(|o| o.lane == lane && o.y < band_bottom)
            .map(|o| o.y)
            .fold(f32::MIN, f32::max)
    };

    let current = snapshot.actor_lane;
    let safe_line = band_top - 200.0;
    let target = if danger(current) < safe_line {
        // Safe: go for a power-up if one is falling somewhere reachable
        snapshot
            .power_ups
            .iter()
            .filter(|p| danger(p.lane) < safe_line)
            .max_by(|a, b| a.y.total_cmp(&b.y))
            .map(|p| p.lane)?
    } else {
        (0..lane_count).min_by(|&a, &b| {
            danger(a)
                .total_cmp(&danger(b))
                .then(a.abs_diff(current).cmp(&b.abs_diff(current)))
        })?
    };

    match target.cmp(&current) {
        std::cmp::Ordering::Less => Some(Command::MoveLeft),
        std::cmp::Ordering::Greater => Some(Command::MoveRight),
        std::cmp::Ordering::Equal => None,
    }
}

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Lane Dodge (headless demo) starting...");

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let lane_count = config.lane_count;

    let store = JsonFileStore::new(JsonFileStore::DEFAULT_FILE);
    let mut session = match Session::with_entropy(config, store) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    session.start();

    let mut elapsed = 0;
    while !session.is_game_over() && elapsed < DEMO_LIMIT_MS {
        if let Some(command) = autopilot(&session.snapshot(), lane_count) {
            session.handle(command);
        }
        session.update(FRAME_MS);
        elapsed += FRAME_MS;
    }

    match serde_json::to_string_pretty(&session.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not serialize snapshot: {}", e),
    }
    ExitCode::SUCCESS
}
