//! Session-level state: phase, actor, commands and score bookkeeping

use serde::{Deserialize, Serialize};

use super::entities::Lane;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Constructed, `start` not yet called
    Ready,
    /// Active gameplay
    Running,
    /// Every periodic activity frozen
    Paused,
    /// Terminal until `reset`
    GameOver,
}

/// Discrete commands from the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    MoveLeft,
    MoveRight,
    TogglePause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// The player's car
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub lane: Lane,
}

impl Actor {
    pub fn new(lane: Lane) -> Self {
        Self { lane }
    }

    /// Move one lane, saturating at the track edges
    pub fn shift(&mut self, direction: Direction, lane_count: usize) {
        self.lane = match direction {
            Direction::Left => self.lane.saturating_sub(1),
            Direction::Right => (self.lane + 1).min(lane_count.saturating_sub(1)),
        };
    }
}

/// Timer and score accumulation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    /// Whole seconds survived
    pub timer: u64,
    pub score: u64,
    pub high_score: u64,
}

impl ScoreBoard {
    /// Count one elapsed second. Returns true if this set a new high score.
    pub fn tick_second(&mut self, points: u64) -> bool {
        self.timer += 1;
        self.score += points;
        self.commit()
    }

    /// Raise the high score to the current score if beaten
    pub fn commit(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }

    /// Zero the run, keep the high score
    pub fn reset_run(&mut self) {
        self.timer = 0;
        self.score = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_shift_saturates() {
        let mut actor = Actor::new(0);
        actor.shift(Direction::Left, 5);
        assert_eq!(actor.lane, 0);

        let mut actor = Actor::new(4);
        actor.shift(Direction::Right, 5);
        assert_eq!(actor.lane, 4);
        actor.shift(Direction::Left, 5);
        assert_eq!(actor.lane, 3);
    }

    #[test]
    fn test_tick_second() {
        let mut board = ScoreBoard {
            high_score: 15,
            ..Default::default()
        };
        assert!(!board.tick_second(10));
        assert_eq!((board.timer, board.score, board.high_score), (1, 10, 15));
        assert!(board.tick_second(10));
        assert_eq!(board.high_score, 20);

        board.reset_run();
        assert_eq!((board.timer, board.score, board.high_score), (0, 0, 20));
    }

    proptest! {
        #[test]
        fn prop_lane_stays_on_track(
            start in 0usize..5,
            moves in proptest::collection::vec(any::<bool>(), 0..200),
        ) {
            let mut actor = Actor::new(start);
            for right in moves {
                let direction = if right { Direction::Right } else { Direction::Left };
                actor.shift(direction, 5);
                prop_assert!(actor.lane < 5);
            }
        }
    }
}
