//! Named, cancelable periodic tasks
//!
//! Every piece of periodic work in a session is one [`Task`] with an explicit
//! handle here. Pause, reset and game-over call [`Scheduler::cancel_all`], so
//! nothing from a previous phase can fire afterwards.

use serde::{Deserialize, Serialize};

/// Periodic activities. Declaration order is the within-tick firing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Task {
    /// Obstacle / power-up spawn decision
    Spawn,
    /// Motion, collision and effect clock
    Frame,
    /// Timer and score accumulation
    Score,
    /// Ordinary difficulty growth
    SpeedIncrement,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    task: Task,
    period_ms: u64,
    remaining_ms: u64,
}

/// Owns all scheduled tasks for one session
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    entries: Vec<Entry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` every `period_ms`, first firing one full period from now.
    /// Replaces any existing schedule for the same task.
    pub fn every(&mut self, task: Task, period_ms: u64) {
        debug_assert!(period_ms > 0, "period must be non-zero");
        self.cancel(task);
        self.entries.push(Entry {
            task,
            period_ms,
            remaining_ms: period_ms,
        });
    }

    /// Returns true if the task was scheduled
    pub fn cancel(&mut self, task: Task) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.task != task);
        self.entries.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    pub fn is_scheduled(&self, task: Task) -> bool {
        self.entries.iter().any(|e| e.task == task)
    }

    pub fn is_idle(&self) -> bool {
        self.entries.is_empty()
    }

    /// Time until `task` next fires
    pub fn remaining(&self, task: Task) -> Option<u64> {
        self.entries
            .iter()
            .find(|e| e.task == task)
            .map(|e| e.remaining_ms)
    }

    /// Advance the clock and return every firing in canonical task order.
    ///
    /// A task whose period is shorter than `dt_ms` appears once per elapsed period.
    pub fn advance(&mut self, dt_ms: u64) -> Vec<Task> {
        let mut fired = Vec::new();
        for entry in &mut self.entries {
            let mut elapsed = dt_ms;
            while elapsed >= entry.remaining_ms {
                elapsed -= entry.remaining_ms;
                entry.remaining_ms = entry.period_ms;
                fired.push(entry.task);
            }
            entry.remaining_ms -= elapsed;
        }
        fired.sort();
        fired
    }
}
