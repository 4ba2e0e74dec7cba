//! Arrival-sorted admission backlog.
//!
//! Both disciplines admit processes the same way: walk a list sorted once
//! by admission order and release every process whose arrival time has
//! passed. The cursor only moves forward, so each process is admitted
//! exactly once.

use super::RuleEngine;
use crate::models::{Process, Ticks};

/// Cursor over processes in admission order.
#[derive(Debug, Clone)]
pub struct ArrivalBacklog {
    order: Vec<usize>,
    cursor: usize,
}

impl ArrivalBacklog {
    /// Sorts `processes` into admission order (arrival, priority, id; see
    /// [`RuleEngine::admission`]) and positions the cursor at the start.
    pub fn new(processes: &[Process]) -> Self {
        Self {
            order: RuleEngine::admission().sort_indices(processes),
            cursor: 0,
        }
    }

    /// Admits every pending process that has arrived by `now`.
    ///
    /// Returns the admitted slots in admission order.
    pub fn admit(&mut self, processes: &[Process], now: Ticks) -> &[usize] {
        let start = self.cursor;
        while self.cursor < self.order.len() && processes[self.order[self.cursor]].has_arrived(now)
        {
            self.cursor += 1;
        }
        &self.order[start..self.cursor]
    }

    /// Arrival time of the next pending process.
    pub fn next_arrival(&self, processes: &[Process]) -> Option<Ticks> {
        self.order
            .get(self.cursor)
            .map(|&slot| processes[slot].arrival_time())
    }

    /// Number of processes not yet admitted.
    pub fn pending(&self) -> usize {
        self.order.len() - self.cursor
    }

    /// Whether every process has been admitted.
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.order.len()
    }
}
