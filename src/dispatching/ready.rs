//! Min-priority ready queue.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::{DispatchKey, RuleEngine};
use crate::models::Process;

/// Ready set ordered by a [`RuleEngine`].
///
/// Entries are slots (indices into the scheduler's working process list).
/// Keys are computed once on insertion; the processes must not change their
/// rule-relevant fields while queued.
#[derive(Debug)]
pub struct ReadyQueue {
    engine: RuleEngine,
    heap: BinaryHeap<Reverse<(DispatchKey, usize)>>,
    inserted: usize,
}

impl ReadyQueue {
    /// Creates an empty queue ordered by `engine`.
    pub fn new(engine: RuleEngine) -> Self {
        Self {
            engine,
            heap: BinaryHeap::new(),
            inserted: 0,
        }
    }

    /// Inserts the process stored at `slot`.
    pub fn push(&mut self, slot: usize, process: &Process) {
        let key = self.engine.key(process, self.inserted);
        self.inserted += 1;
        self.heap.push(Reverse((key, slot)));
    }

    /// Removes and returns the slot of the best ready process.
    pub fn pop(&mut self) -> Option<usize> {
        self.heap.pop().map(|Reverse((_, slot))| slot)
    }

    /// Number of ready processes.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether no process is ready.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
