//! Process model.
//!
//! A process is one unit of CPU work submitted to the simulator. The
//! immutable part (arrival, burst, priority) comes from a [`ProcessSpec`];
//! the mutable part (remaining time, finishing time) is advanced by the
//! schedulers through [`Process::run_for`].
//!
//! # Time Representation
//! All times are integer clock ticks relative to the simulation epoch (t=0).

use serde::{Deserialize, Serialize};

/// Process identifier (0-indexed, creation order).
pub type ProcessId = usize;

/// Simulation clock value, in ticks.
pub type Ticks = i64;

/// Input record describing one process before ids are assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    /// Clock value at which the process becomes eligible to run.
    pub arrival_time: Ticks,
    /// Total CPU time required.
    pub burst_time: Ticks,
    /// Tie-break priority (lower = more important).
    #[serde(default)]
    pub priority: i32,
}

impl ProcessSpec {
    /// Creates a spec with priority 0.
    pub fn new(arrival_time: Ticks, burst_time: Ticks) -> Self {
        Self {
            arrival_time,
            burst_time,
            priority: 0,
        }
    }

    /// Sets the tie-break priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Materializes the spec as a fresh process with the given id.
    pub fn into_process(self, id: ProcessId) -> Process {
        Process::new(id, self.arrival_time, self.burst_time).with_priority(self.priority)
    }
}

/// Simulation state of a single process.
///
/// Identity fields are fixed at construction. `remaining_time` stays within
/// `[0, burst_time]` and `finishing_time` is set exactly once, on the tick
/// where `remaining_time` reaches zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Process {
    id: ProcessId,
    arrival_time: Ticks,
    burst_time: Ticks,
    priority: i32,
    remaining_time: Ticks,
    finishing_time: Option<Ticks>,
}

impl Process {
    /// Creates a new, unstarted process.
    pub fn new(id: ProcessId, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Self {
            id,
            arrival_time,
            burst_time,
            priority: 0,
            remaining_time: burst_time,
            finishing_time: None,
        }
    }

    /// Sets the tie-break priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Unique process identifier.
    #[inline]
    pub fn id(&self) -> ProcessId {
        self.id
    }

    /// Arrival time (ticks).
    #[inline]
    pub fn arrival_time(&self) -> Ticks {
        self.arrival_time
    }

    /// Total CPU time required (ticks).
    #[inline]
    pub fn burst_time(&self) -> Ticks {
        self.burst_time
    }

    /// Tie-break priority (lower = more important).
    #[inline]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Copy of this process with its simulation state cleared.
    pub fn restarted(&self) -> Self {
        Self {
            remaining_time: self.burst_time,
            finishing_time: None,
            ..self.clone()
        }
    }

    /// CPU time still owed to this process.
    #[inline]
    pub fn remaining_time(&self) -> Ticks {
        self.remaining_time
    }

    /// Completion clock value, `None` while the process is unfinished.
    #[inline]
    pub fn finishing_time(&self) -> Option<Ticks> {
        self.finishing_time
    }

    /// Whether the process has received its full burst.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.remaining_time == 0
    }

    /// Whether the process has arrived by `now`.
    #[inline]
    pub fn has_arrived(&self, now: Ticks) -> bool {
        self.arrival_time <= now
    }

    /// Runs the process for up to `slice` ticks starting at `now`.
    ///
    /// Returns the number of ticks actually consumed (never more than the
    /// remaining time). When the process completes, its finishing time is
    /// recorded as `now + consumed`.
    ///
    /// A non-positive slice, or a process that already completed, consumes
    /// nothing and leaves the state untouched.
    pub fn run_for(&mut self, slice: Ticks, now: Ticks) -> Ticks {
        if slice <= 0 || self.is_complete() {
            return 0;
        }

        let consumed = slice.min(self.remaining_time);
        self.remaining_time -= consumed;

        if self.remaining_time == 0 {
            let finish = now + consumed;
            debug_assert!(
                finish >= self.arrival_time,
                "P{} cannot finish before it arrives",
                self.id
            );
            self.finishing_time = Some(finish);
        }

        consumed
    }

    /// Turnaround time: `finishing - arrival`.
    pub fn turnaround_time(&self) -> Option<Ticks> {
        self.finishing_time.map(|f| f - self.arrival_time)
    }

    /// Waiting time: `turnaround - burst`.
    pub fn waiting_time(&self) -> Option<Ticks> {
        self.turnaround_time().map(|t| t - self.burst_time)
    }
}
