//! Workload input records.
//!
//! A workload is the single structured input of a simulation run: the
//! process specs (ids are assigned by position) and an optional quantum.
//! Workloads are read from and written to JSON, or generated from a seed
//! for reproducible experiments.
//!
//! ```json
//! {
//!   "quantum": 2,
//!   "processes": [
//!     { "arrival_time": 0, "burst_time": 5, "priority": 1 },
//!     { "arrival_time": 1, "burst_time": 3 }
//!   ]
//! }
//! ```

use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::WorkloadError;
use crate::models::{Process, ProcessSpec, Ticks};

/// A complete simulation input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    /// Round-Robin quantum. `None` = supplied elsewhere (e.g. CLI flag).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantum: Option<Ticks>,
    /// Process specs; a spec's position becomes its process ID.
    pub processes: Vec<ProcessSpec>,
}

impl Workload {
    /// Creates a workload from specs.
    pub fn new(processes: Vec<ProcessSpec>) -> Self {
        Self {
            quantum: None,
            processes,
        }
    }

    /// Sets the quantum.
    pub fn with_quantum(mut self, quantum: Ticks) -> Self {
        self.quantum = Some(quantum);
        self
    }

    /// Materializes the specs as processes with ids `0..n`.
    pub fn to_processes(&self) -> Vec<Process> {
        self.processes
            .iter()
            .cloned()
            .enumerate()
            .map(|(id, spec)| spec.into_process(id))
            .collect()
    }

    /// Parses a workload from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, WorkloadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the workload as pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, WorkloadError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reads a workload file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WorkloadError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Writes the workload to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), WorkloadError> {
        fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}

/// Seeded random workload generator.
///
/// The same seed and settings always produce the same workload.
#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    seed: u64,
    count: usize,
    arrival: RangeInclusive<Ticks>,
    burst: RangeInclusive<Ticks>,
    priority: RangeInclusive<i32>,
}

impl WorkloadGenerator {
    /// Creates a generator: 5 processes, arrivals in 0..=10, bursts in
    /// 1..=10, priorities in 0..=5.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            count: 5,
            arrival: 0..=10,
            burst: 1..=10,
            priority: 0..=5,
        }
    }

    /// Sets the number of processes.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Sets the arrival-time range.
    pub fn with_arrival(mut self, range: RangeInclusive<Ticks>) -> Self {
        self.arrival = range;
        self
    }

    /// Sets the burst-time range.
    pub fn with_burst(mut self, range: RangeInclusive<Ticks>) -> Self {
        self.burst = range;
        self
    }

    /// Sets the priority range.
    pub fn with_priority(mut self, range: RangeInclusive<i32>) -> Self {
        self.priority = range;
        self
    }

    /// Generates the process specs.
    ///
    /// # Panics
    /// Panics if any configured range is empty.
    pub fn generate_workload(&self) -> Workload {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let processes = (0..self.count)
            .map(|_| {
                ProcessSpec::new(
                    rng.random_range(self.arrival.clone()),
                    rng.random_range(self.burst.clone()),
                )
                .with_priority(rng.random_range(self.priority.clone()))
            })
            .collect();
        Workload::new(processes)
    }

    /// Generates processes with ids `0..count`.
    pub fn generate(&self) -> Vec<Process> {
        self.generate_workload().to_processes()
    }
}
