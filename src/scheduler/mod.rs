//! CPU schedulers and KPI evaluation.
//!
//! # Disciplines
//!
//! - [`NonPreemptiveSjf`]: runs the shortest ready burst to completion.
//! - [`RoundRobin`]: FIFO rotation with a fixed time quantum.
//!
//! Every scheduler is a pure function over an input snapshot: the caller's
//! processes are never modified, and the finished copies are returned in a
//! [`ScheduleOutcome`] together with the [`Timeline`].
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod kpi;
mod round_robin;
mod sjf;

pub use kpi::{
    average, AverageDivisor, ProcessMetrics, ScheduleKpi, ROUND_ROBIN_AVERAGE_DIVISOR,
    SJF_AVERAGE_DIVISOR,
};
pub use round_robin::RoundRobin;
pub use sjf::NonPreemptiveSjf;

use std::fmt::Debug;

use crate::error::ScheduleError;
use crate::models::{Process, ProcessId, Ticks, Timeline};

/// A CPU scheduling discipline.
pub trait Scheduler: Send + Sync + Debug {
    /// Short name (e.g., "SJF", "RR").
    fn name(&self) -> &'static str;

    /// Simulates `processes` to completion.
    ///
    /// Input is validated first; the processes themselves are left
    /// untouched and restarted copies are simulated.
    fn schedule(&self, processes: &[Process]) -> Result<ScheduleOutcome, ScheduleError>;
}

/// Result of one scheduling run.
#[derive(Debug, Clone)]
pub struct ScheduleOutcome {
    /// Finished processes, in input order.
    pub processes: Vec<Process>,
    /// Execution record.
    pub timeline: Timeline,
    /// Divisor policy for the turnaround/waiting averages.
    pub average_divisor: AverageDivisor,
}

impl ScheduleOutcome {
    /// Finished state of a process.
    pub fn process(&self, id: ProcessId) -> Option<&Process> {
        self.processes.iter().find(|p| p.id() == id)
    }

    /// Finishing time of a process.
    pub fn finishing_time(&self, id: ProcessId) -> Option<Ticks> {
        self.process(id).and_then(Process::finishing_time)
    }

    /// Sum of turnaround times over finished processes.
    pub fn total_turnaround_time(&self) -> Ticks {
        self.processes.iter().filter_map(Process::turnaround_time).sum()
    }

    /// Sum of waiting times over finished processes.
    pub fn total_waiting_time(&self) -> Ticks {
        self.processes.iter().filter_map(Process::waiting_time).sum()
    }

    /// Number the turnaround/waiting sums are divided by.
    pub fn divisor(&self) -> usize {
        self.average_divisor
            .resolve(self.processes.len(), self.timeline.segment_count())
    }

    /// Average turnaround time; `None` for an empty run.
    pub fn average_turnaround_time(&self) -> Option<f64> {
        average(self.total_turnaround_time(), self.divisor())
    }

    /// Average waiting time; `None` for an empty run.
    pub fn average_waiting_time(&self) -> Option<f64> {
        average(self.total_waiting_time(), self.divisor())
    }

    /// Computes the full KPI set.
    pub fn kpi(&self) -> ScheduleKpi {
        ScheduleKpi::calculate(self)
    }
}

/// One row of an algorithm comparison.
#[derive(Debug, Clone)]
pub struct Comparison {
    /// Scheduler name.
    pub name: &'static str,
    /// Run result.
    pub outcome: ScheduleOutcome,
    /// Run KPIs.
    pub kpi: ScheduleKpi,
}

/// Runs several schedulers on the same snapshot.
///
/// Each scheduler works on its own copy, so results are independent.
pub fn compare(
    processes: &[Process],
    schedulers: &[&dyn Scheduler],
) -> Result<Vec<Comparison>, ScheduleError> {
    schedulers
        .iter()
        .map(|s| {
            let outcome = s.schedule(processes)?;
            let kpi = outcome.kpi();
            Ok(Comparison {
                name: s.name(),
                outcome,
                kpi,
            })
        })
        .collect()
}
