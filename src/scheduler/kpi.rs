//! Schedule quality metrics (KPIs).
//!
//! Computes per-process and aggregate performance indicators from a
//! completed scheduling run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Turnaround | finishing - arrival |
//! | Waiting | turnaround - burst |
//! | Response | first dispatch - arrival |
//! | Makespan | end of the last segment |
//! | Utilization | busy time / makespan |
//! | Throughput | completed processes / makespan |
//!
//! Average turnaround and waiting divide by an [`AverageDivisor`]; the
//! other averages always divide by the process count.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use serde::{Deserialize, Serialize};

use super::ScheduleOutcome;
use crate::models::{ProcessId, Ticks};

/// Denominator used for average turnaround and waiting time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AverageDivisor {
    /// Divide by the number of processes.
    ProcessCount,
    /// Divide by the number of work segments. A process preempted `k`
    /// times contributes `k + 1` to the divisor but only once to the sums.
    SegmentCount,
}

/// Divisor used by [`NonPreemptiveSjf`](super::NonPreemptiveSjf). One
/// segment per process, so both policies agree.
pub const SJF_AVERAGE_DIVISOR: AverageDivisor = AverageDivisor::SegmentCount;

/// Divisor used by [`RoundRobin`](super::RoundRobin) unless overridden.
/// Reproduces the reference tool, which divides by every recorded slice.
pub const ROUND_ROBIN_AVERAGE_DIVISOR: AverageDivisor = AverageDivisor::SegmentCount;

impl AverageDivisor {
    /// Resolves the divisor for a run.
    pub fn resolve(self, process_count: usize, segment_count: usize) -> usize {
        match self {
            Self::ProcessCount => process_count,
            Self::SegmentCount => segment_count,
        }
    }
}

/// Average of `total` over `count`; `None` when `count` is zero.
pub fn average(total: Ticks, count: usize) -> Option<f64> {
    if count == 0 {
        None
    } else {
        Some(total as f64 / count as f64)
    }
}

/// One row of per-process results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    /// Process ID.
    pub id: ProcessId,
    /// Arrival time.
    pub arrival_time: Ticks,
    /// Burst time.
    pub burst_time: Ticks,
    /// Tie-break priority.
    pub priority: i32,
    /// Completion time.
    pub finishing_time: Ticks,
    /// finishing - arrival.
    pub turnaround_time: Ticks,
    /// turnaround - burst.
    pub waiting_time: Ticks,
    /// first dispatch - arrival.
    pub response_time: Ticks,
}

/// Scheduling performance indicators.
///
/// Averages are `None` when undefined (empty process set).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleKpi {
    /// Divisor policy used for the turnaround/waiting averages.
    pub average_divisor: AverageDivisor,
    /// Average turnaround time.
    pub avg_turnaround_time: Option<f64>,
    /// Average waiting time.
    pub avg_waiting_time: Option<f64>,
    /// Average response time (always over the process count).
    pub avg_response_time: Option<f64>,
    /// End of the last work segment.
    pub makespan: Ticks,
    /// Ticks spent running processes.
    pub busy_time: Ticks,
    /// Ticks the CPU sat idle before the makespan.
    pub idle_time: Ticks,
    /// busy / makespan (0.0..1.0).
    pub utilization: Option<f64>,
    /// Completed processes per tick.
    pub throughput: Option<f64>,
    /// Number of work segments (dispatches).
    pub segment_count: usize,
    /// Per-process rows, ordered by process ID.
    pub per_process: Vec<ProcessMetrics>,
}

impl ScheduleKpi {
    /// Computes KPIs from a finished run.
    pub fn calculate(outcome: &ScheduleOutcome) -> Self {
        let timeline = &outcome.timeline;

        let mut per_process: Vec<ProcessMetrics> = outcome
            .processes
            .iter()
            .filter_map(|p| {
                let finishing_time = p.finishing_time()?;
                let first_start = timeline.first_start(p.id())?;
                Some(ProcessMetrics {
                    id: p.id(),
                    arrival_time: p.arrival_time(),
                    burst_time: p.burst_time(),
                    priority: p.priority(),
                    finishing_time,
                    turnaround_time: finishing_time - p.arrival_time(),
                    waiting_time: finishing_time - p.arrival_time() - p.burst_time(),
                    response_time: first_start - p.arrival_time(),
                })
            })
            .collect();
        per_process.sort_by_key(|m| m.id);

        let completed = per_process.len();
        let total_response: Ticks = per_process.iter().map(|m| m.response_time).sum();

        let makespan = timeline.makespan();
        let busy_time = timeline.busy_time();
        let (utilization, throughput) = if makespan > 0 {
            (
                Some(busy_time as f64 / makespan as f64),
                Some(completed as f64 / makespan as f64),
            )
        } else {
            (None, None)
        };

        Self {
            average_divisor: outcome.average_divisor,
            avg_turnaround_time: outcome.average_turnaround_time(),
            avg_waiting_time: outcome.average_waiting_time(),
            avg_response_time: average(total_response, completed),
            makespan,
            busy_time,
            idle_time: timeline.idle_time(),
            utilization,
            throughput,
            segment_count: timeline.segment_count(),
            per_process,
        }
    }

    /// Metrics row for a process.
    pub fn process(&self, id: ProcessId) -> Option<&ProcessMetrics> {
        self.per_process.iter().find(|m| m.id == id)
    }
}
