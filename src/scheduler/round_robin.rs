//! Round-Robin scheduler.
//!
//! # Algorithm
//!
//! 1. Sort processes once by (arrival, priority, id); this only fixes the
//!    admission order of simultaneous arrivals.
//! 2. Each iteration admits every arrived process to the back of a FIFO
//!    queue, then dispatches the front process for at most one quantum.
//! 3. A preempted process is re-queued immediately, before the next
//!    admission step, so arrivals during its slice queue behind it.
//! 4. Idle time leaves no segment and no time marker.
//!
//! # Complexity
//! O(n log n + B / q) where B = total burst, q = quantum.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3.3

use std::collections::VecDeque;

use tracing::{debug, info, trace};

use super::{AverageDivisor, ScheduleOutcome, Scheduler, ROUND_ROBIN_AVERAGE_DIVISOR};
use crate::dispatching::ArrivalBacklog;
use crate::error::ScheduleError;
use crate::models::{Process, Ticks, Timeline};
use crate::validation::{validate_processes, validate_quantum};

/// Round-Robin scheduler with a fixed time quantum.
///
/// Turnaround and waiting averages default to
/// [`ROUND_ROBIN_AVERAGE_DIVISOR`] (total segment count).
///
/// # Example
///
/// ```
/// use u_cpu_sched::models::Process;
/// use u_cpu_sched::scheduler::{RoundRobin, Scheduler};
///
/// let processes = vec![Process::new(0, 0, 4), Process::new(1, 1, 2)];
/// let outcome = RoundRobin::new(2).schedule(&processes).unwrap();
/// assert_eq!(outcome.finishing_time(0), Some(4));
/// assert_eq!(outcome.finishing_time(1), Some(6));
/// ```
#[derive(Debug, Clone)]
pub struct RoundRobin {
    quantum: Ticks,
    average_divisor: AverageDivisor,
}

impl RoundRobin {
    /// Creates a scheduler with the given quantum.
    ///
    /// The quantum is validated when [`Scheduler::schedule`] runs.
    pub fn new(quantum: Ticks) -> Self {
        Self {
            quantum,
            average_divisor: ROUND_ROBIN_AVERAGE_DIVISOR,
        }
    }

    /// Sets the divisor policy for the averages.
    pub fn with_average_divisor(mut self, divisor: AverageDivisor) -> Self {
        self.average_divisor = divisor;
        self
    }

    /// The configured quantum.
    pub fn quantum(&self) -> Ticks {
        self.quantum
    }
}

impl Scheduler for RoundRobin {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn schedule(&self, processes: &[Process]) -> Result<ScheduleOutcome, ScheduleError> {
        let mut errors = Vec::new();
        if let Err(e) = validate_quantum(self.quantum) {
            errors.extend(e);
        }
        if let Err(e) = validate_processes(processes) {
            errors.extend(e);
        }
        if !errors.is_empty() {
            return Err(ScheduleError::InvalidInput(errors));
        }

        let mut working: Vec<Process> = processes.iter().map(Process::restarted).collect();
        let mut backlog = ArrivalBacklog::new(&working);
        let mut queue: VecDeque<usize> = VecDeque::with_capacity(working.len());
        let mut timeline = Timeline::new();
        let mut now: Ticks = 0;

        while !backlog.is_exhausted() || !queue.is_empty() {
            queue.extend(backlog.admit(&working, now));

            match queue.pop_front() {
                Some(slot) => {
                    let process = &mut working[slot];
                    let start = now;
                    now += process.run_for(self.quantum, start);
                    timeline.push_work(process.id(), start, now);

                    if process.is_complete() {
                        debug!(process = process.id(), start, end = now, "completed");
                    } else {
                        debug!(
                            process = process.id(),
                            start,
                            end = now,
                            remaining = process.remaining_time(),
                            "preempted"
                        );
                        queue.push_back(slot);
                    }
                }
                None => {
                    // Idle ticks are silent, so jump straight to the next arrival
                    if let Some(next) = backlog.next_arrival(&working) {
                        trace!(from = now, until = next, "cpu idle");
                        now = next;
                    }
                }
            }
        }

        info!(
            scheduler = self.name(),
            quantum = self.quantum,
            processes = working.len(),
            segments = timeline.segment_count(),
            makespan = timeline.makespan(),
            "schedule complete"
        );

        Ok(ScheduleOutcome {
            processes: working,
            timeline,
            average_divisor: self.average_divisor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Segment;
    use crate::validation::ValidationErrorKind;
    use crate::workload::WorkloadGenerator;

    fn make_process(id: usize, arrival: Ticks, burst: Ticks, priority: i32) -> Process {
        Process::new(id, arrival, burst).with_priority(priority)
    }

    fn order(outcome: &ScheduleOutcome) -> Vec<usize> {
        outcome
            .timeline
            .segments()
            .iter()
            .map(|s| s.process_id)
            .collect()
    }

    #[test]
    fn test_preempted_process_stays_ahead_of_mid_quantum_arrival() {
        let processes = vec![make_process(0, 0, 4, 0), make_process(1, 1, 2, 0)];
        let outcome = RoundRobin::new(2).schedule(&processes).unwrap();

        assert_eq!(
            outcome.timeline.segments(),
            &[
                Segment::new(0, 0, 2),
                Segment::new(0, 2, 4),
                Segment::new(1, 4, 6),
            ]
        );
        assert_eq!(outcome.finishing_time(0), Some(4));
        assert_eq!(outcome.finishing_time(1), Some(6));
    }

    #[test]
    fn test_rotation() {
        let processes = vec![
            make_process(0, 0, 5, 0),
            make_process(1, 0, 3, 0),
            make_process(2, 0, 1, 0),
        ];
        let outcome = RoundRobin::new(2).schedule(&processes).unwrap();

        assert_eq!(order(&outcome), vec![0, 1, 2, 0, 1, 0]);
        assert_eq!(outcome.timeline.time_markers(), &[0, 2, 4, 5, 7, 8, 9]);
        assert_eq!(outcome.finishing_time(2), Some(5));
        assert_eq!(outcome.finishing_time(1), Some(8));
        assert_eq!(outcome.finishing_time(0), Some(9));
    }

    #[test]
    fn test_priority_only_orders_simultaneous_admission() {
        let processes = vec![
            make_process(0, 0, 2, 3),
            make_process(1, 0, 2, 1),
            // Arrives later with the best priority: still admitted last
            make_process(2, 1, 2, -5),
        ];
        let outcome = RoundRobin::new(1).schedule(&processes).unwrap();
        assert_eq!(order(&outcome), vec![1, 0, 1, 2, 0, 2]);
    }

    #[test]
    fn test_burst_equal_to_quantum_completes_in_one_slice() {
        let processes = vec![make_process(0, 0, 3, 0)];
        let scheduler = RoundRobin::new(3);
        assert_eq!(scheduler.quantum(), 3);
        let outcome = scheduler.schedule(&processes).unwrap();
        assert_eq!(outcome.timeline.segments(), &[Segment::new(0, 0, 3)]);
    }

    #[test]
    fn test_idle_advance_is_silent() {
        let processes = vec![make_process(0, 5, 2, 0)];
        let outcome = RoundRobin::new(4).schedule(&processes).unwrap();

        assert_eq!(outcome.timeline.time_markers(), &[0, 7]);
        assert_eq!(outcome.timeline.segments(), &[Segment::new(0, 5, 7)]);
        assert_eq!(outcome.finishing_time(0), Some(7));
    }

    #[test]
    fn test_average_divides_by_segment_count() {
        // P0 preempted twice (3 segments), P1 completes in one segment
        let processes = vec![make_process(0, 0, 5, 0), make_process(1, 0, 2, 0)];
        let outcome = RoundRobin::new(2).schedule(&processes).unwrap();

        // P0 0..2, P1 2..4, P0 4..6, P0 6..7
        assert_eq!(outcome.timeline.segments_for(0).len(), 3);
        assert_eq!(outcome.timeline.segments_for(1).len(), 1);
        assert_eq!(outcome.divisor(), 4);

        // Turnaround: P0 7, P1 4 → 11; waiting: P0 2, P1 2 → 4
        assert_eq!(outcome.total_turnaround_time(), 11);
        assert_eq!(outcome.total_waiting_time(), 4);
        assert!((outcome.average_turnaround_time().unwrap() - 2.75).abs() < 1e-10);
        assert!((outcome.average_waiting_time().unwrap() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_average_by_process_count_override() {
        let processes = vec![make_process(0, 0, 5, 0), make_process(1, 0, 2, 0)];
        let outcome = RoundRobin::new(2)
            .with_average_divisor(AverageDivisor::ProcessCount)
            .schedule(&processes)
            .unwrap();

        assert_eq!(outcome.divisor(), 2);
        assert!((outcome.average_turnaround_time().unwrap() - 5.5).abs() < 1e-10);
        assert!((outcome.average_waiting_time().unwrap() - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_non_positive_quantum_rejected() {
        let processes = vec![make_process(0, 0, 2, 0)];
        for quantum in [0, -3] {
            let ScheduleError::InvalidInput(errors) =
                RoundRobin::new(quantum).schedule(&processes).unwrap_err();
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].kind, ValidationErrorKind::NonPositiveQuantum);
        }
    }

    #[test]
    fn test_quantum_and_process_errors_reported_together() {
        let processes = vec![make_process(0, 0, 0, 0)];
        let ScheduleError::InvalidInput(errors) =
            RoundRobin::new(0).schedule(&processes).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_clock_overflow_rejected() {
        let processes = vec![make_process(0, Ticks::MAX - 1, 5, 0)];
        let ScheduleError::InvalidInput(errors) =
            RoundRobin::new(2).schedule(&processes).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::ClockOverflow);
    }

    #[test]
    fn test_empty_process_set() {
        let outcome = RoundRobin::new(2).schedule(&[]).unwrap();
        assert!(outcome.timeline.is_empty());
        assert_eq!(outcome.timeline.time_markers(), &[0]);
        assert_eq!(outcome.average_turnaround_time(), None);
        assert_eq!(outcome.average_waiting_time(), None);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let forward = vec![make_process(0, 0, 3, 0), make_process(1, 0, 3, 0)];
        let reversed: Vec<Process> = forward.iter().rev().cloned().collect();

        let a = RoundRobin::new(1).schedule(&forward).unwrap();
        let b = RoundRobin::new(1).schedule(&reversed).unwrap();
        assert_eq!(a.timeline, b.timeline);
    }

    #[test]
    fn test_random_workloads_hold_invariants() {
        for seed in 0..50 {
            let processes = WorkloadGenerator::new(seed).with_count(8).generate();
            let quantum = (seed as Ticks % 4) + 1;
            let outcome = RoundRobin::new(quantum).schedule(&processes).unwrap();

            assert!(outcome.processes.iter().all(Process::is_complete));
            for p in &outcome.processes {
                let finish = p.finishing_time().unwrap();
                assert!(finish >= p.arrival_time());
                assert!(finish >= p.burst_time());
                for s in outcome.timeline.segments_for(p.id()) {
                    assert!(s.duration() <= quantum);
                    assert!(s.start >= p.arrival_time());
                }
            }

            let total_burst: Ticks = processes.iter().map(|p| p.burst_time()).sum();
            assert_eq!(outcome.timeline.busy_time(), total_burst);
            assert_eq!(
                outcome.timeline.time_markers().len(),
                outcome.timeline.segment_count() + 1
            );
        }
    }
}
