//! Non-preemptive Shortest-Job-First scheduler.
//!
//! # Algorithm
//!
//! 1. Admit every process that has arrived into a min-priority ready queue
//!    keyed by (burst, priority, arrival, id).
//! 2. Pop the best ready process and run its whole burst.
//! 3. If nothing is ready, advance the clock one tick at a time, recording
//!    a time marker for every idle tick, until the next arrival.
//!
//! # Complexity
//! O(n log n + I) where n = processes, I = idle ticks.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3.2

use tracing::{debug, info, trace};

use super::{AverageDivisor, ScheduleOutcome, Scheduler, SJF_AVERAGE_DIVISOR};
use crate::dispatching::{ArrivalBacklog, ReadyQueue, RuleEngine};
use crate::error::ScheduleError;
use crate::models::{Process, Ticks, Timeline};
use crate::validation::validate_processes;

/// Non-preemptive SJF scheduler.
///
/// # Example
///
/// ```
/// use u_cpu_sched::models::Process;
/// use u_cpu_sched::scheduler::{NonPreemptiveSjf, Scheduler};
///
/// let processes = vec![
///     Process::new(0, 0, 5),
///     Process::new(1, 0, 3),
///     Process::new(2, 1, 1),
/// ];
/// let outcome = NonPreemptiveSjf::new().schedule(&processes).unwrap();
/// assert_eq!(outcome.finishing_time(1), Some(3));
/// assert_eq!(outcome.finishing_time(2), Some(4));
/// assert_eq!(outcome.finishing_time(0), Some(9));
/// ```
#[derive(Debug, Clone)]
pub struct NonPreemptiveSjf {
    rule_engine: RuleEngine,
    average_divisor: AverageDivisor,
}

impl NonPreemptiveSjf {
    /// Creates a scheduler with the standard SJF selection order.
    pub fn new() -> Self {
        Self {
            rule_engine: RuleEngine::shortest_job_first(),
            average_divisor: SJF_AVERAGE_DIVISOR,
        }
    }

    /// Replaces the ready-queue ordering.
    ///
    /// The default is [`RuleEngine::shortest_job_first`].
    pub fn with_rule_engine(mut self, engine: RuleEngine) -> Self {
        self.rule_engine = engine;
        self
    }

    /// Sets the divisor policy for the averages.
    pub fn with_average_divisor(mut self, divisor: AverageDivisor) -> Self {
        self.average_divisor = divisor;
        self
    }
}

impl Default for NonPreemptiveSjf {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for NonPreemptiveSjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn schedule(&self, processes: &[Process]) -> Result<ScheduleOutcome, ScheduleError> {
        validate_processes(processes)?;

        let mut working: Vec<Process> = processes.iter().map(Process::restarted).collect();
        let mut backlog = ArrivalBacklog::new(&working);
        let mut ready = ReadyQueue::new(self.rule_engine.clone());
        let mut timeline = Timeline::new();
        let mut now: Ticks = 0;
        let mut unfinished = working.len();

        while unfinished > 0 {
            for &slot in backlog.admit(&working, now) {
                ready.push(slot, &working[slot]);
            }

            match ready.pop() {
                Some(slot) => {
                    let process = &mut working[slot];
                    let burst = process.burst_time();
                    let start = now;
                    now += process.run_for(burst, start);
                    timeline.push_work(process.id(), start, now);
                    unfinished -= 1;
                    debug!(process = process.id(), start, end = now, "dispatched to completion");
                }
                None => {
                    let Some(next) = backlog.next_arrival(&working) else {
                        break;
                    };
                    trace!(from = now, until = next, "cpu idle");
                    while now < next {
                        now += 1;
                        timeline.push_idle_marker(now);
                    }
                }
            }
        }

        info!(
            scheduler = self.name(),
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
    use crate::dispatching::rules;
    use crate::models::Segment;
    use crate::scheduler::AverageDivisor;
    use crate::validation::ValidationErrorKind;
    use crate::workload::WorkloadGenerator;

    fn make_process(id: usize, arrival: Ticks, burst: Ticks, priority: i32) -> Process {
        Process::new(id, arrival, burst).with_priority(priority)
    }

    #[test]
    fn test_shortest_ready_burst_first() {
        let processes = vec![
            make_process(0, 0, 5, 0),
            make_process(1, 0, 3, 0),
            make_process(2, 1, 1, 0),
        ];
        let outcome = NonPreemptiveSjf::new().schedule(&processes).unwrap();

        assert_eq!(
            outcome.timeline.segments(),
            &[
                Segment::new(1, 0, 3),
                Segment::new(2, 3, 4),
                Segment::new(0, 4, 9),
            ]
        );
        assert_eq!(outcome.timeline.time_markers(), &[0, 3, 4, 9]);
        assert_eq!(outcome.finishing_time(1), Some(3));
        assert_eq!(outcome.finishing_time(2), Some(4));
        assert_eq!(outcome.finishing_time(0), Some(9));
    }

    #[test]
    fn test_non_preemptive() {
        // P1 arrives shorter while P0 is running; P0 still finishes first
        let processes = vec![make_process(0, 0, 6, 0), make_process(1, 1, 1, 0)];
        let outcome = NonPreemptiveSjf::new().schedule(&processes).unwrap();

        assert_eq!(outcome.finishing_time(0), Some(6));
        assert_eq!(outcome.finishing_time(1), Some(7));
        assert_eq!(outcome.timeline.segment_count(), 2);
    }

    #[test]
    fn test_priority_then_arrival_then_id_tie_break() {
        let processes = vec![
            make_process(0, 0, 2, 5),
            make_process(1, 0, 2, 1),
            make_process(2, 0, 2, 1),
            make_process(3, 0, 9, 0),
        ];
        let outcome = NonPreemptiveSjf::new().schedule(&processes).unwrap();
        let order: Vec<usize> = outcome
            .timeline
            .segments()
            .iter()
            .map(|s| s.process_id)
            .collect();
        // Burst 2 group: priority 1 (ids 1, 2 by id) before priority 5
        assert_eq!(order, vec![1, 2, 0, 3]);
    }

    #[test]
    fn test_arrival_breaks_tie_when_both_ready() {
        // Both ready at t=4 with equal burst and priority; earlier arrival wins
        let processes = vec![
            make_process(0, 0, 4, 0),
            make_process(1, 3, 2, 0),
            make_process(2, 1, 2, 0),
        ];
        let outcome = NonPreemptiveSjf::new().schedule(&processes).unwrap();
        assert_eq!(outcome.finishing_time(2), Some(6));
        assert_eq!(outcome.finishing_time(1), Some(8));
    }

    #[test]
    fn test_idle_ticks_recorded_as_markers() {
        let processes = vec![make_process(0, 5, 2, 0)];
        let outcome = NonPreemptiveSjf::new().schedule(&processes).unwrap();

        assert_eq!(outcome.timeline.time_markers(), &[0, 1, 2, 3, 4, 5, 7]);
        assert_eq!(outcome.timeline.segments(), &[Segment::new(0, 5, 7)]);
        assert_eq!(outcome.finishing_time(0), Some(7));
    }

    #[test]
    fn test_idle_gap_between_processes() {
        let processes = vec![make_process(0, 0, 1, 0), make_process(1, 3, 1, 0)];
        let outcome = NonPreemptiveSjf::new().schedule(&processes).unwrap();
        assert_eq!(outcome.timeline.time_markers(), &[0, 1, 2, 3, 4]);
        assert_eq!(outcome.timeline.idle_time(), 2);
    }

    #[test]
    fn test_averages_divide_by_process_count() {
        let processes = vec![
            make_process(0, 0, 5, 0),
            make_process(1, 0, 3, 0),
            make_process(2, 1, 1, 0),
        ];
        let outcome = NonPreemptiveSjf::new().schedule(&processes).unwrap();
        assert!((outcome.average_turnaround_time().unwrap() - 5.0).abs() < 1e-10);
        assert!((outcome.average_waiting_time().unwrap() - 2.0).abs() < 1e-10);

        // One segment per process, so the policy makes no difference
        let by_process = NonPreemptiveSjf::new()
            .with_average_divisor(AverageDivisor::ProcessCount)
            .schedule(&processes)
            .unwrap();
        assert_eq!(
            by_process.average_turnaround_time(),
            outcome.average_turnaround_time()
        );
    }

    #[test]
    fn test_input_not_mutated() {
        let processes = vec![make_process(0, 0, 3, 0)];
        let outcome = NonPreemptiveSjf::new().schedule(&processes).unwrap();

        assert_eq!(processes[0].remaining_time(), 3);
        assert_eq!(processes[0].finishing_time(), None);
        assert_eq!(outcome.processes[0].remaining_time(), 0);
    }

    #[test]
    fn test_empty_process_set() {
        let outcome = NonPreemptiveSjf::new().schedule(&[]).unwrap();
        assert!(outcome.timeline.is_empty());
        assert_eq!(outcome.timeline.time_markers(), &[0]);
        assert_eq!(outcome.average_turnaround_time(), None);
        assert_eq!(outcome.average_waiting_time(), None);
    }

    #[test]
    fn test_invalid_input_rejected() {
        let processes = vec![make_process(0, -1, 0, 0)];
        let err = NonPreemptiveSjf::new().schedule(&processes).unwrap_err();
        let ScheduleError::InvalidInput(errors) = err;
        let kinds: Vec<_> = errors.into_iter().map(|e| e.kind).collect();
        assert!(kinds.contains(&ValidationErrorKind::NonPositiveBurst));
        assert!(kinds.contains(&ValidationErrorKind::NegativeArrival));
    }

    #[test]
    fn test_clock_overflow_rejected() {
        let processes = vec![
            make_process(0, 0, Ticks::MAX, 0),
            make_process(1, 0, Ticks::MAX, 0),
        ];
        let ScheduleError::InvalidInput(errors) =
            NonPreemptiveSjf::new().schedule(&processes).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::ClockOverflow);
    }

    #[test]
    fn test_custom_rule_engine() {
        // Pure FIFO selection turns SJF into FCFS
        let engine = RuleEngine::new()
            .with_rule(rules::Fifo)
            .with_final_tie_breaker(crate::dispatching::TieBreaker::ById);
        let processes = vec![make_process(0, 0, 5, 0), make_process(1, 0, 1, 0)];
        let outcome = NonPreemptiveSjf::new()
            .with_rule_engine(engine)
            .schedule(&processes)
            .unwrap();
        assert_eq!(outcome.finishing_time(0), Some(5));
        assert_eq!(outcome.finishing_time(1), Some(6));
    }

    #[test]
    fn test_random_workloads_hold_invariants() {
        let scheduler = NonPreemptiveSjf::new();
        for seed in 0..50 {
            let processes = WorkloadGenerator::new(seed).with_count(8).generate();
            let outcome = scheduler.schedule(&processes).unwrap();

            assert!(outcome.processes.iter().all(Process::is_complete));
            for p in &outcome.processes {
                let finish = p.finishing_time().unwrap();
                assert!(finish >= p.arrival_time());
                assert!(finish >= p.burst_time());
                assert_eq!(outcome.timeline.segments_for(p.id()).len(), 1);
            }

            let total_burst: Ticks = processes.iter().map(|p| p.burst_time()).sum();
            assert_eq!(outcome.timeline.busy_time(), total_burst);
            assert_eq!(outcome.timeline.segment_count(), processes.len());
        }
    }
}
