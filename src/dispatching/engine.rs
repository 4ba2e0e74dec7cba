//! Rule engine for multi-criteria dispatching.
//!
//! Composes dispatching rules lexicographically: the second rule is only
//! consulted when the first ties, and so on. A final tie-breaker makes the
//! order total.
//!
//! # Reference
//! Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use std::cmp::Ordering;
use std::sync::Arc;

use super::{rules, DispatchingRule, RuleScore};
use crate::models::Process;

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Keep the order in which processes were presented (stable).
    #[default]
    InsertionOrder,
    /// Deterministic by process ID (ascending).
    ById,
}

/// Fully evaluated ordering key of one process.
///
/// Compares rule scores lexicographically, then the tie-break value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DispatchKey {
    scores: Vec<RuleScore>,
    tie: usize,
}

impl DispatchKey {
    /// Rule scores in rule order.
    pub fn scores(&self) -> &[RuleScore] {
        &self.scores
    }
}

/// A composable rule engine for process selection.
///
/// # Example
/// ```
/// use u_cpu_sched::dispatching::RuleEngine;
/// use u_cpu_sched::models::Process;
///
/// let engine = RuleEngine::shortest_job_first();
/// let ready = vec![Process::new(0, 0, 5), Process::new(1, 0, 3)];
/// assert_eq!(engine.select_best(&ready), Some(1));
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
    tie_breaker: TieBreaker,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            tie_breaker: TieBreaker::InsertionOrder,
        }
    }

    /// Non-preemptive SJF selection: burst, priority, arrival, then id.
    pub fn shortest_job_first() -> Self {
        Self::new()
            .with_rule(rules::Spt)
            .with_rule(rules::Priority)
            .with_rule(rules::Fifo)
            .with_final_tie_breaker(TieBreaker::ById)
    }

    /// Admission order: arrival, then priority, then id.
    pub fn admission() -> Self {
        Self::new()
            .with_rule(rules::Fifo)
            .with_rule(rules::Priority)
            .with_final_tie_breaker(TieBreaker::ById)
    }

    /// Appends a rule; earlier rules dominate later ones.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// The configured tie-breaker.
    pub fn tie_breaker(&self) -> TieBreaker {
        self.tie_breaker
    }

    /// Builds the ordering key of a process.
    ///
    /// `insertion` is the position used by [`TieBreaker::InsertionOrder`].
    pub fn key(&self, process: &Process, insertion: usize) -> DispatchKey {
        let tie = match self.tie_breaker {
            TieBreaker::InsertionOrder => insertion,
            TieBreaker::ById => process.id(),
        };
        DispatchKey {
            scores: self.evaluate(process),
            tie,
        }
    }

    /// Evaluates a single process and returns scores from each rule.
    pub fn evaluate(&self, process: &Process) -> Vec<RuleScore> {
        self.rules.iter().map(|r| r.evaluate(process)).collect()
    }

    /// Compares two processes (lower = dispatched first).
    pub fn compare(&self, a: &Process, b: &Process) -> Ordering {
        for rule in &self.rules {
            match rule.evaluate(a).cmp(&rule.evaluate(b)) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }

        // All rules tied → use final tie-breaker
        match self.tie_breaker {
            TieBreaker::InsertionOrder => Ordering::Equal,
            TieBreaker::ById => a.id().cmp(&b.id()),
        }
    }

    /// Returns indices into `processes`, sorted by dispatch order.
    pub fn sort_indices(&self, processes: &[Process]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..processes.len()).collect();
        // Stable sort keeps insertion order for full ties
        indices.sort_by(|&a, &b| self.compare(&processes[a], &processes[b]));
        indices
    }

    /// Returns the index of the process that should run first.
    pub fn select_best(&self, processes: &[Process]) -> Option<usize> {
        self.sort_indices(processes).first().copied()
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field(
                "rules",
                &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}
