//! Built-in dispatching rules.
//!
//! - **Time-based**: SPT
//! - **Queue**: FIFO
//! - **Priority**: PRIORITY
//!
//! # Score Convention
//! All rules return lower scores for processes that should run first.

use super::{DispatchingRule, RuleScore};
use crate::models::Process;

/// Shortest Processing Time.
///
/// Prioritizes processes with the shorter total burst. This is the primary
/// key of non-preemptive SJF.
///
/// # Reference
/// Smith (1956), optimal for minimizing mean flow time on a single machine.
#[derive(Debug, Clone, Copy)]
pub struct Spt;

impl DispatchingRule for Spt {
    fn name(&self) -> &'static str {
        "SPT"
    }

    fn evaluate(&self, process: &Process) -> RuleScore {
        process.burst_time()
    }

    fn description(&self) -> &'static str {
        "Shortest Processing Time"
    }
}

/// First In, First Out.
///
/// Prioritizes processes that arrived earlier.
#[derive(Debug, Clone, Copy)]
pub struct Fifo;

impl DispatchingRule for Fifo {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn evaluate(&self, process: &Process) -> RuleScore {
        process.arrival_time()
    }

    fn description(&self) -> &'static str {
        "First In, First Out"
    }
}

/// Static priority.
///
/// Lower priority value = more important, so the value is used as-is.
#[derive(Debug, Clone, Copy)]
pub struct Priority;

impl DispatchingRule for Priority {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, process: &Process) -> RuleScore {
        RuleScore::from(process.priority())
    }

    fn description(&self) -> &'static str {
        "Static Priority (lower value first)"
    }
}
