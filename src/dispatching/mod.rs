//! Dispatching rules, ready queue and admission backlog.
//!
//! A scheduler decides *when* a process may run; this module decides
//! *which* ready process runs next and in what order arrivals are admitted.
//!
//! # Usage
//!
//! ```
//! use u_cpu_sched::dispatching::{RuleEngine, TieBreaker};
//! use u_cpu_sched::dispatching::rules;
//!
//! // Shortest burst first, then priority, then arrival, then lowest id.
//! let engine = RuleEngine::new()
//!     .with_rule(rules::Spt)
//!     .with_rule(rules::Priority)
//!     .with_rule(rules::Fifo)
//!     .with_final_tie_breaker(TieBreaker::ById);
//! ```
//!
//! # Score Convention
//! All rules return integer scores; **lower score = dispatched first**.
//! Integer scores keep selection exactly reproducible.

mod backlog;
mod engine;
mod ready;
pub mod rules;

pub use backlog::ArrivalBacklog;
pub use engine::{DispatchKey, RuleEngine, TieBreaker};
pub use ready::ReadyQueue;

use crate::models::Process;
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (dispatched first).
pub type RuleScore = i64;

/// A dispatching rule that scores a process for selection.
///
/// # Score Convention
/// **Lower score = higher priority.**
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "SPT", "FIFO").
    fn name(&self) -> &'static str;

    /// Scores a process. Lower = dispatched earlier.
    fn evaluate(&self, process: &Process) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
