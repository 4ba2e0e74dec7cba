//! Deterministic CPU scheduling simulator.
//!
//! Simulates a fixed, fully known process set on a single CPU and produces
//! the execution timeline plus turnaround and waiting metrics.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `ProcessSpec`, `Segment`, `Timeline`
//! - **`dispatching`**: Selection rules, rule engine, ready queue, arrival backlog
//! - **`scheduler`**: `NonPreemptiveSjf`, `RoundRobin`, KPIs, algorithm comparison
//! - **`validation`**: Input checks (burst, arrival, quantum, duplicate IDs)
//! - **`workload`**: JSON workload records and seeded workload generation
//! - **`gantt`**: Text rendering of timelines
//!
//! # Example
//!
//! ```
//! use u_cpu_sched::models::ProcessSpec;
//! use u_cpu_sched::scheduler::{RoundRobin, Scheduler};
//! use u_cpu_sched::workload::Workload;
//!
//! let workload = Workload::new(vec![ProcessSpec::new(0, 4), ProcessSpec::new(1, 2)]);
//! let outcome = RoundRobin::new(2).schedule(&workload.to_processes()).unwrap();
//! assert_eq!(outcome.timeline.makespan(), 6);
//! ```
//!
//! # Logging
//!
//! The library emits `tracing` events (dispatches at `debug`, idle spans at
//! `trace`, one summary per run at `info`) and never installs a subscriber.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod dispatching;
pub mod error;
pub mod gantt;
pub mod models;
pub mod scheduler;
pub mod validation;
pub mod workload;

pub use error::{ScheduleError, WorkloadError};
pub use scheduler::{NonPreemptiveSjf, RoundRobin, ScheduleOutcome, Scheduler};
