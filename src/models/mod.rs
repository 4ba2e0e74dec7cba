//! CPU scheduling domain models.
//!
//! Provides the data types shared by every scheduling discipline: the
//! per-process simulation state and the timeline a scheduler produces.
//!
//! # Domain Mappings
//!
//! | u-cpu-sched | Operating systems | Batch queue |
//! |-------------|-------------------|-------------|
//! | Process | Task / thread | Job |
//! | ProcessSpec | Task descriptor | Job submission |
//! | Segment | CPU burst slice | Execution slot |
//! | Timeline | Gantt chart | Run log |

mod process;
mod timeline;

pub use process::{Process, ProcessId, ProcessSpec, Ticks};
pub use timeline::{IdleGap, Segment, Timeline};
