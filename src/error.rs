//! Error types.

use crate::validation::ValidationError;

/// Errors produced by a scheduling run.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ScheduleError {
    /// Input failed validation; every detected problem is listed.
    #[error("invalid input: {}", join_messages(.0))]
    InvalidInput(Vec<ValidationError>),
}

/// Errors produced while loading or saving a workload.
#[derive(Debug, thiserror::Error)]
pub enum WorkloadError {
    /// Reading or writing the workload file failed.
    #[error("workload i/o failed: {0}")]
    Io(#[from] std::io::Error),
    /// The workload is not valid JSON for the expected schema.
    #[error("malformed workload: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<Vec<ValidationError>> for ScheduleError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::InvalidInput(errors)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
