//! Input validation for scheduling runs.
//!
//! Checks a process set (and, for Round-Robin, the quantum) before any
//! simulation starts. Detects:
//! - Non-positive burst times
//! - Negative arrival times
//! - Duplicate process IDs
//! - Non-positive quantum
//! - Process counts outside an optional bound
//! - Workloads whose completion time does not fit in [`Ticks`]
//!
//! All detected problems are reported together so a caller can fix its
//! input in one pass.

use std::collections::HashSet;
use std::ops::RangeInclusive;

use crate::models::{Process, Ticks};

/// Process-count range enforced by the reference input form.
pub const REFERENCE_PROCESS_COUNT: RangeInclusive<usize> = 3..=10;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A process needs zero or negative CPU time.
    NonPositiveBurst,
    /// A process arrives before the epoch.
    NegativeArrival,
    /// Two processes share the same ID.
    DuplicateId,
    /// Round-Robin quantum is zero or negative.
    NonPositiveQuantum,
    /// Number of processes is outside the configured bound.
    ProcessCountOutOfRange,
    /// Latest arrival plus total burst exceeds the clock range.
    ClockOverflow,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Optional checks layered on top of the structural ones.
#[derive(Debug, Clone, Default)]
pub struct ValidationOptions {
    /// Allowed number of processes. `None` = unbounded.
    pub process_count: Option<RangeInclusive<usize>>,
}

impl ValidationOptions {
    /// Options matching the reference input form (3 to 10 processes).
    pub fn reference() -> Self {
        Self {
            process_count: Some(REFERENCE_PROCESS_COUNT),
        }
    }

    /// Sets the allowed process-count range.
    pub fn with_process_count(mut self, range: RangeInclusive<usize>) -> Self {
        self.process_count = Some(range);
        self
    }
}

/// Validates a process set.
///
/// Checks:
/// 1. Every burst time is positive
/// 2. Every arrival time is non-negative
/// 3. No duplicate process IDs
/// 4. The run cannot outlast the clock: no schedule ends after
///    `max(arrival) + sum(burst)`, so that bound must fit in [`Ticks`]
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_processes(processes: &[Process]) -> ValidationResult {
    validate_with_options(processes, &ValidationOptions::default())
}

/// Validates a process set with additional options.
pub fn validate_with_options(
    processes: &[Process],
    options: &ValidationOptions,
) -> ValidationResult {
    let mut errors = Vec::new();

    if let Some(range) = &options.process_count {
        if !range.contains(&processes.len()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::ProcessCountOutOfRange,
                format!(
                    "Expected between {} and {} processes, got {}",
                    range.start(),
                    range.end(),
                    processes.len()
                ),
            ));
        }
    }

    let mut ids = HashSet::new();
    for p in processes {
        if !ids.insert(p.id()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate process ID: P{}", p.id()),
            ));
        }

        if p.burst_time() <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!("P{} has non-positive burst time {}", p.id(), p.burst_time()),
            ));
        }

        if p.arrival_time() < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!("P{} has negative arrival time {}", p.id(), p.arrival_time()),
            ));
        }
    }

    if completion_bound(processes).is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::ClockOverflow,
            "Latest arrival plus total burst time overflows the simulation clock",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Upper bound on every clock value a run can reach; `None` on overflow.
fn completion_bound(processes: &[Process]) -> Option<Ticks> {
    let latest_arrival = processes
        .iter()
        .map(|p| p.arrival_time().max(0))
        .max()
        .unwrap_or(0);
    processes
        .iter()
        .try_fold(latest_arrival, |acc, p| acc.checked_add(p.burst_time().max(0)))
}

/// Validates a Round-Robin quantum.
pub fn validate_quantum(quantum: Ticks) -> ValidationResult {
    if quantum > 0 {
        Ok(())
    } else {
        Err(vec![ValidationError::new(
            ValidationErrorKind::NonPositiveQuantum,
            format!("Quantum must be positive, got {quantum}"),
        )])
    }
}
