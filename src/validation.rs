//! Input validation for simulation runs.
//!
//! Checks the parsed process set and run configuration before any
//! algorithm starts. Detects:
//! - Duplicate process IDs
//! - Negative arrival times
//! - Non-positive burst times
//! - Time horizons past `i64::MAX`
//! - Missing or non-positive round-robin quantum

use crate::models::Process;
use std::collections::HashSet;
use std::fmt;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two processes share the same ID.
    DuplicateId,
    /// A process arrives before t=0.
    NegativeArrival,
    /// A process requires no CPU time (or less).
    NonPositiveBurst,
    /// Latest arrival plus total burst does not fit in `i64`.
    TimeOverflow,
    /// Round robin was given a quantum of zero or less.
    InvalidQuantum,
    /// Round robin was requested without a quantum.
    MissingQuantum,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates a process set.
///
/// Checks:
/// 1. No duplicate process IDs
/// 2. Every arrival time is `>= 0`
/// 3. Every burst time is `> 0`
/// 4. Latest arrival plus total burst fits in `i64`, which bounds every
///    time any algorithm can reach
///
/// An empty set is valid.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_processes(processes: &[Process]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for p in processes {
        if !ids.insert(p.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate process ID: {}", p.id),
            ));
        }

        if p.arrival_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!(
                    "Process '{}' has negative arrival time {}",
                    p.id, p.arrival_time
                ),
            ));
        }

        if p.burst_time <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!(
                    "Process '{}' has non-positive burst time {}",
                    p.id, p.burst_time
                ),
            ));
        }
    }

    if time_horizon(processes).is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::TimeOverflow,
            "Latest arrival plus total burst time exceeds the simulation clock range",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Upper bound on the simulation clock, `None` on overflow.
fn time_horizon(processes: &[Process]) -> Option<i64> {
    let latest_arrival = processes
        .iter()
        .map(|p| p.arrival_time)
        .max()
        .unwrap_or(0)
        .max(0);
    processes
        .iter()
        .try_fold(latest_arrival, |acc, p| acc.checked_add(p.burst_time.max(0)))
}

/// Joins a list of validation errors into one diagnostic line each.
pub fn describe(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
