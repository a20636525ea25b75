//! Input validation for simulation runs.
//!
//! Checks configuration and task values before a run starts. Detects:
//! - Non-positive or non-finite processor rates
//! - Invalid strategy parameters (bandwidth, connection setup, tick period)
//! - Negative or non-finite task work
//!
//! All problems are collected, not just the first.

use crate::dispatching::DispatchStrategy;
use crate::models::{ProcessingUnit, Task};

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
    /// A processor rate is zero, negative or not finite.
    InvalidRate,
    /// Transfer bandwidth is zero, negative or not finite.
    InvalidBandwidth,
    /// Connection setup time is negative or not finite.
    InvalidConnectionSetup,
    /// Tick period is negative or not finite.
    InvalidTickPeriod,
    /// A task's work amount is negative or not finite.
    InvalidWork,
    /// Workload generation parameters are unusable.
    InvalidWorkload,
    /// Sweep plan has no points or no repetitions.
    InvalidSweep,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates processors and dispatch parameters.
///
/// Checks:
/// 1. Every processor rate is finite and > 0
/// 2. Transfer bandwidth is finite and > 0, connection setup finite and >= 0
/// 3. Tick period is finite and >= 0
pub fn validate_config(
    processors: &[ProcessingUnit],
    strategy: &DispatchStrategy,
) -> ValidationResult {
    let mut errors = Vec::new();
    check_processors(processors, &mut errors);
    check_strategy(strategy, &mut errors);
    finish(errors)
}

/// Validates everything a run consumes: processors, strategy and tasks.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    processors: &[ProcessingUnit],
    tasks: &[Task],
    strategy: &DispatchStrategy,
) -> ValidationResult {
    let mut errors = Vec::new();
    check_processors(processors, &mut errors);
    check_strategy(strategy, &mut errors);

    for (index, task) in tasks.iter().enumerate() {
        if !task.work_amount.is_finite() || task.work_amount < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidWork,
                format!(
                    "Task {index} (job {}) has invalid work amount {}",
                    task.job_id, task.work_amount
                ),
            ));
        }
    }

    finish(errors)
}

fn check_processors(processors: &[ProcessingUnit], errors: &mut Vec<ValidationError>) {
    for (index, p) in processors.iter().enumerate() {
        if !p.rate.is_finite() || p.rate <= 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidRate,
                format!("Processor {index} has invalid rate {}", p.rate),
            ));
        }
    }
}

fn check_strategy(strategy: &DispatchStrategy, errors: &mut Vec<ValidationError>) {
    match *strategy {
        DispatchStrategy::Immediate => {}
        DispatchStrategy::Ticker { tick_period } => {
            if !tick_period.is_finite() || tick_period < 0.0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidTickPeriod,
                    format!("Tick period must be >= 0, got {tick_period}"),
                ));
            }
        }
        DispatchStrategy::TransferAugmented {
            bandwidth,
            connection_setup,
        } => {
            if !bandwidth.is_finite() || bandwidth <= 0.0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidBandwidth,
                    format!("Bandwidth must be > 0, got {bandwidth}"),
                ));
            }
            if !connection_setup.is_finite() || connection_setup < 0.0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidConnectionSetup,
                    format!("Connection setup must be >= 0, got {connection_setup}"),
                ));
            }
        }
    }
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
