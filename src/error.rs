//! Error types for simulation entry points and configuration loading.
//!
//! Every simulation error is detected before or right after a run; none is
//! recoverable mid-simulation.

use thiserror::Error;

use crate::models::JobId;
use crate::validation::ValidationError;

/// Errors surfaced by the driver, the reducer and the sweep controller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Configuration or input values failed validation.
    #[error("invalid input: {}", join_messages(.0))]
    InvalidInput(Vec<ValidationError>),

    /// Tasks were supplied but there is nothing to run them on.
    #[error("no processing units available for {tasks} task(s)")]
    NoProcessors { tasks: usize },

    /// An ordering policy name did not match any known policy.
    #[error("unknown ordering policy: {0}")]
    UnknownPolicy(String),

    /// A task carries a job id outside the expected job range.
    #[error("job id {job_id} is outside the expected range of {hint} job(s)")]
    JobOutOfRange { job_id: JobId, hint: usize },

    /// An expected job never appeared in the completion log.
    #[error("job {job_id} has no completed tasks (expected {hint} job(s))")]
    MissingJob { job_id: usize, hint: usize },
}

/// Errors raised while loading an experiment configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Filesystem I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse/deserialization error.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The parsed configuration is unusable.
    #[error(transparent)]
    Invalid(#[from] SimulationError),
}

impl From<Vec<ValidationError>> for SimulationError {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_invalid_input_display_joins_messages() {
        let err = SimulationError::from(vec![
            ValidationError::new(ValidationErrorKind::InvalidRate, "rate 0 at index 1"),
            ValidationError::new(ValidationErrorKind::InvalidBandwidth, "bandwidth -1"),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid input: rate 0 at index 1; bandwidth -1"
        );
    }

    #[test]
    fn test_job_errors_display() {
        let err = SimulationError::JobOutOfRange { job_id: 4, hint: 2 };
        assert_eq!(
            err.to_string(),
            "job id 4 is outside the expected range of 2 job(s)"
        );
        let err = SimulationError::MissingJob { job_id: 1, hint: 2 };
        assert!(err.to_string().contains("job 1"));
    }
}
