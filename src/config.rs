//! Experiment configuration.
//!
//! An [`ExperimentConfig`] describes one sweep: the workload grid, the
//! processor set and how tasks are dispatched onto it. It is read from JSON;
//! missing fields take their defaults, so `{}` is a valid configuration.
//!
//! ```json
//! {
//!   "problem_size": 500,
//!   "grid": [[2, 5], [5, 10]],
//!   "nominal_rate": 1e10,
//!   "multipliers": [1.0, 1.0, 2.0, 4.0],
//!   "task_order": "largest_first",
//!   "processor_order": "fastest_first",
//!   "strategy": { "kind": "ticker", "tick_period": 0.001 },
//!   "repetitions": 8,
//!   "shuffle": true,
//!   "base_seed": 7
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dispatching::{DispatchStrategy, ProcessorOrder, TaskOrder};
use crate::error::{ConfigError, SimulationError};
use crate::models::ProcessingUnit;
use crate::scheduler::Simulator;
use crate::sweep::SweepPlan;
use crate::validation::{validate_config, ValidationError, ValidationErrorKind};
use crate::workload::{MatrixWorkload, MAX_TASKS};

/// Rate shared by every processing unit before scaling.
pub const DEFAULT_NOMINAL_RATE: f64 = 1e10;
/// Matrix dimension of the default workload.
pub const DEFAULT_PROBLEM_SIZE: usize = 5000;

/// One sweep experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Matrix dimension.
    pub problem_size: usize,
    /// Slice sizes per grid point.
    pub grid: Vec<Vec<usize>>,
    /// Rate of a unit with multiplier 1.
    pub nominal_rate: f64,
    /// One multiplier per processing unit.
    pub multipliers: Vec<f64>,
    pub task_order: TaskOrder,
    pub processor_order: ProcessorOrder,
    pub strategy: DispatchStrategy,
    /// Runs per grid point.
    pub repetitions: usize,
    /// Shuffle tasks before sorting.
    pub shuffle: bool,
    pub base_seed: u64,
    /// Also record the completion log of the first grid point.
    pub log_events: bool,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            problem_size: DEFAULT_PROBLEM_SIZE,
            grid: vec![vec![2, 2]],
            nominal_rate: DEFAULT_NOMINAL_RATE,
            multipliers: vec![1.0; 4],
            task_order: TaskOrder::default(),
            processor_order: ProcessorOrder::default(),
            strategy: DispatchStrategy::default(),
            repetitions: 1,
            shuffle: false,
            base_seed: 0,
            log_events: false,
        }
    }
}

impl ExperimentConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks every field a sweep depends on, collecting all problems.
    pub fn validate(&self) -> Result<(), SimulationError> {
        let mut errors = validate_config(&self.processors(), &self.strategy)
            .err()
            .unwrap_or_default();

        if self.multipliers.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidRate,
                "At least one processor multiplier is required",
            ));
        }
        if self.problem_size == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidWorkload,
                "Problem size must be > 0",
            ));
        }
        for point in &self.grid {
            if point.is_empty() || point.iter().any(|&s| s == 0 || s > self.problem_size) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidWorkload,
                    format!(
                        "Grid point {point:?} needs slice sizes within 1..={}",
                        self.problem_size
                    ),
                ));
            } else if MatrixWorkload::new(self.problem_size).task_count(point) > MAX_TASKS {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidWorkload,
                    format!("Grid point {point:?} generates more than {MAX_TASKS} tasks"),
                ));
            }
        }
        if self.grid.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidSweep,
                "Sweep grid has no points",
            ));
        }
        if self.repetitions == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidSweep,
                "Repetitions must be > 0",
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SimulationError::InvalidInput(errors))
        }
    }

    /// Processing units built from the nominal rate and multipliers.
    pub fn processors(&self) -> Vec<ProcessingUnit> {
        ProcessingUnit::scaled(self.nominal_rate, &self.multipliers)
    }

    /// Sweep plan over the configured grid.
    pub fn sweep_plan(&self) -> SweepPlan {
        let plan = SweepPlan::new(self.problem_size, self.grid.clone())
            .with_repetitions(self.repetitions);
        if self.shuffle {
            plan.with_shuffle(self.base_seed)
        } else {
            plan
        }
    }

    /// Simulator carrying the configured policies and strategy.
    pub fn simulator(&self) -> Simulator {
        Simulator::new(self.strategy)
            .with_task_order(self.task_order)
            .with_processor_order(self.processor_order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExperimentConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.processors().len(), 4);
        assert!(config
            .processors()
            .iter()
            .all(|p| (p.rate - DEFAULT_NOMINAL_RATE).abs() < 1e-10));
        assert_eq!(config.strategy, DispatchStrategy::default());
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = ExperimentConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ExperimentConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            "problem_size": 60,
            "grid": [[2, 5], [5, 10]],
            "nominal_rate": 100.0,
            "multipliers": [1.0, 2.0],
            "task_order": "largest_first",
            "processor_order": "fastest_first",
            "strategy": { "kind": "ticker", "tick_period": 0.5 },
            "repetitions": 3,
            "shuffle": true,
            "base_seed": 11,
            "log_events": true
        }"#;
        let config = ExperimentConfig::from_json_str(json).unwrap();

        assert_eq!(config.problem_size, 60);
        assert_eq!(config.task_order, TaskOrder::LargestFirst);
        assert_eq!(config.processor_order, ProcessorOrder::FastestFirst);
        assert_eq!(config.strategy, DispatchStrategy::Ticker { tick_period: 0.5 });
        assert!((config.processors()[1].rate - 200.0).abs() < 1e-10);

        let plan = config.sweep_plan();
        assert_eq!(plan.grid, vec![vec![2, 5], vec![5, 10]]);
        assert_eq!(plan.repetitions, 3);
        assert!(plan.shuffle);
        assert_eq!(plan.base_seed, 11);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = ExperimentConfig {
            grid: vec![vec![3, 4]],
            strategy: DispatchStrategy::TransferAugmented {
                bandwidth: 1e9,
                connection_setup: 0.25,
            },
            ..ExperimentConfig::default()
        };
        let json = config.to_json_string().unwrap();
        let parsed = ExperimentConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_config_collects_errors() {
        let json = r#"{
            "problem_size": 10,
            "grid": [[0, 3], [20]],
            "multipliers": [],
            "repetitions": 0
        }"#;
        match ExperimentConfig::from_json_str(json) {
            Err(ConfigError::Invalid(SimulationError::InvalidInput(errors))) => {
                assert_eq!(errors.len(), 4);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_oversized_problem_rejected() {
        let config = ExperimentConfig {
            problem_size: usize::MAX / 2,
            grid: vec![vec![1]],
            ..ExperimentConfig::default()
        };
        match config.validate() {
            Err(SimulationError::InvalidInput(errors)) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].kind, ValidationErrorKind::InvalidWorkload);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            ExperimentConfig::from_json_str(r#"{"task_order": "random"}"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            ExperimentConfig::load("/nonexistent/experiment.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
