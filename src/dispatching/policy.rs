//! Task and processor ordering policies.
//!
//! Each run sorts its task stream and processor list once, before dispatch.
//! Combining the two policies gives four pairing regimes, e.g. largest task
//! to the fastest processor, or smallest task first onto the slowest.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;
use crate::models::{ProcessingUnit, Task};

/// Order in which tasks are handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskOrder {
    /// Ascending `work_amount`.
    #[default]
    SmallestFirst,
    /// Descending `work_amount`.
    LargestFirst,
}

/// Order in which processors are seeded and indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessorOrder {
    /// Ascending `rate`.
    #[default]
    SlowestFirst,
    /// Descending `rate`.
    FastestFirst,
}

impl TaskOrder {
    /// Compares two tasks under this policy.
    pub fn compare(self, a: &Task, b: &Task) -> Ordering {
        match self {
            Self::SmallestFirst => a.work_amount.total_cmp(&b.work_amount),
            Self::LargestFirst => b.work_amount.total_cmp(&a.work_amount),
        }
    }

    /// Stable-sorts tasks in place.
    pub fn sort(self, tasks: &mut [Task]) {
        tasks.sort_by(|a, b| self.compare(a, b));
    }

    /// Canonical policy name.
    pub fn name(self) -> &'static str {
        match self {
            Self::SmallestFirst => "smallest_first",
            Self::LargestFirst => "largest_first",
        }
    }
}

impl ProcessorOrder {
    /// Compares two processors under this policy.
    pub fn compare(self, a: &ProcessingUnit, b: &ProcessingUnit) -> Ordering {
        match self {
            Self::SlowestFirst => a.rate.total_cmp(&b.rate),
            Self::FastestFirst => b.rate.total_cmp(&a.rate),
        }
    }

    /// Stable-sorts processors in place.
    pub fn sort(self, processors: &mut [ProcessingUnit]) {
        processors.sort_by(|a, b| self.compare(a, b));
    }

    /// Canonical policy name.
    pub fn name(self) -> &'static str {
        match self {
            Self::SlowestFirst => "slowest_first",
            Self::FastestFirst => "fastest_first",
        }
    }
}

impl FromStr for TaskOrder {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "smallest_first" | "small_first" => Ok(Self::SmallestFirst),
            "largest_first" | "large_first" => Ok(Self::LargestFirst),
            _ => Err(SimulationError::UnknownPolicy(s.to_string())),
        }
    }
}

impl FromStr for ProcessorOrder {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "slowest_first" | "slow_first" => Ok(Self::SlowestFirst),
            "fastest_first" | "fast_first" => Ok(Self::FastestFirst),
            _ => Err(SimulationError::UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for TaskOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for ProcessorOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
