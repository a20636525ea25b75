//! Task model.
//!
//! A task is an independent unit of compute work produced by partitioning a
//! larger workload. Tasks are immutable once created and are moved (not
//! copied) into completion events when a dispatch strategy consumes them.

use serde::{Deserialize, Serialize};

/// Identifier of the job (problem instance) a task belongs to.
///
/// Job ids are small and dense: a run comparing two partitionings has jobs
/// `0` and `1`.
pub type JobId = u8;

/// A task to be dispatched onto a processing unit.
///
/// # Units
/// `work_amount` is an abstract compute cost (e.g. floating point operations),
/// not wall-clock time. `payload_size` is measured in transfer units
/// (elements), consumed by transfer-aware dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Abstract compute cost.
    pub work_amount: f64,
    /// Size of the input data that must reach the processor before compute.
    pub payload_size: u64,
    /// Owning job.
    pub job_id: JobId,
}

impl Task {
    /// Creates a task with no payload.
    pub fn new(work_amount: f64, job_id: JobId) -> Self {
        Self {
            work_amount,
            payload_size: 0,
            job_id,
        }
    }

    /// Sets the payload size.
    pub fn with_payload(mut self, payload_size: u64) -> Self {
        self.payload_size = payload_size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_builder() {
        let task = Task::new(12.5, 3).with_payload(200);
        assert!((task.work_amount - 12.5).abs() < 1e-10);
        assert_eq!(task.payload_size, 200);
        assert_eq!(task.job_id, 3);
    }

    #[test]
    fn test_task_default_payload() {
        let task = Task::new(1.0, 0);
        assert_eq!(task.payload_size, 0);
    }

    #[test]
    fn test_task_serde() {
        let task = Task::new(4.0, 1).with_payload(8);
        let json = serde_json::to_string(&task).unwrap();
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
    }
}
