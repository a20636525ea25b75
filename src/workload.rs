//! Block matrix-multiplication workload generator.
//!
//! Partitions an `N x N` by `N x N` product into square slices of size `s`.
//! With `n = N / s` full slices per side and remainder `r = N mod s`:
//!
//! | Tasks | Count | Block shape `(m, n, k)` |
//! |-------|-------|-------------------------|
//! | full | `n²` | `(s, s, s)` |
//! | edge | `2n` if `r > 0` | `(r, s, s)` |
//! | corner | `1` if `r > 0` | `(r, s, r)` |
//!
//! Each slice size becomes one job; job ids are assigned densely from 0 in
//! slice order, so comparing two partitionings yields jobs 0 and 1.

use crate::error::SimulationError;
use crate::models::{JobId, Task};
use crate::validation::{ValidationError, ValidationErrorKind};

/// Cost of multiplying an `m x n` block by an `n x k` block.
///
/// `m * k * (n * multiplication_to_addition + ln n)`.
pub fn complexity(m: usize, n: usize, k: usize, multiplication_to_addition: f64) -> f64 {
    let n_f = n as f64;
    m as f64 * k as f64 * (n_f * multiplication_to_addition + n_f.ln())
}

/// Elements moved to the processor for an `(m, n, k)` block task: both
/// operand blocks.
///
/// Saturates at `u64::MAX`.
pub fn payload(m: usize, n: usize, k: usize) -> u64 {
    let (m, n, k) = (m as u64, n as u64, k as u64);
    m.saturating_mul(n).saturating_add(n.saturating_mul(k))
}

/// Largest task stream a workload may generate.
pub const MAX_TASKS: usize = u32::MAX as usize;

/// Number of tasks produced for one slice size.
///
/// Saturates at `usize::MAX`.
pub fn task_count(problem_size: usize, slice_size: usize) -> usize {
    let full = problem_size / slice_size;
    let side = if problem_size % slice_size == 0 {
        full
    } else {
        full + 1
    };
    side.saturating_mul(side)
}

/// Matrix-multiplication workload of a fixed problem size.
///
/// # Example
/// ```
/// use u_makespan::workload::MatrixWorkload;
///
/// let tasks = MatrixWorkload::new(10).create_tasks(&[5, 3]).unwrap();
/// // 5 divides 10: 4 blocks. 3 leaves remainder 1: 9 + 6 + 1 blocks.
/// assert_eq!(tasks.iter().filter(|t| t.job_id == 0).count(), 4);
/// assert_eq!(tasks.iter().filter(|t| t.job_id == 1).count(), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixWorkload {
    /// Matrix dimension `N`.
    pub problem_size: usize,
    /// Relative cost of a multiplication versus an addition.
    pub multiplication_to_addition: f64,
}

impl MatrixWorkload {
    /// Creates a workload with equal multiplication and addition cost.
    pub fn new(problem_size: usize) -> Self {
        Self {
            problem_size,
            multiplication_to_addition: 1.0,
        }
    }

    /// Sets the multiplication-to-addition cost ratio.
    pub fn with_multiplication_cost(mut self, ratio: f64) -> Self {
        self.multiplication_to_addition = ratio;
        self
    }

    /// Total number of tasks for the given slice sizes, saturating.
    pub fn task_count(&self, slice_sizes: &[usize]) -> usize {
        slice_sizes
            .iter()
            .filter(|&&s| s > 0)
            .map(|&s| task_count(self.problem_size, s))
            .fold(0, usize::saturating_add)
    }

    /// Generates the task stream, one job per slice size.
    ///
    /// # Errors
    /// [`SimulationError::InvalidInput`] if the problem size is zero, no
    /// slice sizes are given, there are more slice sizes than job ids, a
    /// slice size is outside `1..=problem_size`, or the stream would exceed
    /// [`MAX_TASKS`].
    pub fn create_tasks(&self, slice_sizes: &[usize]) -> Result<Vec<Task>, SimulationError> {
        self.validate(slice_sizes)?;

        let mut tasks = Vec::with_capacity(self.task_count(slice_sizes));
        for (job, &slice) in slice_sizes.iter().enumerate() {
            self.push_slice_tasks(&mut tasks, slice, job as JobId);
        }
        Ok(tasks)
    }

    fn push_slice_tasks(&self, tasks: &mut Vec<Task>, s: usize, job_id: JobId) {
        let n = self.problem_size / s;
        let r = self.problem_size % s;
        let ratio = self.multiplication_to_addition;

        let full = Task::new(complexity(s, s, s, ratio), job_id).with_payload(payload(s, s, s));
        tasks.extend(std::iter::repeat(full).take(n * n));

        if r > 0 {
            let edge =
                Task::new(complexity(r, s, s, ratio), job_id).with_payload(payload(r, s, s));
            tasks.extend(std::iter::repeat(edge).take(2 * n));
            let corner = Task::new(complexity(r, s, r, ratio), job_id);
            tasks.push(corner.with_payload(payload(r, s, r)));
        }
    }

    fn validate(&self, slice_sizes: &[usize]) -> Result<(), SimulationError> {
        let mut errors = Vec::new();
        let invalid =
            |message: String| ValidationError::new(ValidationErrorKind::InvalidWorkload, message);

        if self.problem_size == 0 {
            errors.push(invalid("Problem size must be > 0".into()));
        }
        if slice_sizes.is_empty() {
            errors.push(invalid("At least one slice size is required".into()));
        }
        if slice_sizes.len() > JobId::MAX as usize + 1 {
            errors.push(invalid(format!(
                "{} slice sizes exceed the {} available job ids",
                slice_sizes.len(),
                JobId::MAX as usize + 1
            )));
        }
        for &s in slice_sizes {
            if s == 0 || s > self.problem_size {
                errors.push(invalid(format!(
                    "Slice size {s} must be within 1..={}",
                    self.problem_size
                )));
            }
        }
        let total = self.task_count(slice_sizes);
        if total > MAX_TASKS {
            errors.push(invalid(format!(
                "Workload would generate {total} tasks, more than {MAX_TASKS}"
            )));
        }
        if !self.multiplication_to_addition.is_finite() || self.multiplication_to_addition < 0.0 {
            errors.push(invalid(format!(
                "Multiplication cost ratio must be >= 0, got {}",
                self.multiplication_to_addition
            )));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SimulationError::InvalidInput(errors))
        }
    }
}

/// Generates tasks for `problem_size` with unit multiplication cost.
pub fn create_tasks(
    problem_size: usize,
    slice_sizes: &[usize],
) -> Result<Vec<Task>, SimulationError> {
    MatrixWorkload::new(problem_size).create_tasks(slice_sizes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complexity() {
        // 2 * 3 * (4 + ln 4)
        let expected = 6.0 * (4.0 + 4.0_f64.ln());
        assert!((complexity(2, 4, 3, 1.0) - expected).abs() < 1e-10);
        // ln 1 = 0
        assert!((complexity(1, 1, 1, 1.0) - 1.0).abs() < 1e-10);
        assert!((complexity(2, 4, 3, 2.0) - 6.0 * (8.0 + 4.0_f64.ln())).abs() < 1e-10);
    }

    #[test]
    fn test_task_count() {
        assert_eq!(task_count(10, 5), 4);
        assert_eq!(task_count(10, 3), 16);
        assert_eq!(task_count(10, 10), 1);
        assert_eq!(task_count(7, 1), 49);
    }

    #[test]
    fn test_even_partition() {
        let tasks = create_tasks(10, &[5]).unwrap();
        assert_eq!(tasks.len(), 4);
        let expected = complexity(5, 5, 5, 1.0);
        assert!(tasks.iter().all(|t| (t.work_amount - expected).abs() < 1e-10));
        assert!(tasks.iter().all(|t| t.payload_size == 50));
        assert!(tasks.iter().all(|t| t.job_id == 0));
    }

    #[test]
    fn test_partition_with_remainder() {
        let tasks = create_tasks(10, &[3]).unwrap();
        assert_eq!(tasks.len(), task_count(10, 3));

        let full = complexity(3, 3, 3, 1.0);
        let edge = complexity(1, 3, 3, 1.0);
        let corner = complexity(1, 3, 1, 1.0);
        let count = |c: f64| tasks.iter().filter(|t| (t.work_amount - c).abs() < 1e-10).count();
        assert_eq!(count(full), 9);
        assert_eq!(count(edge), 6);
        assert_eq!(count(corner), 1);

        let last = tasks.last().unwrap();
        assert_eq!(last.payload_size, payload(1, 3, 1));
    }

    #[test]
    fn test_jobs_per_slice_size() {
        let workload = MatrixWorkload::new(12);
        let tasks = workload.create_tasks(&[4, 6, 5]).unwrap();
        assert_eq!(tasks.len(), workload.task_count(&[4, 6, 5]));
        assert_eq!(tasks.iter().filter(|t| t.job_id == 0).count(), 9);
        assert_eq!(tasks.iter().filter(|t| t.job_id == 1).count(), 4);
        assert_eq!(tasks.iter().filter(|t| t.job_id == 2).count(), 9);
    }

    #[test]
    fn test_total_work_grows_with_multiplication_cost() {
        let cheap: f64 = MatrixWorkload::new(8)
            .create_tasks(&[3])
            .unwrap()
            .iter()
            .map(|t| t.work_amount)
            .sum();
        let costly: f64 = MatrixWorkload::new(8)
            .with_multiplication_cost(4.0)
            .create_tasks(&[3])
            .unwrap()
            .iter()
            .map(|t| t.work_amount)
            .sum();
        assert!(costly > cheap);
    }

    #[test]
    fn test_huge_problem_does_not_overflow() {
        let huge = usize::MAX / 2;
        assert_eq!(task_count(huge, 1), usize::MAX);
        assert_eq!(payload(huge, huge, huge), u64::MAX);
        assert!(complexity(huge, 2, huge, 1.0).is_finite());

        match create_tasks(huge, &[1]) {
            Err(SimulationError::InvalidInput(errors)) => {
                assert!(errors[0].message.contains("tasks"));
            }
            other => panic!("unexpected result: {:?}", other.map(|t| t.len())),
        }
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(create_tasks(0, &[1]).is_err());
        assert!(create_tasks(10, &[]).is_err());
        assert!(create_tasks(10, &[0]).is_err());
        assert!(create_tasks(10, &[11]).is_err());

        let too_many = vec![1; 257];
        match create_tasks(10, &too_many) {
            Err(SimulationError::InvalidInput(errors)) => {
                assert!(errors
                    .iter()
                    .all(|e| e.kind == ValidationErrorKind::InvalidWorkload));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
