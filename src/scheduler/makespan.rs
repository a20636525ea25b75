//! Per-job makespan reduction and run summaries.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Job makespan | End time of the job's last completed task |
//! | Makespan (C_max) | Latest end time across all jobs |
//! | Utilization | Processor busy time / makespan |
//! | Idle time | Makespan - busy time, summed over processors |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use crate::error::SimulationError;
use crate::models::CompletionLog;

/// Reduces a completion log to one makespan per job.
///
/// Scans from the latest completion backwards; the first event seen for a
/// job is its last, so its `end_time` is the job's makespan. The scan stops
/// once all `num_jobs_hint` jobs are resolved. Every event's job id is
/// range-checked first, so the early exit never hides an extra job.
///
/// # Returns
/// A vector indexed by job id with `num_jobs_hint` entries.
///
/// # Errors
/// - [`SimulationError::JobOutOfRange`] if any event carries a job id
///   `>= num_jobs_hint` (the hint understates the job count).
/// - [`SimulationError::MissingJob`] if a job below the hint never appears
///   (the hint overstates the job count).
///
/// # Example
/// ```
/// use u_makespan::models::{CompletionEvent, CompletionLog, Task};
/// use u_makespan::scheduler::reduce_makespans;
///
/// let log = CompletionLog::from_events(vec![
///     CompletionEvent::new(0.0, 10.0, 0, Task::new(10.0, 0)),
///     CompletionEvent::new(0.0, 7.0, 1, Task::new(7.0, 1)),
/// ]);
/// assert_eq!(reduce_makespans(&log, 2).unwrap(), vec![10.0, 7.0]);
/// ```
pub fn reduce_makespans(
    log: &CompletionLog,
    num_jobs_hint: usize,
) -> Result<Vec<f64>, SimulationError> {
    if let Some(event) = log.iter().find(|e| e.task.job_id as usize >= num_jobs_hint) {
        return Err(SimulationError::JobOutOfRange {
            job_id: event.task.job_id,
            hint: num_jobs_hint,
        });
    }

    let mut makespans: Vec<Option<f64>> = vec![None; num_jobs_hint];
    let mut resolved = 0;

    for event in log.iter().rev() {
        if resolved == num_jobs_hint {
            break;
        }
        let slot = &mut makespans[event.task.job_id as usize];
        if slot.is_none() {
            *slot = Some(event.end_time);
            resolved += 1;
        }
    }

    makespans
        .into_iter()
        .enumerate()
        .map(|(job_id, makespan)| {
            makespan.ok_or(SimulationError::MissingJob {
                job_id,
                hint: num_jobs_hint,
            })
        })
        .collect()
}

/// Summary of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct MakespanSummary {
    /// Makespan per job, indexed by job id.
    pub job_makespans: Vec<f64>,
    /// Latest completion across all jobs.
    pub makespan: f64,
    /// Busy time / makespan per processor index (0.0 when makespan is 0).
    pub utilization_by_processor: Vec<f64>,
    /// Mean of `utilization_by_processor`.
    pub avg_utilization: f64,
    /// Sum over processors of `makespan - busy_time`.
    pub total_idle_time: f64,
}

impl MakespanSummary {
    /// Computes the summary of a run on `processor_count` processors.
    pub fn calculate(
        log: &CompletionLog,
        processor_count: usize,
        num_jobs_hint: usize,
    ) -> Result<Self, SimulationError> {
        let job_makespans = reduce_makespans(log, num_jobs_hint)?;
        let makespan = log.last_end_time();

        let busy: Vec<f64> = (0..processor_count).map(|i| log.busy_time(i)).collect();
        let utilization_by_processor: Vec<f64> = busy
            .iter()
            .map(|b| if makespan > 0.0 { b / makespan } else { 0.0 })
            .collect();
        let avg_utilization = if processor_count == 0 {
            0.0
        } else {
            utilization_by_processor.iter().sum::<f64>() / processor_count as f64
        };
        let total_idle_time = busy.iter().map(|b| makespan - b).sum();

        Ok(Self {
            job_makespans,
            makespan,
            utilization_by_processor,
            avg_utilization,
            total_idle_time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CompletionEvent, JobId, Task};

    fn event(start: f64, end: f64, proc: usize, job: JobId) -> CompletionEvent {
        CompletionEvent::new(start, end, proc, Task::new(end - start, job))
    }

    #[test]
    fn test_latest_completion_wins() {
        let events = vec![
            event(0.0, 4.0, 0, 0),
            event(0.0, 7.0, 1, 1),
            event(4.0, 10.0, 0, 0),
            event(0.0, 2.0, 2, 1),
        ];
        let forward = CompletionLog::from_events(events.clone());
        let backward = CompletionLog::from_events(events.into_iter().rev().collect());

        assert_eq!(reduce_makespans(&forward, 2).unwrap(), vec![10.0, 7.0]);
        assert_eq!(reduce_makespans(&backward, 2).unwrap(), vec![10.0, 7.0]);
    }

    #[test]
    fn test_single_job() {
        let log = CompletionLog::from_events(vec![event(0.0, 1.0, 0, 0), event(1.0, 3.0, 0, 0)]);
        assert_eq!(reduce_makespans(&log, 1).unwrap(), vec![3.0]);
    }

    #[test]
    fn test_hint_understates_jobs() {
        let log = CompletionLog::from_events(vec![event(0.0, 1.0, 0, 0), event(0.0, 5.0, 1, 2)]);
        assert_eq!(
            reduce_makespans(&log, 2),
            Err(SimulationError::JobOutOfRange { job_id: 2, hint: 2 })
        );
    }

    #[test]
    fn test_extra_job_finishing_first_is_rejected() {
        // Jobs 0 and 1 resolve before the scan reaches job 2.
        let log = CompletionLog::from_events(vec![
            event(0.0, 1.0, 0, 2),
            event(0.0, 5.0, 1, 0),
            event(0.0, 7.0, 2, 1),
        ]);
        assert_eq!(
            reduce_makespans(&log, 2),
            Err(SimulationError::JobOutOfRange { job_id: 2, hint: 2 })
        );
    }

    #[test]
    fn test_zero_hint_on_non_empty_log() {
        let log = CompletionLog::from_events(vec![event(0.0, 1.0, 0, 0)]);
        assert_eq!(
            reduce_makespans(&log, 0),
            Err(SimulationError::JobOutOfRange { job_id: 0, hint: 0 })
        );
    }

    #[test]
    fn test_hint_overstates_jobs() {
        let log = CompletionLog::from_events(vec![event(0.0, 1.0, 0, 0)]);
        assert_eq!(
            reduce_makespans(&log, 2),
            Err(SimulationError::MissingJob { job_id: 1, hint: 2 })
        );
    }

    #[test]
    fn test_zero_hint_on_empty_log() {
        assert!(reduce_makespans(&CompletionLog::new(), 0).unwrap().is_empty());
    }

    #[test]
    fn test_summary() {
        // p0 busy 0..4 and 4..10, p1 busy 0..7: makespan 10.
        let log = CompletionLog::from_events(vec![
            event(0.0, 4.0, 0, 0),
            event(0.0, 7.0, 1, 1),
            event(4.0, 10.0, 0, 0),
        ]);
        let summary = MakespanSummary::calculate(&log, 2, 2).unwrap();

        assert_eq!(summary.job_makespans, vec![10.0, 7.0]);
        assert!((summary.makespan - 10.0).abs() < 1e-10);
        assert!((summary.utilization_by_processor[0] - 1.0).abs() < 1e-10);
        assert!((summary.utilization_by_processor[1] - 0.7).abs() < 1e-10);
        assert!((summary.avg_utilization - 0.85).abs() < 1e-10);
        assert!((summary.total_idle_time - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_summary_empty() {
        let summary = MakespanSummary::calculate(&CompletionLog::new(), 3, 0).unwrap();
        assert!((summary.makespan - 0.0).abs() < 1e-10);
        assert_eq!(summary.utilization_by_processor, vec![0.0; 3]);
        assert!((summary.total_idle_time - 0.0).abs() < 1e-10);
    }
}
