//! Immediate greedy dispatch (baseline).

use super::{greedy, Dispatch};
use crate::models::{CompletionLog, ProcessingUnit, Task};

/// Classical greedy list scheduling.
///
/// Seeds every processor at `t = 0`, then whenever a processor finishes it
/// immediately receives the next task. Processors never idle while tasks
/// remain, so on each processor every event starts at the previous event's
/// end time.
///
/// # Example
/// ```
/// use u_makespan::dispatching::{Dispatch, Immediate};
/// use u_makespan::models::{ProcessingUnit, Task};
///
/// let processors = ProcessingUnit::from_rates(&[1.0]);
/// let tasks = vec![Task::new(1.0, 0), Task::new(2.0, 0), Task::new(3.0, 0)];
///
/// let log = Immediate.assign(&processors, tasks);
/// let ends: Vec<f64> = log.iter().map(|e| e.end_time).collect();
/// assert_eq!(ends, vec![1.0, 3.0, 6.0]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Immediate;

impl Dispatch for Immediate {
    fn name(&self) -> &'static str {
        "immediate"
    }

    fn assign(&self, processors: &[ProcessingUnit], tasks: Vec<Task>) -> CompletionLog {
        greedy::run(processors, tasks, |processor, task| {
            processor.time_to_complete(task.work_amount)
        })
    }

    fn description(&self) -> &'static str {
        "Immediate greedy dispatch"
    }
}
