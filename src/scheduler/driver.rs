//! Scheduling driver.
//!
//! # Algorithm
//!
//! 1. Validate processors, strategy parameters and tasks.
//! 2. Optionally shuffle the task stream with a seeded RNG.
//! 3. Stable-sort tasks by the task order.
//! 4. Stable-sort processors by the processor order.
//! 5. Run the dispatch strategy.
//! 6. Reduce the completion log to per-job makespans.
//!
//! Shuffling before a stable sort randomizes the relative order of tasks
//! with equal work, which is what repeated runs average over.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use super::reduce_makespans;
use crate::dispatching::{Dispatch, DispatchStrategy, ProcessorOrder, TaskOrder};
use crate::error::SimulationError;
use crate::models::{CompletionLog, ProcessingUnit, Task};
use crate::validation::validate_input;

/// Result of one simulated run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    /// Makespan per job, indexed by job id.
    pub makespans: Vec<f64>,
    /// Processors in the order the run used them; completion events index
    /// into this list.
    pub processors: Vec<ProcessingUnit>,
    /// Full completion log, if requested.
    pub log: Option<CompletionLog>,
}

impl SimulationOutcome {
    /// Latest makespan across all jobs (0.0 if there are no jobs).
    pub fn overall_makespan(&self) -> f64 {
        self.makespans.iter().copied().fold(0.0, f64::max)
    }
}

/// Configurable simulation driver.
///
/// Holds ordering policies, the dispatch strategy and run options; the
/// processors and tasks are supplied per run, so one simulator can be reused
/// across repeated or randomized runs.
///
/// # Example
///
/// ```
/// use u_makespan::dispatching::{DispatchStrategy, TaskOrder};
/// use u_makespan::models::{ProcessingUnit, Task};
/// use u_makespan::scheduler::Simulator;
///
/// let processors = ProcessingUnit::from_rates(&[1.0, 1.0]);
/// let tasks = vec![Task::new(1.0, 0); 4];
///
/// let outcome = Simulator::new(DispatchStrategy::Immediate)
///     .with_task_order(TaskOrder::LargestFirst)
///     .run(&processors, tasks)
///     .unwrap();
/// assert_eq!(outcome.makespans, vec![2.0]);
/// ```
#[derive(Debug, Clone)]
pub struct Simulator {
    strategy: DispatchStrategy,
    task_order: TaskOrder,
    processor_order: ProcessorOrder,
    num_jobs: usize,
    shuffle_seed: Option<u64>,
    keep_log: bool,
}

impl Simulator {
    /// Creates a simulator for a single job with default orderings.
    pub fn new(strategy: DispatchStrategy) -> Self {
        Self {
            strategy,
            task_order: TaskOrder::default(),
            processor_order: ProcessorOrder::default(),
            num_jobs: 1,
            shuffle_seed: None,
            keep_log: false,
        }
    }

    /// Sets the task ordering policy.
    pub fn with_task_order(mut self, order: TaskOrder) -> Self {
        self.task_order = order;
        self
    }

    /// Sets the processor ordering policy.
    pub fn with_processor_order(mut self, order: ProcessorOrder) -> Self {
        self.processor_order = order;
        self
    }

    /// Sets the number of distinct jobs in the task stream.
    ///
    /// Job ids must be dense in `0..num_jobs`.
    pub fn with_job_count(mut self, num_jobs: usize) -> Self {
        self.num_jobs = num_jobs;
        self
    }

    /// Shuffles tasks with the given seed before sorting.
    pub fn with_shuffle(mut self, seed: u64) -> Self {
        self.shuffle_seed = Some(seed);
        self
    }

    /// Sets the shuffle seed; `None` disables shuffling.
    pub fn with_shuffle_seed(mut self, seed: Option<u64>) -> Self {
        self.shuffle_seed = seed;
        self
    }

    /// Keeps the full completion log in the outcome.
    pub fn with_event_log(mut self, keep: bool) -> Self {
        self.keep_log = keep;
        self
    }

    /// The configured dispatch strategy.
    pub fn strategy(&self) -> &DispatchStrategy {
        &self.strategy
    }

    /// The configured job count.
    pub fn job_count(&self) -> usize {
        self.num_jobs
    }

    /// Runs one simulation.
    ///
    /// # Errors
    /// - [`SimulationError::InvalidInput`] for bad rates, strategy
    ///   parameters or task work.
    /// - [`SimulationError::NoProcessors`] if tasks exist but processors
    ///   do not.
    /// - [`SimulationError::JobOutOfRange`] / [`SimulationError::MissingJob`]
    ///   if the job count does not match the task stream.
    pub fn run(
        &self,
        processors: &[ProcessingUnit],
        mut tasks: Vec<Task>,
    ) -> Result<SimulationOutcome, SimulationError> {
        validate_input(processors, &tasks, &self.strategy)?;

        if processors.is_empty() && !tasks.is_empty() {
            return Err(SimulationError::NoProcessors { tasks: tasks.len() });
        }
        if let Some(task) = tasks.iter().find(|t| t.job_id as usize >= self.num_jobs) {
            return Err(SimulationError::JobOutOfRange {
                job_id: task.job_id,
                hint: self.num_jobs,
            });
        }

        if let Some(seed) = self.shuffle_seed {
            let mut rng = StdRng::seed_from_u64(seed);
            tasks.shuffle(&mut rng);
        }
        self.task_order.sort(&mut tasks);

        let mut processors = processors.to_vec();
        self.processor_order.sort(&mut processors);

        let task_count = tasks.len();
        let log = self.strategy.assign(&processors, tasks);
        debug_assert_eq!(log.len(), task_count, "one completion event per task");

        let makespans = reduce_makespans(&log, self.num_jobs)?;
        debug!(
            strategy = self.strategy.name(),
            task_order = %self.task_order,
            processor_order = %self.processor_order,
            tasks = task_count,
            processors = processors.len(),
            makespan = log.last_end_time(),
            "simulation finished"
        );

        Ok(SimulationOutcome {
            makespans,
            processors,
            log: self.keep_log.then_some(log),
        })
    }
}

/// Runs one simulation and returns the per-job makespans.
///
/// `shuffle` carries the seed of the pre-sort shuffle; `None` keeps the
/// given task order before sorting.
pub fn simulate(
    processors: &[ProcessingUnit],
    task_order: TaskOrder,
    tasks: Vec<Task>,
    processor_order: ProcessorOrder,
    strategy: DispatchStrategy,
    num_jobs_hint: usize,
    shuffle: Option<u64>,
) -> Result<Vec<f64>, SimulationError> {
    Simulator::new(strategy)
        .with_task_order(task_order)
        .with_processor_order(processor_order)
        .with_job_count(num_jobs_hint)
        .with_shuffle_seed(shuffle)
        .run(processors, tasks)
        .map(|outcome| outcome.makespans)
}
