//! Experiment sweep controller.
//!
//! Runs a grid of slice-size combinations against one processor set. Each
//! grid point becomes a workload with one job per slice size; the point is
//! simulated `repetitions` times and the per-job makespans are averaged.
//!
//! Points run in parallel. Every repetition gets its own shuffle seed
//! derived from `(base_seed, point, repetition)`, so results do not depend
//! on thread scheduling.

use rayon::prelude::*;
use tracing::{info, warn};

use crate::dispatching::Dispatch;
use crate::error::SimulationError;
use crate::models::ProcessingUnit;
use crate::scheduler::Simulator;
use crate::validation::{ValidationError, ValidationErrorKind};
use crate::workload::MatrixWorkload;

/// Grid of workloads to simulate.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPlan {
    /// Matrix dimension shared by every point.
    pub problem_size: usize,
    /// Slice sizes per point; each entry is one job.
    pub grid: Vec<Vec<usize>>,
    /// Runs per point.
    pub repetitions: usize,
    /// Shuffle tasks before sorting in every run.
    pub shuffle: bool,
    /// Seed all per-run seeds are derived from.
    pub base_seed: u64,
}

impl SweepPlan {
    /// Creates a single-repetition plan without shuffling.
    pub fn new(problem_size: usize, grid: Vec<Vec<usize>>) -> Self {
        Self {
            problem_size,
            grid,
            repetitions: 1,
            shuffle: false,
            base_seed: 0,
        }
    }

    /// Plan comparing every unordered pair of distinct slice sizes.
    ///
    /// # Example
    /// ```
    /// use u_makespan::sweep::SweepPlan;
    ///
    /// let plan = SweepPlan::pairwise(100, &[2, 5, 10]);
    /// assert_eq!(plan.grid, vec![vec![2, 5], vec![2, 10], vec![5, 10]]);
    /// ```
    pub fn pairwise(problem_size: usize, slice_sizes: &[usize]) -> Self {
        let mut grid = Vec::new();
        for (i, &a) in slice_sizes.iter().enumerate() {
            for &b in &slice_sizes[i + 1..] {
                grid.push(vec![a, b]);
            }
        }
        Self::new(problem_size, grid)
    }

    /// Sets the number of runs per point.
    pub fn with_repetitions(mut self, repetitions: usize) -> Self {
        self.repetitions = repetitions;
        self
    }

    /// Enables seeded shuffling.
    pub fn with_shuffle(mut self, base_seed: u64) -> Self {
        self.shuffle = true;
        self.base_seed = base_seed;
        self
    }

    /// Runs actually executed per point. Unshuffled runs are deterministic,
    /// so one suffices.
    pub fn effective_repetitions(&self) -> usize {
        if self.shuffle {
            self.repetitions
        } else {
            self.repetitions.min(1)
        }
    }

    /// Seed of one repetition, or `None` when shuffling is off.
    pub fn seed_for(&self, point: usize, repetition: usize) -> Option<u64> {
        self.shuffle
            .then(|| mix_seed(self.base_seed, point as u64, repetition as u64))
    }

    fn validate(&self) -> Result<(), SimulationError> {
        let mut errors = Vec::new();
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
}

/// Averaged result of one grid point.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPoint {
    /// Slice sizes of the point, in job order.
    pub slice_sizes: Vec<usize>,
    /// Mean makespan per job over all repetitions.
    pub mean_makespans: Vec<f64>,
    /// Runs averaged.
    pub repetitions: usize,
}

/// Runs every point of `plan` and returns the averages in grid order.
///
/// The simulator supplies ordering policies and the strategy; job count
/// and shuffle seed are set per point and repetition.
///
/// # Errors
/// [`SimulationError::InvalidInput`] for an empty grid, zero repetitions or
/// an invalid point. Every point runs; the error of the first failing point
/// in grid order is returned.
pub fn run_sweep(
    plan: &SweepPlan,
    processors: &[ProcessingUnit],
    simulator: &Simulator,
) -> Result<Vec<SweepPoint>, SimulationError> {
    plan.validate()?;
    info!(
        points = plan.grid.len(),
        repetitions = plan.effective_repetitions(),
        processors = processors.len(),
        strategy = simulator.strategy().name(),
        description = simulator.strategy().description(),
        "starting sweep"
    );

    let results: Vec<Result<SweepPoint, SimulationError>> = plan
        .grid
        .par_iter()
        .enumerate()
        .map(|(index, slice_sizes)| {
            run_point(plan, index, slice_sizes, processors, simulator).inspect_err(|e| {
                warn!(point = index, slice_sizes = ?slice_sizes, error = %e, "sweep point failed");
            })
        })
        .collect();

    results.into_iter().collect()
}

fn run_point(
    plan: &SweepPlan,
    index: usize,
    slice_sizes: &[usize],
    processors: &[ProcessingUnit],
    simulator: &Simulator,
) -> Result<SweepPoint, SimulationError> {
    let tasks = MatrixWorkload::new(plan.problem_size).create_tasks(slice_sizes)?;
    let repetitions = plan.effective_repetitions();
    let mut totals = vec![0.0; slice_sizes.len()];

    for repetition in 0..repetitions {
        let outcome = simulator
            .clone()
            .with_job_count(slice_sizes.len())
            .with_shuffle_seed(plan.seed_for(index, repetition))
            .with_event_log(false)
            .run(processors, tasks.clone())?;
        for (total, makespan) in totals.iter_mut().zip(&outcome.makespans) {
            *total += makespan;
        }
    }

    let mean_makespans = totals
        .into_iter()
        .map(|t| t / repetitions as f64)
        .collect();
    info!(point = index, slice_sizes = ?slice_sizes, tasks = tasks.len(), "sweep point finished");

    Ok(SweepPoint {
        slice_sizes: slice_sizes.to_vec(),
        mean_makespans,
        repetitions,
    })
}

// SplitMix64 finalizer over the combined inputs.
fn mix_seed(base: u64, point: u64, repetition: u64) -> u64 {
    let mut z = base
        ^ point.wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ repetition.wrapping_mul(0xC2B2_AE3D_27D4_EB4F);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
