//! Scheduling driver and makespan reduction.
//!
//! Provides the run orchestration (shuffle, sort, dispatch, reduce) and the
//! per-job completion-time metrics derived from a run's completion log.
//!
//! # Algorithm
//!
//! `Simulator` sorts the task stream and processor list once per run, hands
//! both to a dispatch strategy, and reduces the resulting completion log to
//! one makespan per job.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 5
//! - Graham (1969), "Bounds on Multiprocessing Timing Anomalies"

mod driver;
mod makespan;

pub use driver::{simulate, SimulationOutcome, Simulator};
pub use makespan::{reduce_makespans, MakespanSummary};
