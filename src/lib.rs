//! Discrete-event makespan simulation for heterogeneous processors.
//!
//! Simulates list scheduling of independent tasks onto processing units of
//! differing speeds and reports, per job, the time its last task completes.
//! Workloads come from block matrix-multiplication partitionings, so
//! different slice sizes can be compared on the same hardware.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Task`, `ProcessingUnit`, `CompletionEvent`,
//!   `CompletionLog`
//! - **`dispatching`**: Event queue, ordering policies and the immediate,
//!   ticker and transfer-augmented dispatch strategies
//! - **`scheduler`**: Simulation driver and per-job makespan reduction
//! - **`workload`**: Matrix-multiplication task generator
//! - **`sweep`**: Parallel, seeded sweeps over slice-size grids
//! - **`config`**: JSON experiment configuration
//! - **`report`**: `;`-delimited result tables
//! - **`validation`**: Input integrity checks (rates, strategy parameters, work)
//!
//! # Example
//!
//! ```
//! use u_makespan::dispatching::{DispatchStrategy, ProcessorOrder, TaskOrder};
//! use u_makespan::models::ProcessingUnit;
//! use u_makespan::scheduler::simulate;
//! use u_makespan::workload::create_tasks;
//!
//! let processors = ProcessingUnit::scaled(1e6, &[1.0, 1.0, 2.0]);
//! let tasks = create_tasks(40, &[4, 7]).unwrap();
//!
//! let makespans = simulate(
//!     &processors,
//!     TaskOrder::LargestFirst,
//!     tasks,
//!     ProcessorOrder::FastestFirst,
//!     DispatchStrategy::Immediate,
//!     2,
//!     Some(7),
//! )
//! .unwrap();
//! assert_eq!(makespans.len(), 2);
//! ```
//!
//! # References
//!
//! - Graham (1969), "Bounds on Multiprocessing Timing Anomalies"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod config;
pub mod dispatching;
pub mod error;
pub mod models;
pub mod report;
pub mod scheduler;
pub mod sweep;
pub mod validation;
pub mod workload;

pub use error::{ConfigError, SimulationError};
