//! Dispatch strategies, ordering policies and the event queue.
//!
//! A dispatch strategy consumes an ordered task stream and a processor list
//! and produces the completion log of one simulated run. Three strategies
//! share that contract:
//!
//! | Strategy | Reassignment | Duration |
//! |----------|--------------|----------|
//! | [`Immediate`] | as soon as a processor frees | compute |
//! | [`Ticker`] | batched at tick boundaries | compute |
//! | [`TransferAugmented`] | as soon as a processor frees | transfer + compute |
//!
//! # Usage
//!
//! ```
//! use u_makespan::dispatching::{Dispatch, DispatchStrategy};
//! use u_makespan::models::{ProcessingUnit, Task};
//!
//! let strategy = DispatchStrategy::Ticker { tick_period: 0.5 };
//! let log = strategy.assign(
//!     &ProcessingUnit::from_rates(&[1.0, 2.0]),
//!     vec![Task::new(1.0, 0), Task::new(2.0, 0), Task::new(3.0, 0)],
//! );
//! assert_eq!(log.len(), 3);
//! ```
//!
//! # References
//!
//! - Graham (1969), "Bounds on Multiprocessing Timing Anomalies"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 5

mod greedy;
mod immediate;
mod policy;
mod queue;
mod ticker;
mod transfer;

pub use immediate::Immediate;
pub use policy::{ProcessorOrder, TaskOrder};
pub use queue::EventQueue;
pub use ticker::Ticker;
pub use transfer::TransferAugmented;

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::models::{CompletionLog, ProcessingUnit, Task};

/// An assignment algorithm mapping tasks onto processors over simulated time.
///
/// Implementations consume the task stream in the given order and must emit
/// exactly one completion event per task, in completion order. The
/// processor list is used as-is; sorting is the driver's job.
pub trait Dispatch: Send + Sync + Debug {
    /// Strategy name (e.g., "immediate", "ticker").
    fn name(&self) -> &'static str;

    /// Runs the strategy to completion.
    fn assign(&self, processors: &[ProcessingUnit], tasks: Vec<Task>) -> CompletionLog;

    /// Strategy description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// The closed set of dispatch strategies, selectable at runtime.
///
/// Dispatches statically to [`Immediate`], [`Ticker`] or
/// [`TransferAugmented`]. The default is transfer-augmented dispatch with
/// unit bandwidth and no connection setup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DispatchStrategy {
    /// Immediate greedy dispatch.
    Immediate,
    /// Batched reassignment every `tick_period`.
    Ticker { tick_period: f64 },
    /// Greedy dispatch with payload transfer before compute.
    TransferAugmented {
        bandwidth: f64,
        connection_setup: f64,
    },
}

impl Default for DispatchStrategy {
    fn default() -> Self {
        TransferAugmented::default().into()
    }
}

impl Dispatch for DispatchStrategy {
    fn name(&self) -> &'static str {
        match self {
            Self::Immediate => Immediate.name(),
            Self::Ticker { tick_period } => Ticker::new(*tick_period).name(),
            Self::TransferAugmented {
                bandwidth,
                connection_setup,
            } => TransferAugmented::new(*bandwidth, *connection_setup).name(),
        }
    }

    fn assign(&self, processors: &[ProcessingUnit], tasks: Vec<Task>) -> CompletionLog {
        match self {
            Self::Immediate => Immediate.assign(processors, tasks),
            Self::Ticker { tick_period } => Ticker::new(*tick_period).assign(processors, tasks),
            Self::TransferAugmented {
                bandwidth,
                connection_setup,
            } => TransferAugmented::new(*bandwidth, *connection_setup).assign(processors, tasks),
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Self::Immediate => Immediate.description(),
            Self::Ticker { tick_period } => Ticker::new(*tick_period).description(),
            Self::TransferAugmented {
                bandwidth,
                connection_setup,
            } => TransferAugmented::new(*bandwidth, *connection_setup).description(),
        }
    }
}

impl From<Immediate> for DispatchStrategy {
    fn from(_: Immediate) -> Self {
        Self::Immediate
    }
}

impl From<Ticker> for DispatchStrategy {
    fn from(t: Ticker) -> Self {
        Self::Ticker {
            tick_period: t.tick_period,
        }
    }
}

impl From<TransferAugmented> for DispatchStrategy {
    fn from(t: TransferAugmented) -> Self {
        Self::TransferAugmented {
            bandwidth: t.bandwidth,
            connection_setup: t.connection_setup,
        }
    }
}
