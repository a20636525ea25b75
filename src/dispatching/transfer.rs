//! Transfer-augmented dispatch.

use super::{greedy, Dispatch};
use crate::models::{CompletionLog, ProcessingUnit, Task};

/// Greedy dispatch where every assignment first receives its payload.
///
/// Control flow matches [`Immediate`](super::Immediate); each assignment's
/// duration is `transfer_time(payload_size) + time_to_complete(work_amount)`.
/// Transfer and compute are serialized and never overlap, including for the
/// first wave.
///
/// # Example
/// ```
/// use u_makespan::dispatching::{Dispatch, TransferAugmented};
/// use u_makespan::models::{ProcessingUnit, Task};
///
/// let strategy = TransferAugmented::new(100.0, 0.0);
/// let log = strategy.assign(
///     &ProcessingUnit::from_rates(&[1.0]),
///     vec![Task::new(0.0, 0).with_payload(200)],
/// );
/// assert!((log.last_end_time() - 2.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferAugmented {
    /// Payload units moved per unit of simulated time. Must be > 0.
    pub bandwidth: f64,
    /// Fixed cost paid by every transfer. Must be >= 0.
    pub connection_setup: f64,
}

impl TransferAugmented {
    /// Creates a transfer model.
    pub fn new(bandwidth: f64, connection_setup: f64) -> Self {
        Self {
            bandwidth,
            connection_setup,
        }
    }

    /// Simulated time to move `payload_size` units to a processor.
    #[inline]
    pub fn transfer_time(&self, payload_size: u64) -> f64 {
        payload_size as f64 / self.bandwidth + self.connection_setup
    }
}

impl Default for TransferAugmented {
    fn default() -> Self {
        Self::new(1.0, 0.0)
    }
}

impl Dispatch for TransferAugmented {
    fn name(&self) -> &'static str {
        "transfer_augmented"
    }

    fn assign(&self, processors: &[ProcessingUnit], tasks: Vec<Task>) -> CompletionLog {
        greedy::run(processors, tasks, |processor, task| {
            self.transfer_time(task.payload_size) + processor.time_to_complete(task.work_amount)
        })
    }

    fn description(&self) -> &'static str {
        "Greedy dispatch with serialized payload transfer"
    }
}
