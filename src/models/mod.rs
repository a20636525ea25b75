//! Simulation domain models.
//!
//! Provides the data types shared by every dispatch strategy: the tasks
//! being scheduled, the processing units they run on, and the completion
//! events a run produces.
//!
//! # Ownership
//!
//! | Type | Created by | Lifetime |
//! |------|-----------|----------|
//! | `Task` | workload generator | moved into a `CompletionEvent` on dispatch |
//! | `ProcessingUnit` | configuration | read-only, shared across runs |
//! | `CompletionEvent` | dispatch strategy | reduced within a single run |

mod completion;
mod processor;
mod task;

pub use completion::{CompletionEvent, CompletionLog};
pub use processor::ProcessingUnit;
pub use task::{JobId, Task};
