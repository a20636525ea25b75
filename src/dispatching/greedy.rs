//! Shared greedy list-scheduling loop.
//!
//! The processor that becomes free earliest always receives the next task in
//! stream order. Immediate and transfer-aware dispatch differ only in how an
//! assignment's duration is computed.

use super::EventQueue;
use crate::models::{CompletionEvent, CompletionLog, ProcessingUnit, Task};

/// Gives each processor, in list order, one task at `t = 0`.
///
/// Stops early when the stream runs dry before every processor is seeded.
pub(super) fn seed_first_wave<I, F>(
    processors: &[ProcessingUnit],
    pending: &mut I,
    queue: &mut EventQueue,
    duration: &F,
) where
    I: Iterator<Item = Task>,
    F: Fn(&ProcessingUnit, &Task) -> f64,
{
    for (index, processor) in processors.iter().enumerate() {
        let Some(task) = pending.next() else {
            break;
        };
        let end = duration(processor, &task);
        queue.push(CompletionEvent::new(0.0, end, index, task));
    }
}

/// Runs back-to-back greedy dispatch until every task has completed.
///
/// Each popped completion immediately hands the freed processor the next
/// task, starting exactly at the popped event's `end_time`.
pub(super) fn run<F>(
    processors: &[ProcessingUnit],
    tasks: Vec<Task>,
    duration: F,
) -> CompletionLog
where
    F: Fn(&ProcessingUnit, &Task) -> f64,
{
    let mut log = CompletionLog::with_capacity(tasks.len());
    let mut queue = EventQueue::with_capacity(processors.len());
    let mut pending = tasks.into_iter();

    seed_first_wave(processors, &mut pending, &mut queue, &duration);

    while let Some(done) = queue.pop() {
        if let Some(task) = pending.next() {
            let index = done.processor_index;
            let end = done.end_time + duration(&processors[index], &task);
            queue.push(CompletionEvent::new(done.end_time, end, index, task));
        }
        log.record(done);
    }

    log
}
