//! Ticker-batched dispatch.
//!
//! Models a scheduler that only reassigns idle workers at discrete ticks.
//! Processors freed within the same tick window are reassigned together at
//! the window's boundary, so a processor may sit idle between finishing a
//! task and the next tick.

use tracing::trace;

use super::{greedy, Dispatch, EventQueue};
use crate::models::{CompletionEvent, CompletionLog, ProcessingUnit, Task};

/// Batched dispatch at fixed tick intervals.
///
/// # Algorithm
/// 1. Seed every processor at `t = 0` (as in immediate dispatch).
/// 2. Pop the earliest completion; the tick boundary is
///    `max(clock + tick_period, first.end_time)`.
/// 3. Pop every further completion with `end_time <= boundary`.
/// 4. Advance the clock to the boundary and hand each freed processor,
///    in the order it was freed, the next task starting at the clock.
///
/// A reassigned processor's `start_time` is the shared boundary even when it
/// became free earlier in the window; the idle gap is part of the model.
///
/// # Example
/// ```
/// use u_makespan::dispatching::{Dispatch, Ticker};
/// use u_makespan::models::{ProcessingUnit, Task};
///
/// let processors = ProcessingUnit::from_rates(&[1.0, 1.0]);
/// let tasks = vec![
///     Task::new(1.0, 0),
///     Task::new(3.0, 0),
///     Task::new(4.0, 0),
///     Task::new(4.0, 0),
/// ];
///
/// let log = Ticker::new(5.0).assign(&processors, tasks);
/// let starts: Vec<f64> = log.iter().map(|e| e.start_time).collect();
/// assert_eq!(starts, vec![0.0, 0.0, 5.0, 5.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ticker {
    /// Minimum simulated time between reassignment rounds. Must be >= 0.
    pub tick_period: f64,
}

impl Ticker {
    /// Creates a ticker with the given period.
    pub fn new(tick_period: f64) -> Self {
        Self { tick_period }
    }
}

impl Dispatch for Ticker {
    fn name(&self) -> &'static str {
        "ticker"
    }

    fn assign(&self, processors: &[ProcessingUnit], tasks: Vec<Task>) -> CompletionLog {
        let duration = |processor: &ProcessingUnit, task: &Task| {
            processor.time_to_complete(task.work_amount)
        };

        let mut log = CompletionLog::with_capacity(tasks.len());
        let mut queue = EventQueue::with_capacity(processors.len());
        let mut pending = tasks.into_iter();
        let mut freed: Vec<usize> = Vec::with_capacity(processors.len());
        let mut clock = 0.0_f64;

        greedy::seed_first_wave(processors, &mut pending, &mut queue, &duration);

        while let Some(first) = queue.pop() {
            freed.clear();
            let boundary = (clock + self.tick_period).max(first.end_time);
            freed.push(first.processor_index);
            log.record(first);

            while queue.peek().is_some_and(|e| e.end_time <= boundary) {
                if let Some(done) = queue.pop() {
                    freed.push(done.processor_index);
                    log.record(done);
                }
            }

            clock = boundary;
            trace!(clock, freed = freed.len(), "tick");

            for &index in &freed {
                let Some(task) = pending.next() else {
                    break;
                };
                let end = clock + duration(&processors[index], &task);
                queue.push(CompletionEvent::new(clock, end, index, task));
            }
        }

        log
    }

    fn description(&self) -> &'static str {
        "Ticker-batched dispatch"
    }
}
