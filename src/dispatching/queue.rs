//! Event queue of in-flight task completions.
//!
//! A binary min-heap keyed by `end_time`: the core loop performs one push
//! and one pop per task, both O(log n). Events with equal end times pop in
//! unspecified order; only makespans depend on the result, and those are
//! unaffected by how ties are broken.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::models::CompletionEvent;

/// Heap entry ordering events earliest-`end_time`-first.
///
/// `BinaryHeap` is a max-heap, so the comparison is flipped.
#[derive(Debug)]
struct Pending(CompletionEvent);

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.end_time.total_cmp(&self.0.end_time)
    }
}

/// Min-priority queue of completion events ordered by `end_time`.
#[derive(Debug, Default)]
pub struct EventQueue {
    heap: BinaryHeap<Pending>,
}

impl EventQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty queue with room for `capacity` in-flight events.
    ///
    /// At most one event per processor is in flight, so the processor count
    /// is the natural capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    /// Inserts an event.
    pub fn push(&mut self, event: CompletionEvent) {
        self.heap.push(Pending(event));
    }

    /// Removes and returns the event with the earliest `end_time`.
    pub fn pop(&mut self) -> Option<CompletionEvent> {
        self.heap.pop().map(|p| p.0)
    }

    /// The event with the earliest `end_time`, without removing it.
    pub fn peek(&self) -> Option<&CompletionEvent> {
        self.heap.peek().map(|p| &p.0)
    }

    /// Whether no events are in flight.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of in-flight events.
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}
