//! Completion events and the completion log.
//!
//! A completion event records that a task ran on a processing unit over a
//! simulated interval. The completion log is the full output of one dispatch
//! run, kept in completion order.

use serde::{Deserialize, Serialize};

use super::{JobId, Task};

/// A task assigned to a processing unit over `[start_time, end_time]`.
///
/// Owns the task it completes. Ordered for the event queue by `end_time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionEvent {
    /// Simulated time the processor started working on the task.
    pub start_time: f64,
    /// Simulated time the task finished.
    pub end_time: f64,
    /// Index into the (sorted) processor list of the run.
    pub processor_index: usize,
    /// The completed task.
    pub task: Task,
}

impl CompletionEvent {
    /// Creates a new completion event.
    pub fn new(start_time: f64, end_time: f64, processor_index: usize, task: Task) -> Self {
        Self {
            start_time,
            end_time,
            processor_index,
            task,
        }
    }

    /// Time spent on the processor (`end - start`).
    #[inline]
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Job the completed task belongs to.
    #[inline]
    pub fn job_id(&self) -> JobId {
        self.task.job_id
    }
}

/// Completion events of one run in non-decreasing `end_time` order.
///
/// Dispatch strategies emit events as they pop them from the event queue,
/// which is already completion order. Logs built from arbitrary sequences
/// are sorted on construction, including deserialized ones.
///
/// Serializes as a plain array of events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CompletionEvent>", into = "Vec<CompletionEvent>")]
pub struct CompletionLog {
    events: Vec<CompletionEvent>,
}

impl CompletionLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::with_capacity(capacity),
        }
    }

    /// Builds a log from events in any order.
    ///
    /// The sort is stable, so events with equal end times keep their
    /// relative order.
    pub fn from_events(mut events: Vec<CompletionEvent>) -> Self {
        events.sort_by(|a, b| a.end_time.total_cmp(&b.end_time));
        Self { events }
    }

    /// Appends an event popped from the event queue.
    pub(crate) fn record(&mut self, event: CompletionEvent) {
        debug_assert!(
            self.events
                .last()
                .map_or(true, |last| last.end_time <= event.end_time),
            "completion events must be recorded in end_time order"
        );
        self.events.push(event);
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no events were recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterates events in completion order.
    pub fn iter(&self) -> std::slice::Iter<'_, CompletionEvent> {
        self.events.iter()
    }

    /// The events as a slice.
    pub fn events(&self) -> &[CompletionEvent] {
        &self.events
    }

    /// Consumes the log, returning its events.
    pub fn into_events(self) -> Vec<CompletionEvent> {
        self.events
    }

    /// Latest end time across all events (0.0 if empty).
    pub fn last_end_time(&self) -> f64 {
        self.events.last().map_or(0.0, |e| e.end_time)
    }

    /// Events that ran on the given processor, in completion order.
    pub fn events_for_processor(&self, processor_index: usize) -> Vec<&CompletionEvent> {
        self.events
            .iter()
            .filter(|e| e.processor_index == processor_index)
            .collect()
    }

    /// Events belonging to the given job, in completion order.
    pub fn events_for_job(&self, job_id: JobId) -> Vec<&CompletionEvent> {
        self.events
            .iter()
            .filter(|e| e.task.job_id == job_id)
            .collect()
    }

    /// Total time the given processor spent running tasks.
    pub fn busy_time(&self, processor_index: usize) -> f64 {
        self.events
            .iter()
            .filter(|e| e.processor_index == processor_index)
            .map(CompletionEvent::duration)
            .sum()
    }
}

impl From<Vec<CompletionEvent>> for CompletionLog {
    fn from(events: Vec<CompletionEvent>) -> Self {
        Self::from_events(events)
    }
}

impl From<CompletionLog> for Vec<CompletionEvent> {
    fn from(log: CompletionLog) -> Self {
        log.events
    }
}

impl<'a> IntoIterator for &'a CompletionLog {
    type Item = &'a CompletionEvent;
    type IntoIter = std::slice::Iter<'a, CompletionEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(start: f64, end: f64, proc: usize, job: JobId) -> CompletionEvent {
        CompletionEvent::new(start, end, proc, Task::new(end - start, job))
    }

    #[test]
    fn test_event_duration() {
        let e = event(2.0, 5.5, 0, 0);
        assert!((e.duration() - 3.5).abs() < 1e-10);
        assert_eq!(e.job_id(), 0);
    }

    #[test]
    fn test_from_events_sorts_by_end_time() {
        let log = CompletionLog::from_events(vec![
            event(0.0, 7.0, 1, 1),
            event(0.0, 3.0, 0, 0),
            event(3.0, 10.0, 0, 0),
        ]);
        let ends: Vec<f64> = log.iter().map(|e| e.end_time).collect();
        assert_eq!(ends, vec![3.0, 7.0, 10.0]);
        assert!((log.last_end_time() - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_queries() {
        let log = CompletionLog::from_events(vec![
            event(0.0, 1.0, 0, 0),
            event(0.0, 2.0, 1, 1),
            event(1.0, 4.0, 0, 1),
        ]);
        assert_eq!(log.len(), 3);
        assert_eq!(log.events_for_processor(0).len(), 2);
        assert_eq!(log.events_for_job(1).len(), 2);
        assert!((log.busy_time(0) - 4.0).abs() < 1e-10);
        assert!((log.busy_time(1) - 2.0).abs() < 1e-10);
        assert!((log.busy_time(7) - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_deserialize_sorts_by_end_time() {
        let json = serde_json::to_string(&vec![
            event(4.0, 10.0, 0, 0),
            event(0.0, 4.0, 0, 0),
            event(0.0, 7.0, 1, 1),
        ])
        .unwrap();

        let log: CompletionLog = serde_json::from_str(&json).unwrap();
        let ends: Vec<f64> = log.iter().map(|e| e.end_time).collect();
        assert_eq!(ends, vec![4.0, 7.0, 10.0]);
        assert_eq!(
            crate::scheduler::reduce_makespans(&log, 2).unwrap(),
            vec![10.0, 7.0]
        );
    }

    #[test]
    fn test_serde_roundtrip() {
        let log = CompletionLog::from_events(vec![event(0.0, 2.0, 1, 0), event(0.0, 1.0, 0, 1)]);
        let json = serde_json::to_string(&log).unwrap();
        assert!(json.starts_with('['));
        let parsed: CompletionLog = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, log);
    }

    #[test]
    fn test_empty_log() {
        let log = CompletionLog::new();
        assert!(log.is_empty());
        assert!((log.last_end_time() - 0.0).abs() < 1e-10);
        assert!(log.into_events().is_empty());
    }
}
