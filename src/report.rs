//! Plain-text result tables.
//!
//! Both writers emit one `;`-delimited header line followed by one row per
//! record, suitable for spreadsheets and plotting scripts.

use std::io::{self, Write};

use crate::models::CompletionLog;
use crate::sweep::SweepPoint;

/// Header of [`write_sweep`] output.
pub const SWEEP_HEADER: &str = "point;job;slice_size;mean_makespan;repetitions";
/// Header of [`write_event_log`] output.
pub const EVENT_LOG_HEADER: &str = "start_time;end_time;processor;job;work_amount;payload_size";

/// Writes one row per job of every sweep point.
///
/// # Example
/// ```
/// use u_makespan::report::write_sweep;
/// use u_makespan::sweep::SweepPoint;
///
/// let point = SweepPoint {
///     slice_sizes: vec![2, 5],
///     mean_makespans: vec![1.5, 0.75],
///     repetitions: 4,
/// };
/// let mut out = Vec::new();
/// write_sweep(&mut out, &[point]).unwrap();
/// let text = String::from_utf8(out).unwrap();
/// assert_eq!(text.lines().nth(2), Some("0;1;5;0.75;4"));
/// ```
pub fn write_sweep<W: Write>(out: &mut W, points: &[SweepPoint]) -> io::Result<()> {
    writeln!(out, "{SWEEP_HEADER}")?;
    for (index, point) in points.iter().enumerate() {
        for (job, (slice, makespan)) in point
            .slice_sizes
            .iter()
            .zip(&point.mean_makespans)
            .enumerate()
        {
            writeln!(
                out,
                "{index};{job};{slice};{makespan};{}",
                point.repetitions
            )?;
        }
    }
    Ok(())
}

/// Writes every completion event in completion order.
pub fn write_event_log<W: Write>(out: &mut W, log: &CompletionLog) -> io::Result<()> {
    writeln!(out, "{EVENT_LOG_HEADER}")?;
    for event in log {
        writeln!(
            out,
            "{};{};{};{};{};{}",
            event.start_time,
            event.end_time,
            event.processor_index,
            event.task.job_id,
            event.task.work_amount,
            event.task.payload_size
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CompletionEvent, Task};

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_write_sweep() {
        let points = vec![
            SweepPoint {
                slice_sizes: vec![2, 3],
                mean_makespans: vec![10.0, 12.5],
                repetitions: 2,
            },
            SweepPoint {
                slice_sizes: vec![4],
                mean_makespans: vec![7.0],
                repetitions: 2,
            },
        ];
        let text = render(|out| write_sweep(out, &points));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![SWEEP_HEADER, "0;0;2;10;2", "0;1;3;12.5;2", "1;0;4;7;2"]
        );
    }

    #[test]
    fn test_write_event_log() {
        let log = CompletionLog::from_events(vec![
            CompletionEvent::new(0.0, 2.5, 1, Task::new(5.0, 0).with_payload(8)),
            CompletionEvent::new(0.0, 1.0, 0, Task::new(1.0, 1)),
        ]);
        let text = render(|out| write_event_log(out, &log));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec![EVENT_LOG_HEADER, "0;1;0;1;1;0", "0;2.5;1;0;5;8"]);
    }

    #[test]
    fn test_empty_inputs_write_header_only() {
        assert_eq!(render(|out| write_sweep(out, &[])), format!("{SWEEP_HEADER}\n"));
        assert_eq!(
            render(|out| write_event_log(out, &CompletionLog::new())),
            format!("{EVENT_LOG_HEADER}\n")
        );
    }
}
