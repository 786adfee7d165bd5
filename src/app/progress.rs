use std::time::Duration;

use crate::console::Console;
use crate::metrics::{IntervalReport, ProgressSnapshot, StatsAggregator};
use crate::shutdown::CancelFlag;

use super::summary::format_micros;

const TIMESTAMP_WIDTH: usize = 24;
const PROGRESS_WIDTH: usize = 9;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";
const PROGRESS_RULE: &str =
    "------------------------ --------- --------- -------- -------- -------- --------";
/// Decimal places of the per-interval response time.
const RESPONSE_DECIMALS: u32 = 4;

pub(crate) fn header_lines() -> [String; 2] {
    [
        format!(
            "{:<ts$} {:>w$} {:>w$}{:>w$}{:>w$}{:>w$}{:>w$}",
            "Timestamp",
            "Success",
            "Fail",
            "HTTP>400",
            "Upload",
            "Download",
            "Response",
            ts = TIMESTAMP_WIDTH,
            w = PROGRESS_WIDTH
        ),
        PROGRESS_RULE.to_owned(),
    ]
}

pub(crate) fn format_progress_line(timestamp: &str, report: &IntervalReport) -> String {
    format!(
        "{:<ts$} {:>w$} {:>w$}{:>w$}{:>w$}{:>w$}{:>w$}",
        timestamp,
        report.success,
        report.connection_failures,
        report.http_errors,
        report.avg_upload_bytes,
        report.avg_download_bytes,
        format_micros(report.avg_response_us, RESPONSE_DECIMALS),
        ts = TIMESTAMP_WIDTH,
        w = PROGRESS_WIDTH
    )
}

fn local_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Prints one progress line per `interval` until the run finishes or is
/// cancelled. Completion wakes the reporter early so the last line follows
/// the last request without waiting out the interval.
pub(crate) fn run_reporter(
    stats: &StatsAggregator,
    interval: Duration,
    console: &Console,
    cancel: &CancelFlag,
) {
    for line in header_lines() {
        console.emit(&line);
    }

    let mut previous = ProgressSnapshot::default();
    loop {
        let finished = stats.wait_finished(interval);
        let current = stats.snapshot();
        let report = current.delta_since(&previous);
        console.emit(&format_progress_line(&local_timestamp(), &report));
        previous = current;
        if finished || cancel.is_cancelled() {
            break;
        }
    }
    tracing::debug!("Progress reporter stopped.");
}
