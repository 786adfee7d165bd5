use std::fmt::Display;
use std::time::Duration;

use crate::config::RunConfig;
use crate::metrics::{ProgressSnapshot, StatsAggregator};

const LABEL_WIDTH: usize = 35;
const VALUE_WIDTH: usize = 15;
const RESULT_RULE: &str =
    "----------------------------------- Results ------------------------------------";
const SETTINGS_RULE: &str =
    "----------------------------------- Settings -----------------------------------";
const MICROS_PER_SEC: u128 = 1_000_000;
/// Decimal places for durations in the final report.
const REPORT_DECIMALS: u32 = 5;

/// Final statistics of one run, frozen after all workers joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalReport {
    pub finished: bool,
    pub expected: u64,
    pub elapsed: Duration,
    pub warmup: Duration,
    pub all_time: ProgressSnapshot,
    pub windowed: ProgressSnapshot,
}

impl FinalReport {
    #[must_use]
    pub fn from_stats(stats: &StatsAggregator) -> Self {
        let (windowed, all_time) = stats.paired_snapshot();
        Self {
            finished: stats.is_finished(),
            expected: stats.expected_total(),
            elapsed: stats.elapsed(),
            warmup: stats.warmup(),
            all_time,
            windowed,
        }
    }

    /// Time the windowed counters cover: total elapsed minus the warm-up.
    #[must_use]
    pub const fn windowed_period(&self) -> Duration {
        self.elapsed.saturating_sub(self.warmup)
    }

    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        if !self.finished {
            return self.cancelled_lines();
        }

        let period = self.windowed_period();
        let avg_transfer_us = self
            .windowed
            .transfer_time_us
            .checked_div(self.windowed.success)
            .unwrap_or(0);

        let mut lines = vec![
            RESULT_RULE.to_owned(),
            result_line("Total time (sec)", format_micros(duration_micros(self.elapsed), REPORT_DECIMALS)),
            result_line("Number of success", self.all_time.success),
            result_line("Number of connection failure", self.all_time.connection_failures),
            result_line("Number of HTTP response >400", self.all_time.http_errors),
        ];
        if !self.warmup.is_zero() {
            lines.push(result_line(
                "Warm-up excluded (sec)",
                format_micros(duration_micros(self.warmup), REPORT_DECIMALS),
            ));
            lines.push(result_line("Measured success", self.windowed.success));
            lines.push(result_line(
                "Measured connection failure",
                self.windowed.connection_failures,
            ));
            lines.push(result_line(
                "Measured HTTP response >400",
                self.windowed.http_errors,
            ));
        }
        lines.push(result_line(
            "Average successful requests/sec",
            per_second(self.windowed.success, period),
        ));
        lines.push(result_line(
            "Upload throughput (byte/sec)",
            per_second(self.windowed.bytes_uploaded, period),
        ));
        lines.push(result_line(
            "Download throughput (byte/sec)",
            per_second(self.windowed.bytes_downloaded, period),
        ));
        lines.push(result_line(
            "Average time transfer (sec)",
            format_micros(avg_transfer_us, REPORT_DECIMALS),
        ));
        lines
    }

    fn cancelled_lines(&self) -> Vec<String> {
        vec![
            RESULT_RULE.to_owned(),
            format!(
                "Run cancelled after {} of {} requests.",
                self.all_time.completed(),
                self.expected
            ),
            result_line("Number of success", self.all_time.success),
            result_line("Number of connection failure", self.all_time.connection_failures),
            result_line("Number of HTTP response >400", self.all_time.http_errors),
        ]
    }
}

/// Run parameters echoed before the first progress line.
#[must_use]
pub fn settings_lines(config: &RunConfig) -> Vec<String> {
    let body_len = config.body.as_ref().map_or(0, |body| body.as_str().len());
    let dictionary = config.dictionary_source.as_ref().map_or_else(
        || "-".to_owned(),
        |source| format!("{} ({} entries)", source, config.dictionary.len()),
    );
    vec![
        SETTINGS_RULE.to_owned(),
        text_line("URL", config.url.as_str()),
        text_line("Method", config.method.as_str()),
        text_line("Request body (byte)", body_len),
        text_line("Dictionary", dictionary),
        text_line(
            "Warm-up (sec)",
            format_micros(duration_micros(config.warmup), REPORT_DECIMALS),
        ),
        text_line("Number of workers", config.workers),
        text_line("Iterations per worker", config.iterations),
    ]
}

fn result_line(label: &str, value: impl Display) -> String {
    format!(
        "{:>label_width$}: {:>value_width$}",
        label,
        value,
        label_width = LABEL_WIDTH,
        value_width = VALUE_WIDTH
    )
}

fn text_line(label: &str, value: impl Display) -> String {
    format!("{:>label_width$}: {}", label, value, label_width = LABEL_WIDTH)
}

pub(crate) fn duration_micros(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}

/// Formats microseconds as seconds with `decimals` places, rounding half up.
pub(crate) fn format_micros(micros: u64, decimals: u32) -> String {
    let scale = 10u128.saturating_pow(decimals);
    let scaled = u128::from(micros)
        .saturating_mul(scale)
        .saturating_add(MICROS_PER_SEC / 2)
        .checked_div(MICROS_PER_SEC)
        .unwrap_or(0);
    let whole = scaled.checked_div(scale).unwrap_or(0);
    let fraction = scaled.checked_rem(scale).unwrap_or(0);
    if decimals == 0 {
        return whole.to_string();
    }
    format!(
        "{}.{:0width$}",
        whole,
        fraction,
        width = usize::try_from(decimals).unwrap_or(0)
    )
}

/// Whole units per second over `period`; zero for an empty period.
pub(crate) fn per_second(count: u64, period: Duration) -> u64 {
    let scaled = u128::from(count)
        .saturating_mul(MICROS_PER_SEC)
        .checked_div(period.as_micros())
        .unwrap_or(0);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}
