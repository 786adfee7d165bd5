use std::time::Duration;

/// Classified result of a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success {
        bytes_uploaded: u64,
        bytes_downloaded: u64,
        transfer_time: Duration,
    },
    ConnectionFailure,
    HttpError {
        status_code: u16,
    },
}

/// Counter values of one group read at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub success: u64,
    pub connection_failures: u64,
    pub http_errors: u64,
    pub bytes_uploaded: u64,
    pub bytes_downloaded: u64,
    pub transfer_time_us: u64,
}

impl ProgressSnapshot {
    /// Requests of any outcome counted in this snapshot.
    #[must_use]
    pub const fn completed(&self) -> u64 {
        self.success
            .saturating_add(self.connection_failures)
            .saturating_add(self.http_errors)
    }

    /// Per-interval figures between `previous` and `self`.
    ///
    /// Averages are per successful request in the interval and stay zero
    /// when the interval had no successes.
    #[must_use]
    pub fn delta_since(&self, previous: &Self) -> IntervalReport {
        let success = self.success.saturating_sub(previous.success);
        let uploaded = self.bytes_uploaded.saturating_sub(previous.bytes_uploaded);
        let downloaded = self
            .bytes_downloaded
            .saturating_sub(previous.bytes_downloaded);
        let transfer_us = self
            .transfer_time_us
            .saturating_sub(previous.transfer_time_us);

        IntervalReport {
            success,
            connection_failures: self
                .connection_failures
                .saturating_sub(previous.connection_failures),
            http_errors: self.http_errors.saturating_sub(previous.http_errors),
            avg_upload_bytes: uploaded.checked_div(success).unwrap_or(0),
            avg_download_bytes: downloaded.checked_div(success).unwrap_or(0),
            avg_response_us: transfer_us.checked_div(success).unwrap_or(0),
        }
    }
}

/// One progress line worth of numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntervalReport {
    pub success: u64,
    pub connection_failures: u64,
    pub http_errors: u64,
    pub avg_upload_bytes: u64,
    pub avg_download_bytes: u64,
    pub avg_response_us: u64,
}
