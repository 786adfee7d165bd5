use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use super::types::{Outcome, ProgressSnapshot};

#[derive(Debug, Default)]
struct CounterGroup {
    success: AtomicU64,
    connection_failures: AtomicU64,
    http_errors: AtomicU64,
    bytes_uploaded: AtomicU64,
    bytes_downloaded: AtomicU64,
    transfer_time_us: AtomicU64,
}

impl CounterGroup {
    fn add(&self, outcome: &Outcome, ordering: Ordering) {
        match outcome {
            Outcome::Success {
                bytes_uploaded,
                bytes_downloaded,
                transfer_time,
            } => {
                let micros = u64::try_from(transfer_time.as_micros()).unwrap_or(u64::MAX);
                self.bytes_uploaded.fetch_add(*bytes_uploaded, ordering);
                self.bytes_downloaded.fetch_add(*bytes_downloaded, ordering);
                self.transfer_time_us.fetch_add(micros, ordering);
                self.success.fetch_add(1, ordering);
            }
            Outcome::ConnectionFailure => {
                self.connection_failures.fetch_add(1, ordering);
            }
            Outcome::HttpError { .. } => {
                self.http_errors.fetch_add(1, ordering);
            }
        }
    }

    fn load(&self, ordering: Ordering) -> ProgressSnapshot {
        ProgressSnapshot {
            success: self.success.load(ordering),
            connection_failures: self.connection_failures.load(ordering),
            http_errors: self.http_errors.load(ordering),
            bytes_uploaded: self.bytes_uploaded.load(ordering),
            bytes_downloaded: self.bytes_downloaded.load(ordering),
            transfer_time_us: self.transfer_time_us.load(ordering),
        }
    }
}

#[derive(Debug, Default)]
struct SignalState {
    stopped_at: Option<Instant>,
    wakeups: u64,
}

/// Run-wide statistics shared by every worker and the reporter.
///
/// Two counter groups are kept: all-time, and windowed (requests observed
/// after the warm-up period). The windowed group is always written after the
/// all-time group with `Release` and read before it with `Acquire`, so any
/// reader sees windowed values no larger than the all-time ones.
///
/// Completion is decided by a separate `completed` counter: the one
/// `record` call whose increment reaches the expected total stores the stop
/// time and flips `finished`. Exactly one caller does this.
#[derive(Debug)]
pub struct StatsAggregator {
    started_at: Instant,
    expected: u64,
    warmup: Duration,
    all_time: CounterGroup,
    windowed: CounterGroup,
    completed: AtomicU64,
    finished: AtomicBool,
    signal: Mutex<SignalState>,
    finished_signal: Condvar,
}

impl StatsAggregator {
    #[must_use]
    pub fn new(expected: u64, warmup: Duration) -> Self {
        Self {
            started_at: Instant::now(),
            expected,
            warmup,
            all_time: CounterGroup::default(),
            windowed: CounterGroup::default(),
            completed: AtomicU64::new(0),
            finished: AtomicBool::new(false),
            signal: Mutex::new(SignalState::default()),
            finished_signal: Condvar::new(),
        }
    }

    /// Counts one outcome observed `observed_at` after the run started.
    ///
    /// Returns `true` for the single call that completed the run.
    pub fn record(&self, outcome: Outcome, observed_at: Duration) -> bool {
        if self.finished.load(Ordering::Acquire) {
            tracing::warn!("Outcome recorded after the run finished; ignoring it.");
            return false;
        }

        self.all_time.add(&outcome, Ordering::Relaxed);
        if self.warmup.is_zero() || observed_at > self.warmup {
            self.windowed.add(&outcome, Ordering::Release);
        }

        let completed = self
            .completed
            .fetch_add(1, Ordering::AcqRel)
            .saturating_add(1);
        if completed != self.expected {
            return false;
        }

        let mut signal = self.lock_signal();
        signal.stopped_at = Some(Instant::now());
        self.finished.store(true, Ordering::Release);
        drop(signal);
        self.finished_signal.notify_all();
        tracing::debug!("All {} requests recorded.", self.expected);
        true
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }

    /// All-time counters.
    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        self.all_time.load(Ordering::Relaxed)
    }

    /// Counters of requests observed after the warm-up period.
    #[must_use]
    pub fn windowed_snapshot(&self) -> ProgressSnapshot {
        self.windowed.load(Ordering::Acquire)
    }

    /// Windowed and all-time counters read in containment-preserving order.
    #[must_use]
    pub fn paired_snapshot(&self) -> (ProgressSnapshot, ProgressSnapshot) {
        let windowed = self.windowed_snapshot();
        let all_time = self.snapshot();
        (windowed, all_time)
    }

    /// Blocks until the run finishes, `timeout` passes, or [`Self::wake`]
    /// is called. Returns whether the run is finished.
    pub fn wait_finished(&self, timeout: Duration) -> bool {
        let guard = self.lock_signal();
        let wakeups = guard.wakeups;
        let (guard, _) = self
            .finished_signal
            .wait_timeout_while(guard, timeout, |signal| {
                signal.stopped_at.is_none() && signal.wakeups == wakeups
            })
            .unwrap_or_else(PoisonError::into_inner);
        guard.stopped_at.is_some()
    }

    /// Wakes every thread blocked in [`Self::wait_finished`].
    pub fn wake(&self) {
        let mut signal = self.lock_signal();
        signal.wakeups = signal.wakeups.wrapping_add(1);
        drop(signal);
        self.finished_signal.notify_all();
    }

    /// Time since the run started, frozen at the stop time once finished.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        match self.lock_signal().stopped_at {
            Some(stopped_at) => stopped_at.saturating_duration_since(self.started_at),
            None => self.started_at.elapsed(),
        }
    }

    /// Time since the run started, ignoring the stop time.
    #[must_use]
    pub fn since_start(&self) -> Duration {
        self.started_at.elapsed()
    }

    #[must_use]
    pub const fn expected_total(&self) -> u64 {
        self.expected
    }

    #[must_use]
    pub const fn warmup(&self) -> Duration {
        self.warmup
    }

    fn lock_signal(&self) -> MutexGuard<'_, SignalState> {
        self.signal
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
