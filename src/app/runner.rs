use std::thread;

use crate::config::RunConfig;
use crate::console::Console;
use crate::error::{AppError, AppResult, RunError};
use crate::http::{HttpTransport, RequestExecutor};
use crate::metrics::StatsAggregator;
use crate::shutdown::CancelFlag;

use super::progress::run_reporter;
use super::summary::{FinalReport, settings_lines};
use super::worker::{WorkerContext, run_worker};

const REPORTER_THREAD_NAME: &str = "esperf-reporter";

/// Runs the whole load: one reporter thread plus `config.workers` worker
/// threads sharing one aggregator, then prints the final report.
///
/// # Errors
///
/// Returns an error when a thread cannot be started or panics. Threads that
/// did start are cancelled and joined first.
pub fn run_load(
    config: &RunConfig,
    transport: &dyn HttpTransport,
    console: &Console,
    cancel: &CancelFlag,
) -> AppResult<FinalReport> {
    for line in settings_lines(config) {
        console.emit(&line);
    }

    let stats = StatsAggregator::new(config.total_requests(), config.warmup);
    let context = WorkerContext {
        config,
        stats: &stats,
        executor: RequestExecutor::new(transport, console, config.verbose),
        cancel,
    };
    tracing::debug!(
        "Starting {} workers x {} iterations ({} requests).",
        config.workers,
        config.iterations,
        config.total_requests()
    );

    thread::scope(|scope| -> AppResult<()> {
        let reporter = thread::Builder::new()
            .name(REPORTER_THREAD_NAME.to_owned())
            .spawn_scoped(scope, || run_reporter(&stats, config.interval, console, cancel))
            .map_err(|err| {
                AppError::run(RunError::SpawnThread {
                    name: REPORTER_THREAD_NAME.to_owned(),
                    source: err,
                })
            })?;

        let context = &context;
        let mut workers = Vec::with_capacity(config.workers);
        let mut failure: Option<AppError> = None;
        for worker_id in 0..config.workers {
            let name = format!("esperf-worker-{}", worker_id);
            let spawned = thread::Builder::new()
                .name(name.clone())
                .spawn_scoped(scope, move || {
                    run_worker(worker_id, context, &mut rand::thread_rng())
                });
            match spawned {
                Ok(handle) => workers.push((name, handle)),
                Err(err) => {
                    tracing::error!("Failed to start {}: {}", name, err);
                    cancel.cancel();
                    failure = Some(AppError::run(RunError::SpawnThread { name, source: err }));
                    break;
                }
            }
        }

        for (name, handle) in workers {
            if handle.join().is_err() {
                tracing::error!("{} panicked.", name);
                cancel.cancel();
                failure.get_or_insert(AppError::run(RunError::ThreadPanicked { name }));
            }
        }

        stats.wake();
        if reporter.join().is_err() {
            failure.get_or_insert(AppError::run(RunError::ThreadPanicked {
                name: REPORTER_THREAD_NAME.to_owned(),
            }));
        }

        failure.map_or(Ok(()), Err)
    })?;

    let report = FinalReport::from_stats(&stats);
    for line in report.lines() {
        console.emit(&line);
    }
    Ok(report)
}
