use rand::Rng;

use crate::config::RunConfig;
use crate::http::{PreparedRequest, RequestExecutor};
use crate::metrics::StatsAggregator;
use crate::shutdown::CancelFlag;

/// Everything a worker borrows from the run.
#[derive(Clone, Copy)]
pub(crate) struct WorkerContext<'run> {
    pub(crate) config: &'run RunConfig,
    pub(crate) stats: &'run StatsAggregator,
    pub(crate) executor: RequestExecutor<'run>,
    pub(crate) cancel: &'run CancelFlag,
}

/// Issues `config.iterations` requests one after another and records each
/// outcome. Returns how many requests were sent.
pub(crate) fn run_worker<R>(worker_id: usize, context: &WorkerContext<'_>, rng: &mut R) -> u64
where
    R: Rng,
{
    let config = context.config;
    tracing::debug!("Worker {} started.", worker_id);

    let mut sent: u64 = 0;
    for _ in 0..config.iterations {
        if context.cancel.is_cancelled() {
            tracing::debug!("Worker {} cancelled after {} requests.", worker_id, sent);
            return sent;
        }

        let url = config.url.render(rng, &config.dictionary);
        let body = config
            .body
            .as_ref()
            .map(|body| body.render(rng, &config.dictionary));
        let request = PreparedRequest {
            method: config.method,
            url: &url,
            body: body.as_deref(),
            auth: config.basic_auth.as_ref(),
        };

        let outcome = context.executor.execute(worker_id, &request);
        context.stats.record(outcome, context.stats.since_start());
        sent = sent.saturating_add(1);
    }

    tracing::debug!("Worker {} finished {} requests.", worker_id, sent);
    sent
}
