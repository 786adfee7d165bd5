use std::time::Duration;

use crate::args::{BasicAuth, HttpMethod, LoadArgs};
use crate::error::{AppError, AppResult, ValidationError};
use crate::http::RequestTemplate;

/// Fully resolved, immutable settings for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub workers: usize,
    pub iterations: u64,
    pub interval: Duration,
    pub warmup: Duration,
    pub method: HttpMethod,
    pub basic_auth: Option<BasicAuth>,
    pub url: RequestTemplate,
    pub body: Option<RequestTemplate>,
    pub dictionary: Vec<String>,
    pub dictionary_source: Option<String>,
    pub verbose: bool,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    total_requests: u64,
}

impl RunConfig {
    /// Validates merged arguments and resolves them into a run.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is missing, the credentials are
    /// malformed, a template uses `$RDICT` without a dictionary, or the total
    /// request count does not fit in `u64`.
    pub fn from_args(
        args: &LoadArgs,
        body: Option<&str>,
        dictionary: Vec<String>,
    ) -> AppResult<Self> {
        let url = args
            .url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| AppError::validation(ValidationError::MissingUrl))?;
        let url = RequestTemplate::parse(url);
        let body = body.map(RequestTemplate::parse);

        let basic_auth = args
            .basic_auth
            .as_deref()
            .map(str::parse::<BasicAuth>)
            .transpose()?;

        if dictionary.is_empty() {
            if url.uses_dictionary() {
                return Err(AppError::validation(ValidationError::DictionaryRequired {
                    field: "URL",
                }));
            }
            if body.as_ref().is_some_and(RequestTemplate::uses_dictionary) {
                return Err(AppError::validation(ValidationError::DictionaryRequired {
                    field: "body",
                }));
            }
        }

        let workers = args.workers.get();
        let iterations = args.iterations.get();
        let total_requests = u64::try_from(workers)
            .ok()
            .and_then(|workers| workers.checked_mul(iterations))
            .ok_or(ValidationError::TotalRequestsOverflow {
                workers,
                iterations,
            })?;

        Ok(Self {
            workers,
            iterations,
            interval: args.interval,
            warmup: args.warmup,
            method: args.method,
            basic_auth,
            url,
            body,
            dictionary,
            dictionary_source: args.dictionary.clone(),
            verbose: args.verbose,
            request_timeout: args.request_timeout,
            connect_timeout: args.connect_timeout,
            total_requests,
        })
    }

    /// Number of requests the whole run issues (`workers * iterations`).
    #[must_use]
    pub const fn total_requests(&self) -> u64 {
        self.total_requests
    }
}
