use std::time::Duration;

use crate::args::{BasicAuth, HttpMethod};
use crate::console::Console;
use crate::metrics::Outcome;

/// Statuses at or above this value count as HTTP errors.
const HTTP_ERROR_STATUS: u16 = 400;

/// A request with every template already resolved.
#[derive(Debug, Clone, Copy)]
pub struct PreparedRequest<'req> {
    pub method: HttpMethod,
    pub url: &'req str,
    pub body: Option<&'req str>,
    pub auth: Option<&'req BasicAuth>,
}

/// What the transport saw for a request that got a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseInfo {
    pub status: u16,
    pub bytes_uploaded: u64,
    pub bytes_downloaded: u64,
    pub transfer_time: Duration,
    /// Response body, present only when capture was requested.
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exchange {
    Completed(ResponseInfo),
    /// DNS, connect, TLS, timeout or body read failure.
    Failed(String),
}

/// Sends one HTTP request and blocks until it completes.
pub trait HttpTransport: Send + Sync {
    fn send(&self, request: &PreparedRequest<'_>, capture_body: bool) -> Exchange;
}

/// Runs requests through a transport and classifies what came back.
#[derive(Clone, Copy)]
pub struct RequestExecutor<'run> {
    transport: &'run dyn HttpTransport,
    console: &'run Console,
    verbose: bool,
}

impl<'run> RequestExecutor<'run> {
    #[must_use]
    pub const fn new(transport: &'run dyn HttpTransport, console: &'run Console, verbose: bool) -> Self {
        Self {
            transport,
            console,
            verbose,
        }
    }

    pub fn execute(&self, worker_id: usize, request: &PreparedRequest<'_>) -> Outcome {
        let exchange = self.transport.send(request, self.verbose);
        let outcome = classify(&exchange);
        if self.verbose {
            self.console.emit(&trace_line(worker_id, request, &exchange));
        }
        outcome
    }
}

/// Transport failures become connection failures, statuses >= 400 become
/// HTTP errors and everything else is a success.
#[must_use]
pub fn classify(exchange: &Exchange) -> Outcome {
    match exchange {
        Exchange::Failed(_) => Outcome::ConnectionFailure,
        Exchange::Completed(info) if info.status >= HTTP_ERROR_STATUS => Outcome::HttpError {
            status_code: info.status,
        },
        Exchange::Completed(info) => Outcome::Success {
            bytes_uploaded: info.bytes_uploaded,
            bytes_downloaded: info.bytes_downloaded,
            transfer_time: info.transfer_time,
        },
    }
}

pub(crate) fn trace_line(worker_id: usize, request: &PreparedRequest<'_>, exchange: &Exchange) -> String {
    let user = request.auth.map_or("-", |auth| auth.username.as_str());
    let body_len = request.body.map_or(0, str::len);
    let context = format!(
        "[worker {}] {} {} user={} body={}B",
        worker_id,
        request.method.as_str(),
        request.url,
        user,
        body_len
    );

    let info = match exchange {
        Exchange::Failed(reason) => return format!("{} -> connection failure: {}", context, reason),
        Exchange::Completed(info) => info,
    };
    let mut line = if info.status >= HTTP_ERROR_STATUS {
        format!("{} -> HTTP error {}", context, info.status)
    } else {
        format!(
            "{} -> {} up={}B down={}B time={}us",
            context,
            info.status,
            info.bytes_uploaded,
            info.bytes_downloaded,
            info.transfer_time.as_micros()
        )
    };
    if let Some(body) = info.body.as_deref() {
        line.push(' ');
        for ch in body.chars() {
            if ch.is_control() {
                line.extend(ch.escape_default());
            } else {
                line.push(ch);
            }
        }
    }
    line
}
