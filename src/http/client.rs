use std::time::Instant;

use futures_util::StreamExt;
use reqwest::Client;
use reqwest::header::HeaderMap;
use tokio::runtime::Handle;
use url::Url;

use crate::args::DEFAULT_USER_AGENT;
use crate::config::RunConfig;
use crate::error::{AppError, AppResult, HttpError};

use super::executor::{Exchange, HttpTransport, PreparedRequest, ResponseInfo};

/// `Accept` value reqwest adds on send; it is not visible on the built request.
const IMPLICIT_ACCEPT: &str = "*/*";

/// Builds the shared HTTP client for a run.
///
/// # Errors
///
/// Returns an error when the TLS backend or client cannot be initialised.
pub fn build_client(config: &RunConfig) -> AppResult<Client> {
    Client::builder()
        .timeout(config.request_timeout)
        .connect_timeout(config.connect_timeout)
        .user_agent(DEFAULT_USER_AGENT)
        .build()
        .map_err(|err| {
            tracing::error!("Failed to build HTTP client: {}", err);
            AppError::http(HttpError::BuildClientFailed { source: err })
        })
}

/// [`HttpTransport`] over a reqwest client, driven by a tokio runtime the
/// calling thread blocks on.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    runtime: Handle,
}

impl ReqwestTransport {
    #[must_use]
    pub const fn new(client: Client, runtime: Handle) -> Self {
        Self { client, runtime }
    }

    fn build_request(&self, request: &PreparedRequest<'_>) -> Result<reqwest::Request, String> {
        let url = Url::parse(request.url).map_err(|err| format!("invalid URL '{}': {}", request.url, err))?;
        let mut builder = self.client.request(request.method.to_reqwest(), url);
        if let Some(auth) = request.auth {
            builder = builder.basic_auth(&auth.username, Some(&auth.password));
        }
        if let Some(body) = request.body {
            builder = builder.body(body.to_owned());
        }
        builder.build().map_err(|err| err.to_string())
    }
}

impl HttpTransport for ReqwestTransport {
    fn send(&self, request: &PreparedRequest<'_>, capture_body: bool) -> Exchange {
        let built = match self.build_request(request) {
            Ok(built) => built,
            Err(reason) => return Exchange::Failed(reason),
        };
        let uploaded = request_wire_size(&built);
        self.runtime
            .block_on(perform(&self.client, built, uploaded, capture_body))
    }
}

async fn perform(
    client: &Client,
    request: reqwest::Request,
    bytes_uploaded: u64,
    capture_body: bool,
) -> Exchange {
    let started = Instant::now();
    let response = match client.execute(request).await {
        Ok(response) => response,
        Err(err) => return Exchange::Failed(describe(&err)),
    };
    let status = response.status().as_u16();
    let head_bytes = response_head_size(&response);

    let drained = if capture_body {
        capture_response_body(response)
            .await
            .map(|(bytes, body)| (bytes, Some(body)))
    } else {
        drain_response_body(response).await.map(|bytes| (bytes, None))
    };
    match drained {
        Ok((body_bytes, body)) => Exchange::Completed(ResponseInfo {
            status,
            bytes_uploaded,
            bytes_downloaded: head_bytes.saturating_add(body_bytes),
            transfer_time: started.elapsed(),
            body,
        }),
        Err(err) => Exchange::Failed(describe(&err)),
    }
}

async fn drain_response_body(response: reqwest::Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(len_u64(bytes.len()));
    }
    Ok(total_bytes)
}

async fn capture_response_body(
    response: reqwest::Response,
) -> Result<(u64, String), reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut buffer: Vec<u8> = Vec::new();
    while let Some(chunk) = stream.next().await {
        buffer.extend_from_slice(&chunk?);
    }
    let total_bytes = len_u64(buffer.len());
    Ok((total_bytes, String::from_utf8_lossy(&buffer).into_owned()))
}

/// Approximate HTTP/1.1 bytes on the wire for the request: request line,
/// headers (including the ones the client adds on send), blank line, body.
fn request_wire_size(request: &reqwest::Request) -> u64 {
    let url = request.url();
    let target_len = url.path().len().saturating_add(
        url.query()
            .map_or(0, |query| query.len().saturating_add(1)),
    );
    let request_line = request
        .method()
        .as_str()
        .len()
        .saturating_add(target_len)
        .saturating_add(" HTTP/1.1\r\n".len())
        .saturating_add(1);

    let host = match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port),
        (Some(host), None) => host.to_owned(),
        (None, _) => String::new(),
    };
    let body_len = request
        .body()
        .and_then(reqwest::Body::as_bytes)
        .map_or(0, <[u8]>::len);

    let mut total = request_line
        .saturating_add(header_line_len("host", host.len()))
        .saturating_add(header_line_len("user-agent", DEFAULT_USER_AGENT.len()))
        .saturating_add(header_line_len("accept", IMPLICIT_ACCEPT.len()))
        .saturating_add(headers_size(request.headers()));
    if body_len > 0 {
        total = total.saturating_add(header_line_len(
            "content-length",
            body_len.to_string().len(),
        ));
    }
    len_u64(total.saturating_add(2).saturating_add(body_len))
}

/// Status line, headers and blank line of the response.
fn response_head_size(response: &reqwest::Response) -> u64 {
    let status_line = format!("{:?} {}\r\n", response.version(), response.status());
    len_u64(
        status_line
            .len()
            .saturating_add(headers_size(response.headers()))
            .saturating_add(2),
    )
}

fn headers_size(headers: &HeaderMap) -> usize {
    headers.iter().fold(0usize, |total, (name, value)| {
        total.saturating_add(header_line_len(name.as_str(), value.as_bytes().len()))
    })
}

/// `name: value\r\n`
const fn header_line_len(name: &str, value_len: usize) -> usize {
    name.len().saturating_add(value_len).saturating_add(4)
}

fn len_u64(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}

fn describe(err: &reqwest::Error) -> String {
    let kind = if err.is_timeout() {
        "timeout"
    } else if err.is_connect() {
        "connect"
    } else if err.is_body() || err.is_decode() {
        "body"
    } else {
        "request"
    };
    format!("{} error: {}", kind, err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::{BasicAuth, HttpMethod};

    fn transport() -> Result<(tokio::runtime::Runtime, ReqwestTransport), String> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| format!("runtime build failed: {}", err))?;
        let client = Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|err| format!("client build failed: {}", err))?;
        let transport = ReqwestTransport::new(client, runtime.handle().clone());
        Ok((runtime, transport))
    }

    #[test]
    fn request_size_counts_line_headers_and_body() -> Result<(), String> {
        let (_runtime, transport) = transport()?;
        let auth = BasicAuth {
            username: "elastic".to_owned(),
            password: "changeme".to_owned(),
        };
        let body = "{\"query\":1}";
        let with_body = transport.build_request(&PreparedRequest {
            method: HttpMethod::Post,
            url: "http://localhost:9200/_search?q=x",
            body: Some(body),
            auth: Some(&auth),
        })?;
        let without_body = transport.build_request(&PreparedRequest {
            method: HttpMethod::Post,
            url: "http://localhost:9200/_search?q=x",
            body: None,
            auth: Some(&auth),
        })?;

        let with_size = request_wire_size(&with_body);
        let without_size = request_wire_size(&without_body);
        let minimum = len_u64("POST /_search?q=x HTTP/1.1\r\n\r\n".len());
        if without_size <= minimum {
            return Err(format!("Size {} misses headers", without_size));
        }
        let expected_extra = len_u64(body.len().saturating_add("content-length: 11\r\n".len()));
        if with_size.saturating_sub(without_size) != expected_extra {
            return Err(format!(
                "Body should add {} bytes, added {}",
                expected_extra,
                with_size.saturating_sub(without_size)
            ));
        }
        Ok(())
    }

    #[test]
    fn invalid_url_is_a_failed_exchange() -> Result<(), String> {
        let (_runtime, transport) = transport()?;
        let exchange = transport.send(
            &PreparedRequest {
                method: HttpMethod::Get,
                url: "not a url",
                body: None,
                auth: None,
            },
            false,
        );
        match &exchange {
            Exchange::Failed(reason) if reason.contains("invalid URL") => Ok(()),
            Exchange::Failed(_) | Exchange::Completed(_) => {
                Err(format!("Unexpected exchange: {:?}", exchange))
            }
        }
    }
}
