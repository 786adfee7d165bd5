use clap::Parser;
use std::time::Duration;

use super::parsers::{
    parse_duration_arg, parse_positive_u64, parse_positive_usize, parse_warmup_arg,
};
use super::types::{HttpMethod, PositiveU64, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Threaded HTTP load generator - fixed worker pool, randomized request templates, warm-up aware statistics and live progress lines."
)]
pub struct LoadArgs {
    /// Target URL template ($RNUM, $RNUM(m) and $RDICT are replaced per request)
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// HTTP method to use
    #[arg(long, short = 'X', default_value = "get", ignore_case = true)]
    pub method: HttpMethod,

    /// Number of concurrent worker threads
    #[arg(
        long = "workers",
        short = 't',
        alias = "threads",
        default_value = "5",
        value_parser = parse_positive_usize
    )]
    pub workers: PositiveUsize,

    /// Requests issued by each worker
    #[arg(
        long = "iterations",
        short = 'r',
        alias = "recurrence",
        default_value = "10",
        value_parser = parse_positive_u64
    )]
    pub iterations: PositiveU64,

    /// Exclude requests finished during the first N seconds from the results (supports ms/s/m/h)
    #[arg(long, short = 'o', default_value = "0", value_parser = parse_warmup_arg)]
    pub warmup: Duration,

    /// Progress report interval (supports ms/s/m/h)
    #[arg(long, short = 'i', default_value = "1s", value_parser = parse_duration_arg)]
    pub interval: Duration,

    /// Basic authentication credentials (user:password)
    #[arg(long = "user", short = 'u')]
    pub basic_auth: Option<String>,

    /// Newline-delimited dictionary file used by $RDICT
    #[arg(long = "dict", short = 'd')]
    pub dictionary: Option<String>,

    /// Request body template (read from stdin when omitted and stdin has data)
    #[arg(long, short = 'D', conflicts_with = "data_file")]
    pub data: Option<String>,

    /// Request body template from file
    #[arg(long = "data-file", conflicts_with = "data")]
    pub data_file: Option<String>,

    /// Request timeout (supports ms/s/m/h)
    #[arg(long = "timeout", default_value = "10s", value_parser = parse_duration_arg)]
    pub request_timeout: Duration,

    /// Timeout for establishing a new connection (supports ms/s/m/h)
    #[arg(
        long = "connect-timeout",
        default_value = "5s",
        value_parser = parse_duration_arg
    )]
    pub connect_timeout: Duration,

    /// Print every request and response (sets log level to debug unless overridden by ESPERF_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable colored log output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Path to config file (TOML/JSON). Defaults to ./esperf.toml or ./esperf.json if present.
    #[arg(long)]
    pub config: Option<String>,
}
