//! Entry points for the `fuzz/` targets.
use std::path::Path;
use std::time::Duration;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::args::parsers::{parse_duration_arg, parse_warmup_arg};
use crate::args::{BasicAuth, LoadArgs, PositiveU64, PositiveUsize};
use crate::config::parse_config_str;
use crate::config::types::ConfigFile;
use crate::error::{AppError, AppResult};
use crate::http::RequestTemplate;

/// Parses `input` as a request template and renders it with a seeded RNG.
#[must_use]
pub fn render_template_input(input: &str, seed: u64, dictionary: &[String]) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    RequestTemplate::parse(input).render(&mut rng, dictionary)
}

/// Parses CLI arguments the way the binary does.
///
/// # Errors
///
/// Returns an error when clap rejects the arguments.
pub fn parse_args_input(args: &[String]) -> AppResult<LoadArgs> {
    LoadArgs::try_parse_from(args).map_err(AppError::from)
}

/// Parses TOML config text.
///
/// # Errors
///
/// Returns an error when the text is not a valid config.
pub fn parse_config_toml(content: &str) -> AppResult<ConfigFile> {
    parse_config_str(Path::new("fuzz.toml"), content)
}

/// Parses JSON config text.
///
/// # Errors
///
/// Returns an error when the text is not a valid config.
pub fn parse_config_json(content: &str) -> AppResult<ConfigFile> {
    parse_config_str(Path::new("fuzz.json"), content)
}

/// Parses an interval or timeout value.
///
/// # Errors
///
/// Returns an error when the duration is invalid or zero.
pub fn parse_duration_input(input: &str) -> AppResult<Duration> {
    parse_duration_arg(input)
}

/// Parses a warm-up value.
///
/// # Errors
///
/// Returns an error when the duration is invalid.
pub fn parse_warmup_input(input: &str) -> AppResult<Duration> {
    parse_warmup_arg(input)
}

/// Parses `user:password` credentials.
///
/// # Errors
///
/// Returns an error when the credentials are malformed.
pub fn parse_credentials_input(input: &str) -> AppResult<BasicAuth> {
    input.parse::<BasicAuth>().map_err(AppError::from)
}

/// Parses a positive `u64`.
///
/// # Errors
///
/// Returns an error when the value is not a positive integer.
pub fn parse_positive_u64_input(input: &str) -> AppResult<PositiveU64> {
    input.parse::<PositiveU64>().map_err(AppError::from)
}

/// Parses a positive `usize`.
///
/// # Errors
///
/// Returns an error when the value is not a positive integer.
pub fn parse_positive_usize_input(input: &str) -> AppResult<PositiveUsize> {
    input.parse::<PositiveUsize>().map_err(AppError::from)
}
