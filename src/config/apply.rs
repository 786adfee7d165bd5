use std::time::Duration;

use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{LoadArgs, PositiveU64, PositiveUsize};
use crate::error::{AppError, AppResult, ConfigError, ValidationError};

use super::types::{ConfigFile, DurationValue};

/// Applies configuration values to CLI arguments.
///
/// A value is taken from the file only when the matching flag was not given
/// on the command line.
///
/// # Errors
///
/// Returns an error when config values are invalid or conflict with each other.
pub fn apply_config(args: &mut LoadArgs, matches: &ArgMatches, config: &ConfigFile) -> AppResult<()> {
    if config.data.is_some() && config.data_file.is_some() {
        return Err(AppError::config(ConfigError::ConflictingFields {
            first: "data",
            second: "data_file",
        }));
    }

    if !is_cli(matches, "url")
        && let Some(url) = config.url.as_ref()
    {
        args.url = Some(url.clone());
    }

    if !is_cli(matches, "method")
        && let Some(method) = config.method
    {
        args.method = method;
    }

    if !is_cli(matches, "workers")
        && let Some(workers) = config.workers
    {
        args.workers = ensure_positive_usize(workers, "workers")?;
    }

    if !is_cli(matches, "iterations")
        && let Some(iterations) = config.iterations
    {
        args.iterations = ensure_positive_u64(iterations, "iterations")?;
    }

    if !is_cli(matches, "interval")
        && let Some(interval) = config.interval.as_ref()
    {
        args.interval = ensure_duration(interval, "interval", false)?;
    }

    if !is_cli(matches, "warmup")
        && let Some(warmup) = config.warmup.as_ref()
    {
        args.warmup = ensure_duration(warmup, "warmup", true)?;
    }

    if !is_cli(matches, "request_timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.request_timeout = ensure_duration(timeout, "timeout", false)?;
    }

    if !is_cli(matches, "connect_timeout")
        && let Some(timeout) = config.connect_timeout.as_ref()
    {
        args.connect_timeout = ensure_duration(timeout, "connect_timeout", false)?;
    }

    if !is_cli(matches, "basic_auth")
        && let Some(user) = config.user.as_ref()
    {
        args.basic_auth = Some(user.clone());
    }

    if !is_cli(matches, "dictionary")
        && let Some(dict) = config.dict.as_ref()
    {
        args.dictionary = Some(dict.clone());
    }

    // A body given on the CLI in either form replaces both body keys.
    if !is_cli(matches, "data") && !is_cli(matches, "data_file") {
        if let Some(data) = config.data.as_ref() {
            args.data = Some(data.clone());
        }
        if let Some(data_file) = config.data_file.as_ref() {
            args.data_file = Some(data_file.clone());
        }
    }

    if !is_cli(matches, "verbose")
        && let Some(verbose) = config.verbose
    {
        args.verbose = verbose;
    }

    if !is_cli(matches, "no_color")
        && let Some(no_color) = config.no_color
    {
        args.no_color = no_color;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn ensure_positive_u64(value: u64, field: &str) -> AppResult<PositiveU64> {
    PositiveU64::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}

fn ensure_positive_usize(value: usize, field: &str) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}

fn ensure_duration(value: &DurationValue, field: &str, allow_zero: bool) -> AppResult<Duration> {
    let invalid = |source: ValidationError| {
        AppError::config(ConfigError::InvalidDuration {
            field: field.to_owned(),
            source,
        })
    };
    let duration = value.to_duration().map_err(invalid)?;
    if duration.is_zero() && !allow_zero {
        return Err(invalid(ValidationError::DurationZero));
    }
    Ok(duration)
}
