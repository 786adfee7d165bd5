use std::time::Duration;

use super::types::{PositiveU64, PositiveUsize};
use crate::error::{AppError, AppResult, ValidationError};

pub(super) fn parse_positive_u64(s: &str) -> AppResult<PositiveU64> {
    s.parse::<PositiveU64>().map_err(AppError::from)
}

pub(super) fn parse_positive_usize(s: &str) -> AppResult<PositiveUsize> {
    s.parse::<PositiveUsize>().map_err(AppError::from)
}

/// Parses a non-zero duration such as `500ms`, `2s`, `1m` or a bare number of seconds.
pub(crate) fn parse_duration_arg(s: &str) -> AppResult<Duration> {
    let duration = parse_duration_text(s)?;
    if duration.is_zero() {
        return Err(AppError::validation(ValidationError::DurationZero));
    }
    Ok(duration)
}

/// Same grammar as [`parse_duration_arg`], but `0` disables the warm-up window.
pub(crate) fn parse_warmup_arg(s: &str) -> AppResult<Duration> {
    parse_duration_text(s).map_err(AppError::from)
}

pub(crate) fn parse_duration_text(s: &str) -> Result<Duration, ValidationError> {
    let value = s.trim();
    if value.is_empty() {
        return Err(ValidationError::DurationEmpty);
    }

    let mut digits_len = 0usize;
    for ch in value.chars() {
        if ch.is_ascii_digit() {
            digits_len = digits_len.saturating_add(1);
        } else {
            break;
        }
    }
    if digits_len == 0 {
        return Err(ValidationError::InvalidDurationFormat {
            value: value.to_owned(),
        });
    }
    let (num_part, unit_part) = value.split_at(digits_len);
    let number: u64 = num_part
        .parse()
        .map_err(|err| ValidationError::InvalidDurationNumber {
            value: value.to_owned(),
            source: err,
        })?;

    let unit = if unit_part.is_empty() { "s" } else { unit_part };
    let duration = match unit {
        "ms" => Duration::from_millis(number),
        "s" => Duration::from_secs(number),
        "m" => {
            let secs = number
                .checked_mul(60)
                .ok_or(ValidationError::DurationOverflow)?;
            Duration::from_secs(secs)
        }
        "h" => {
            let secs = number
                .checked_mul(60)
                .and_then(|seconds| seconds.checked_mul(60))
                .ok_or(ValidationError::DurationOverflow)?;
            Duration::from_secs(secs)
        }
        _ => {
            return Err(ValidationError::InvalidDurationUnit {
                unit: unit.to_owned(),
            });
        }
    };

    Ok(duration)
}
