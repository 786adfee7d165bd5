use std::time::Duration;

use serde::Deserialize;

use crate::args::HttpMethod;
use crate::args::parsers::parse_duration_text;
use crate::error::ValidationError;

/// Settings accepted from `esperf.toml` / `esperf.json`.
///
/// Keys mirror the long CLI flags. Anything left out keeps the CLI value.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub method: Option<HttpMethod>,
    #[serde(alias = "threads")]
    pub workers: Option<usize>,
    #[serde(alias = "recurrence")]
    pub iterations: Option<u64>,
    pub interval: Option<DurationValue>,
    pub warmup: Option<DurationValue>,
    pub user: Option<String>,
    #[serde(alias = "dictionary")]
    pub dict: Option<String>,
    pub data: Option<String>,
    pub data_file: Option<String>,
    pub timeout: Option<DurationValue>,
    pub connect_timeout: Option<DurationValue>,
    pub verbose: Option<bool>,
    pub no_color: Option<bool>,
}

/// A duration written either as whole seconds (`5`) or as text (`"250ms"`).
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => parse_duration_text(text),
        }
    }
}
