use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to build async runtime: {source}")]
    BuildRuntimeFailed {
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read body file '{path}': {source}")]
    ReadBodyFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read request body from stdin: {source}")]
    ReadStdin {
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read dictionary '{path}': {source}")]
    ReadDictionary {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
