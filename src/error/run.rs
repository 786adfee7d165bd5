use thiserror::Error;

/// Failures of the threads that drive a run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Thread '{name}' could not be started: {source}")]
    SpawnThread {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Thread '{name}' panicked.")]
    ThreadPanicked { name: String },
}
