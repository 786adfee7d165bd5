//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use cli::LoadArgs;
pub use types::{BasicAuth, HttpMethod, PositiveU64, PositiveUsize};

pub(crate) use defaults::{DEFAULT_CONFIG_FILES, DEFAULT_USER_AGENT};
