//! Configuration loading, CLI merging and run resolution.
mod apply;
mod inputs;
mod loader;
mod run;
pub mod types;

#[cfg(test)]
mod tests;

pub use apply::apply_config;
pub use inputs::{load_dictionary, read_request_body};
pub use loader::load_config;
pub use run::RunConfig;

#[cfg(test)]
pub(crate) use loader::load_config_file;
#[cfg(feature = "fuzzing")]
pub(crate) use loader::parse_config_str;
