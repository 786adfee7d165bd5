//! Worker pool, progress reporting and the final report.
mod progress;
mod runner;
mod summary;
mod worker;


pub use runner::run_load;
pub use summary::{FinalReport, settings_lines};
