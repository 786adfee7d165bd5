//! Request outcomes and the shared statistics aggregator.
mod collector;
mod types;


pub use collector::StatsAggregator;
pub use types::{IntervalReport, Outcome, ProgressSnapshot};
