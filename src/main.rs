mod app;
mod args;
mod config;
mod console;
mod entry;
mod error;
mod http;
mod logger;
mod metrics;
mod shutdown;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
