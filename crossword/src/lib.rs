pub mod auth;
pub mod config;
pub mod error;
pub mod fetch;
pub mod persist;
pub mod pipeline;
pub mod print;
pub mod schedule;

#[cfg(test)]
pub mod tests;

// Re-export key types and functions for easier access
pub use crate::auth::{
    Authenticator, HtmlExtractor, LoginFieldExtractor, LoginFields, RegexExtractor, Session,
};
pub use crate::config::{Cli, Config, Credentials, Endpoints, ExtractorKind, RunMode};
pub use crate::error::{AuthError, ConfigError, FetchError, PipelineError, PrintError};
pub use crate::fetch::{date_token, fetch_puzzle};
pub use crate::persist::{puzzle_path, save_puzzle};
pub use crate::pipeline::{CrosswordPipeline, Pipeline};
pub use crate::print::print_file;
pub use crate::schedule::{
    dates_inclusive, run_dates, Clock, LocalClock, Scheduler, Sleeper, ThreadSleeper, Tick,
};
