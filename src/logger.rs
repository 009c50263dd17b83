//! Logging initialisation via tracing-subscriber.
//!
//! Log events go to stderr so they never mix with the summary on stdout.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Level used when `RUST_LOG` is unset.
pub const DEFAULT_LEVEL: &str = "warn";

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("invalid log filter '{filter}': {reason}")]
    Filter { filter: String, reason: String },
    #[error("failed to set subscriber: {0}")]
    Install(String),
}

/// Build the filter: `RUST_LOG` wins unless `verbose` forces debug output.
pub fn build_filter(verbose: bool) -> Result<EnvFilter, LoggerError> {
    if verbose {
        return parse_filter("debug");
    }
    EnvFilter::try_from_default_env().or_else(|_| parse_filter(DEFAULT_LEVEL))
}

fn parse_filter(filter: &str) -> Result<EnvFilter, LoggerError> {
    EnvFilter::try_new(filter).map_err(|e| LoggerError::Filter {
        filter: filter.to_string(),
        reason: e.to_string(),
    })
}

/// Install the global subscriber. Call once at startup.
pub fn init(verbose: bool) -> Result<(), LoggerError> {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbose)?)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| LoggerError::Install(e.to_string()))
}
