//! Tracing subscriber initialization for the deploy binary

use crate::config::LogConfig;
use thiserror::Error;
use tracing_subscriber::filter::{Directive, EnvFilter, ParseError};

#[derive(Debug, Error)]
pub enum LogError {
    #[error("Invalid log level {0:?}: {1}")]
    Level(String, ParseError),

    #[error("Failed to initialize tracing subscriber: {0}")]
    Init(String),
}

/// Default directive from config; `RUST_LOG` overrides it at init
///
/// # Errors
///
/// Returns an error if the configured level is not a valid directive.
pub fn default_directive(config: &LogConfig) -> Result<Directive, LogError> {
    config
        .level
        .parse()
        .map_err(|e| LogError::Level(config.level.clone(), e))
}

/// Install a global fmt subscriber writing to stderr
///
/// Stdout is left to the script's own console output. Should only be
/// called once.
///
/// # Errors
///
/// Returns an error if the level is invalid or a subscriber is already set.
pub fn init_tracing(config: &LogConfig) -> Result<(), LogError> {
    let filter = EnvFilter::builder()
        .with_default_directive(default_directive(config)?)
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| LogError::Init(e.to_string()))
}
