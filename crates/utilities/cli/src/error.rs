//! Error types for CLI utilities.

use thiserror::Error;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::filter::ParseError;

/// Errors that can occur in CLI operations.
#[derive(Error, Debug)]
pub enum CliError {
    /// The log filter directives could not be parsed.
    #[error("Invalid log filter: {0}")]
    LogFilter(#[from] ParseError),

    /// A global tracing subscriber was already installed.
    #[error("Failed to install tracing subscriber: {0}")]
    TracingSubscriber(#[from] SetGlobalDefaultError),
}

/// Type alias for CLI results.
pub type CliResult<T> = Result<T, CliError>;
