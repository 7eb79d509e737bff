//! Error types for the AutoDeploy console

use thiserror::Error;

/// Main error type for the console application.
///
/// The simulated deployment itself never fails; these cover the shell around
/// it (settings, logging, the local server and shutdown).
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Shutdown error: {0}")]
    ShutdownError(String),
}
