//! Error types.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed error returned by command handlers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors from strict command registration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("command already registered: {0}")]
    DuplicateCommand(String),

    #[error("command name must be a single non-empty token: {0:?}")]
    InvalidName(String),
}

/// Failures that escape a turn.
///
/// Unauthorized users, unknown subcommands and missing options are ordinary
/// outcomes, not errors. Only a failing handler ends up here.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("handler for command `{command}` failed: {source}")]
    Handler {
        command: String,
        #[source]
        source: BoxError,
    },
}

/// Errors loading library settings from disk.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("invalid JSON in config: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}
