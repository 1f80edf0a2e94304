//! Error types for the application.

use thiserror::Error;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {message}")]
    ParseError { message: String },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

/// Failures surfaced by command dispatch.
///
/// Role-argument validation never lands here; the role handler answers
/// those inline. Everything that escapes a handler or the dispatcher is
/// one of these, and the reporter turns it into a user-visible notice.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("unknown command '{name}'")]
    CommandNotFound { name: String },

    #[error("invoker lacks the required permissions")]
    MissingPermissions,

    #[error("invoker lacks the required role")]
    MissingRole,

    #[error("command check failed")]
    CheckFailure,

    #[error("{message}")]
    Domain { message: String },

    #[error("Discord API error: {0}")]
    Platform(#[from] serenity::Error),
}
