use std::io;
use thiserror::Error;

/// Crate-wide error type, consolidating every fallible boundary into a single enum.
///
/// The turn engine itself (classification, affect, analytics) is total and never
/// produces one of these; they come from configuration, collaborators and actor plumbing.
#[derive(Debug, Error)]
pub enum AppError {
    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Represents failures of the session actor, such as a closed mailbox.
    #[error("Actor error: {0}")]
    Actor(String),

    /// Represents data validation errors (e.g., out-of-range configuration values).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents configuration-related errors (e.g., unparsable environment variables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents a failed call to the reply or summary generator.
    #[error("Generator error: {0}")]
    Generator(String),

    /// Represents a failed submission to the persistence backend.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Represents errors from operations that did not complete in time.
    #[error("Operation timed out: {0}")]
    Timeout(String),
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        match self {
            AppError::Io(e) => AppError::Io(io::Error::new(e.kind(), e.to_string())),
            AppError::Actor(s) => AppError::Actor(s.clone()),
            AppError::Validation(s) => AppError::Validation(s.clone()),
            AppError::Config(s) => AppError::Config(s.clone()),
            AppError::Generator(s) => AppError::Generator(s.clone()),
            AppError::Persistence(s) => AppError::Persistence(s.clone()),
            AppError::Timeout(s) => AppError::Timeout(s.clone()),
        }
    }
}

impl From<tokio::time::error::Elapsed> for AppError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        AppError::Timeout(format!("Operation timed out: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("JSON error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Generator(format!("HTTP error: {}", err))
    }
}
