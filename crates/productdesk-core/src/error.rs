//! Error types module
//!
//! Failures of a product write are classified into the variants of
//! [`SubmitError`]. None of them escape the form: each one is turned into a
//! user-visible notification at the point of detection.

use std::time::Duration;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for rejections the server reported on purpose
    Warn,
    /// Error level - for unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// A required draft field is empty. No remote call was made.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Delete was requested but the route carries no product slug.
    #[error("Missing product slug in route context")]
    MissingSlug,

    /// The remote call itself failed (network, HTTP status, malformed body).
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: anyhow::Error,
    },

    /// The server answered with `status: false`.
    #[error("Rejected by server: {0}")]
    Rejected(String),

    /// No answer arrived in time. The write may or may not have been applied.
    #[error("No response from server within {0:?}")]
    TimedOut(Duration),
}

impl SubmitError {
    pub fn transport(source: anyhow::Error) -> Self {
        SubmitError::Transport {
            message: source.to_string(),
            source,
        }
    }

    pub fn log_level(&self) -> LogLevel {
        match self {
            SubmitError::Validation(_) => LogLevel::Debug,
            SubmitError::Rejected(_) | SubmitError::TimedOut(_) => LogLevel::Warn,
            SubmitError::MissingSlug | SubmitError::Transport { .. } => LogLevel::Error,
        }
    }

    /// Text shown to the user. Validation and server rejections carry their own
    /// message verbatim; everything else falls back to `generic`.
    pub fn notification_text(&self, generic: &str) -> String {
        match self {
            SubmitError::Validation(msg) | SubmitError::Rejected(msg) => msg.clone(),
            SubmitError::MissingSlug
            | SubmitError::Transport { .. }
            | SubmitError::TimedOut(_) => generic.to_string(),
        }
    }
}
