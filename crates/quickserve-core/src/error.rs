//! Shared error type across quickserve crates.

use thiserror::Error;

/// Stable error codes (used by tests and startup logs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Configuration could not be parsed or failed validation.
    BadConfig,
    /// Filesystem or socket failure.
    Io,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::Io => "IO",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, QuickServeError>;

/// Unified error type used by the simulator and the content server.
#[derive(Debug, Error)]
pub enum QuickServeError {
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("io: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
    #[error("internal: {0}")]
    Internal(String),
}

impl QuickServeError {
    /// Wrap an I/O failure with a short description of what was attempted.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        QuickServeError::Io {
            context: context.into(),
            source,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            QuickServeError::BadConfig(_) => ErrorCode::BadConfig,
            QuickServeError::Io { .. } => ErrorCode::Io,
            QuickServeError::Internal(_) => ErrorCode::Internal,
        }
    }
}
