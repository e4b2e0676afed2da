//! Error taxonomy for storage backends and the session controller.
//!
//! DESIGN
//! ======
//! `StoreError` describes what a backend did wrong. `SessionError` describes
//! what that means for the session: read failures fail closed inside
//! `initialize`, write failures are surfaced to `login`/`logout` callers.

// =============================================================================
// ERROR CODES
// =============================================================================

/// Grepable error code and retryable flag for caller-facing errors.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

// =============================================================================
// STORE ERROR
// =============================================================================

/// Failures raised by a [`crate::store::SessionStore`] backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend could not be reached or refused the request.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The backend accepted the request but failed to persist it.
    #[error("storage write failed for {key}: {reason}")]
    WriteFailed { key: String, reason: String },

    /// The call did not finish within the configured timeout.
    #[error("storage call timed out after {ms}ms")]
    TimedOut { ms: u64 },

    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted document could not be decoded.
    #[error("storage document corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

impl ErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "E_STORE_UNAVAILABLE",
            Self::WriteFailed { .. } => "E_STORE_WRITE",
            Self::TimedOut { .. } => "E_STORE_TIMEOUT",
            Self::Io(_) => "E_STORE_IO",
            Self::Corrupt(_) => "E_STORE_CORRUPT",
        }
    }

    fn retryable(&self) -> bool {
        !matches!(self, Self::Corrupt(_))
    }
}

// =============================================================================
// SESSION ERROR
// =============================================================================

/// Failures surfaced by [`crate::controller::SessionController`].
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A read failed. `initialize` treats this as "absent" and never returns it.
    #[error("session storage unavailable: {0}")]
    StorageUnavailable(#[source] StoreError),

    /// A write or delete failed during `login`/`logout`. Status was not changed.
    #[error("session storage write failed for {key}: {source}")]
    StorageWriteFailed {
        key: &'static str,
        #[source]
        source: StoreError,
    },

    /// A stored or supplied role tag is outside the closed role set.
    #[error("invalid role: {0:?}")]
    InvalidRole(String),

    /// `login` was called with an empty token.
    #[error("missing session token")]
    MissingToken,
}

impl ErrorCode for SessionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::StorageUnavailable(_) => "E_STORAGE_UNAVAILABLE",
            Self::StorageWriteFailed { .. } => "E_STORAGE_WRITE_FAILED",
            Self::InvalidRole(_) => "E_INVALID_ROLE",
            Self::MissingToken => "E_MISSING_TOKEN",
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::StorageUnavailable(source) | Self::StorageWriteFailed { source, .. } => source.retryable(),
            Self::InvalidRole(_) | Self::MissingToken => false,
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
