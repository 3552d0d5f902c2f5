//! Error types for bizhook
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using HookError
pub type Result<T> = std::result::Result<T, HookError>;

/// Unified error type for bizhook operations
///
/// None of these are retried by the client. Retry policy belongs to the caller.
#[derive(Debug, Error)]
pub enum HookError {
    // -------------------------------------------------------------------------
    // Local Validation Errors
    // -------------------------------------------------------------------------
    /// Caller supplied an out-of-range kind, width or byte order.
    /// Raised before any I/O happens.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    // -------------------------------------------------------------------------
    // Network Errors
    // -------------------------------------------------------------------------
    /// Could not connect to the hook, or the socket failed mid-exchange
    /// (reset, abort, timeout).
    #[error("Connection error ({addr}): {source}")]
    Connection {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    /// The response did not follow `CODE_MESSAGE`, or its payload did not
    /// parse as the code demands.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The hook rejected the request with a non-success code.
    #[error("Remote error [{code}]: {message}")]
    Remote { code: i64, message: String },
}

impl HookError {
    /// Wrap an I/O error with the address it happened against
    pub(crate) fn connection(addr: impl Into<String>, source: std::io::Error) -> Self {
        HookError::Connection {
            addr: addr.into(),
            source,
        }
    }

    /// True if the hook itself reported the failure
    pub fn is_remote(&self) -> bool {
        matches!(self, HookError::Remote { .. })
    }

    /// True if the failure happened at the socket level
    pub fn is_connection(&self) -> bool {
        matches!(self, HookError::Connection { .. })
    }
}
