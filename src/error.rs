//! Error types for sqltunnel.

use thiserror::Error;

/// Main error type for all tunnel operations.
#[derive(Debug, Error)]
pub enum TunnelError {
    /// Error reported by the embedded SQLite engine.
    ///
    /// Transparent so the wire-format error message is exactly the
    /// engine's own text.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// Base64 decode error for an encoded statement.
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Decoded statement is not valid UTF-8.
    #[error("statement is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Protocol error (malformed block, out-of-range wire field, etc.).
    #[error("protocol error: {0}")]
    Protocol(String),
}

/// Result type alias using TunnelError.
pub type Result<T> = std::result::Result<T, TunnelError>;
