//! Cohda codec error types

use thiserror::Error;

/// Errors produced while decoding a Cohda header from raw bytes.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireError {
    /// Input buffer length does not match the fixed header size exactly
    #[error("header length mismatch: expected {expected} bytes, got {got}")]
    LengthMismatch {
        /// Required buffer length
        expected: usize,
        /// Actual buffer length
        got: usize,
    },

    /// A field read ran past the end of the buffer
    #[error("buffer exhausted: need {needed} more bytes, {remaining} left")]
    BufferExhausted {
        /// Bytes the next read required
        needed: usize,
        /// Bytes remaining in the buffer
        remaining: usize,
    },
}

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, WireError>;
