//! # Wire Error Types
//!
//! Error types for buffer access and codec operations.
//!
//! All failures are local and synchronous: a malformed or truncated stream is
//! a permanent input error, so nothing here is retried internally. The crate
//! performs no logging of errors; callers decide how to report them.

use thiserror::Error;

/// Errors that can occur while reading, writing, or transcoding buffers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    /// A read or seek went past the end of the buffer.
    #[error("out of range: {requested} bytes at position {position}, {available} available")]
    OutOfRange {
        /// Offset the access started at.
        position: usize,
        /// Bytes the access needed.
        requested: usize,
        /// Total bytes in the buffer.
        available: usize,
    },

    /// A fixed-layout decode window does not match the type's encoded size.
    #[error("size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch {
        /// Encoded size of the target type.
        expected: usize,
        /// Size of the window handed to the decoder.
        actual: usize,
    },

    /// The stream's mode byte is neither 0 (raw) nor 1 (compressed).
    #[error("invalid mode byte: {0}")]
    InvalidMode(u8),

    /// String bytes are not valid UTF-8.
    #[error("invalid string encoding: {0}")]
    InvalidString(String),

    /// A two-byte char slot holds a surrogate code unit, or a char outside
    /// the Basic Multilingual Plane was written.
    #[error("invalid char code unit: {0:#x}")]
    InvalidChar(u32),

    /// The element type encodes to zero bytes; the wire format has no way to
    /// frame such elements, so the codec rejects them up front.
    #[error("zero-width element type")]
    ZeroWidthElement,
}

impl WireError {
    /// Creates an out-of-range error.
    #[must_use]
    pub fn out_of_range(position: usize, requested: usize, available: usize) -> Self {
        Self::OutOfRange {
            position,
            requested,
            available,
        }
    }

    /// Creates a size mismatch error.
    #[must_use]
    pub fn size_mismatch(expected: usize, actual: usize) -> Self {
        Self::SizeMismatch { expected, actual }
    }

    /// Returns true if this error indicates a truncated input.
    #[must_use]
    pub fn is_truncation(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }
}

/// Result type for buffer and codec operations.
pub type WireResult<T> = Result<T, WireError>;
