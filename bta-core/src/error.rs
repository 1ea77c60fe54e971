//! Error types for the container format layer.
//!
//! This module provides the [`Error`] enum covering the failure modes of
//! header encoding and decoding, along with a convenient [`Result`] type
//! alias. Higher layers wrap these errors with file and array context.

use std::io;
use thiserror::Error;

/// Result type alias for container format operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while encoding or decoding container structures.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error from the underlying byte channel.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The bytes do not form a valid array header.
    #[error("invalid format: {reason}")]
    InvalidFormat {
        /// Description of the format violation.
        reason: String,
    },

    /// The channel ended in the middle of a structure.
    #[error("unexpected end of stream")]
    UnexpectedEof,
}

impl Error {
    /// Create an InvalidFormat error with the given reason.
    pub fn invalid_format(reason: impl Into<String>) -> Self {
        Self::InvalidFormat { reason: reason.into() }
    }
}
