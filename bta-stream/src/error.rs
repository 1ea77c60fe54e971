//! Error taxonomy of the streaming engine.
//!
//! This module provides the [`Error`] enum shared by every command built on
//! the engine, along with a convenient [`Result`] type alias. The variants
//! deliberately mirror how failures are reported to users: usage mistakes,
//! malformed data (always with file/array context), arithmetic overflow,
//! index violations, and plain I/O failures are all distinct.

use std::io;
use thiserror::Error;

/// Result type alias for streaming operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while streaming arrays.
#[derive(Error, Debug)]
pub enum Error {
    /// Bad invocation, including refusal to write binary data to a terminal.
    #[error("{message}")]
    Usage {
        /// Description of the misuse.
        message: String,
    },

    /// Malformed or truncated data, or incompatible operand shapes/types.
    #[error("{context}: {reason}")]
    Format {
        /// Where the problem was found, e.g. `input.bta array 3`.
        context: String,
        /// Description of the format violation.
        reason: String,
    },

    /// Checked arithmetic produced a value outside the target type's range.
    #[error("numeric overflow: {reason}")]
    Overflow {
        /// The operation that overflowed.
        reason: String,
    },

    /// A linear index or coordinate is out of range for its shape.
    #[error("invalid index: {reason}")]
    Index {
        /// Description of the violation.
        reason: String,
    },

    /// I/O failure on a byte channel.
    #[error("{context}: {source}")]
    Io {
        /// The channel the failure occurred on.
        context: String,
        /// The underlying I/O error.
        source: io::Error,
    },
}

impl Error {
    /// Create a Usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage { message: message.into() }
    }

    /// Create a Format error with file/array context.
    pub fn format(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Format {
            context: context.into(),
            reason: reason.into(),
        }
    }

    /// Create an Overflow error.
    pub fn overflow(reason: impl Into<String>) -> Self {
        Self::Overflow { reason: reason.into() }
    }

    /// Create an Index error.
    pub fn index(reason: impl Into<String>) -> Self {
        Self::Index { reason: reason.into() }
    }

    /// Create an Io error with channel context.
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Attach file/array context to a container format error.
    pub(crate) fn from_core(context: impl Into<String>, err: bta_core::Error) -> Self {
        match err {
            bta_core::Error::Io(source) => Self::io(context, source),
            bta_core::Error::UnexpectedEof => Self::format(context, "unexpected end of stream"),
            bta_core::Error::InvalidFormat { reason } => Self::format(context, reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_context() {
        let err = Error::format("input.bta array 3", "bad magic bytes");
        assert_eq!(err.to_string(), "input.bta array 3: bad magic bytes");

        let err = Error::overflow("255 - 0 does not fit in int8");
        assert!(err.to_string().starts_with("numeric overflow"));
    }

    #[test]
    fn test_from_core_maps_kinds() {
        let err = Error::from_core("f.bta array 0", bta_core::Error::UnexpectedEof);
        assert!(matches!(err, Error::Format { .. }));

        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = Error::from_core("f.bta array 0", bta_core::Error::Io(io_err));
        assert!(matches!(err, Error::Io { .. }));
    }
}
