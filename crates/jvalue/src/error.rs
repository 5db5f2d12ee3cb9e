//! Error types for JSON decoding and stream encoding.

use thiserror::Error;

/// Errors that abort a decode, or a write to a caller-supplied stream.
///
/// "Nothing to parse" is not an error: decoding entry points report it as
/// `Ok(None)` / `Ok(false)`. Everything in this enum aborts the whole
/// top-level value being parsed.
#[derive(Error, Debug)]
pub enum JsonError {
    /// A structural violation in the input text.
    /// `offset` is the 0-based byte offset where it was detected.
    #[error("JSON parse error at byte {offset}: {message}")]
    Parse { offset: usize, message: String },

    /// Objects/arrays nested deeper than the decoder's configured limit.
    #[error("JSON nesting depth {depth} exceeds limit {max}")]
    NestingTooDeep { depth: usize, max: usize },

    /// The underlying reader or writer failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl JsonError {
    pub(crate) fn parse(offset: usize, message: impl Into<String>) -> Self {
        JsonError::Parse {
            offset,
            message: message.into(),
        }
    }

    /// Byte offset of a parse error, if this is one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            JsonError::Parse { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}

/// Convenience alias used throughout jvalue.
pub type Result<T> = std::result::Result<T, JsonError>;
