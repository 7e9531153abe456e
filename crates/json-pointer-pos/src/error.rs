//! Error types.

use thiserror::Error;

/// Malformed JSON reported by the tokenizer.
///
/// Every variant carries the byte offset at which the problem was detected.
/// A scan error aborts the whole resolution: offsets of siblings that have
/// not been visited yet depend on everything before them parsing cleanly.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("unexpected end of input at offset {0}")]
    UnexpectedEnd(usize),
    #[error("invalid JSON at offset {0}")]
    Invalid(usize),
    #[error("invalid string at offset {0}")]
    InvalidString(usize),
    #[error("invalid number at offset {0}")]
    InvalidNumber(usize),
    #[error("unexpected data after top-level value at offset {0}")]
    TrailingData(usize),
}

impl ScanError {
    /// Byte offset the error was reported at.
    pub fn offset(&self) -> usize {
        match *self {
            ScanError::UnexpectedEnd(x)
            | ScanError::Invalid(x)
            | ScanError::InvalidString(x)
            | ScanError::InvalidNumber(x)
            | ScanError::TrailingData(x) => x,
        }
    }
}

/// Invalid JSON Pointer syntax.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PointerError {
    #[error("JSON pointer must be empty or start with '/': {0:?}")]
    MissingLeadingSlash(String),
    #[error("invalid escape sequence in JSON pointer {pointer:?} at byte {at}")]
    InvalidEscape { pointer: String, at: usize },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Pointer(#[from] PointerError),
    #[error(transparent)]
    Scan(#[from] ScanError),
}
