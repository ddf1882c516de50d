//! Error types for line token access.

use std::fmt;

/// Result type alias for line token operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a packed token buffer was rejected by [`LineTokens::try_new`].
///
/// [`LineTokens::try_new`]: crate::LineTokens::try_new
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MalformedReason {
    /// The buffer does not hold whole `(start, metadata)` pairs.
    OddLength { len: usize },
    /// A non-empty line came with no tokens.
    MissingTokens { line_len: usize },
    /// The first token does not start at offset 0.
    FirstStartNotZero { start: u32 },
    /// A token starts before the token preceding it.
    Unsorted { index: usize },
    /// A token starts past the end of the line.
    StartBeyondLine { index: usize, start: u32, line_len: usize },
    /// The line is longer than a packed offset can address.
    LineTooLong { line_len: usize },
}

/// Error type for line token operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Token index outside `0..count`.
    IndexOutOfRange { index: usize, count: usize },
    /// Offset lookup on a line that has no tokens.
    EmptyLine,
    /// Packed buffer violates the token array invariants.
    MalformedTokens(MalformedReason),
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OddLength { len } => write!(f, "buffer length {len} is not even"),
            Self::MissingTokens { line_len } => {
                write!(f, "no tokens for line of {line_len} bytes")
            }
            Self::FirstStartNotZero { start } => {
                write!(f, "first token starts at {start}, expected 0")
            }
            Self::Unsorted { index } => {
                write!(f, "token {index} starts before its predecessor")
            }
            Self::StartBeyondLine {
                index,
                start,
                line_len,
            } => write!(
                f,
                "token {index} starts at {start}, past line length {line_len}"
            ),
            Self::LineTooLong { line_len } => {
                write!(f, "line length {line_len} does not fit a packed offset")
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, count } => {
                write!(f, "token index {index} out of range for {count} tokens")
            }
            Self::EmptyLine => write!(f, "line has no tokens"),
            Self::MalformedTokens(reason) => write!(f, "malformed token buffer: {reason}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<MalformedReason> for Error {
    fn from(reason: MalformedReason) -> Self {
        Self::MalformedTokens(reason)
    }
}
