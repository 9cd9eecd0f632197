//! Error types for decoding unit configuration files.
//!
//! Decode errors are fatal for the whole call: no partial tree is ever
//! returned. Each syntax error carries the [`Position`] of the offending
//! token so callers can point at the exact line and column.
//!
//! ## Examples
//!
//! ```rust
//! use unitfile::{decode, Error};
//!
//! let err = decode(b"Name=eth0\n").unwrap_err();
//! assert!(matches!(err, Error::KeyOutsideSection { .. }));
//! assert!(err.to_string().starts_with("1:1"));
//! ```

use thiserror::Error;

use crate::scan::{Position, TokenKind};

/// All errors this crate can produce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Failure writing encoded output to an [`std::io::Write`] sink.
    #[error("IO error: {0}")]
    Io(String),

    /// The input was not valid UTF-8.
    #[error("invalid UTF-8: {0}")]
    InvalidUtf8(String),

    /// A section header line did not start with `[`.
    #[error("{position}: section needs to start with [, is: {literal:?}")]
    SectionMissingOpen { position: Position, literal: String },

    /// A section header line did not end with `]`.
    #[error("{position}: section needs to end with ], is: {literal:?}")]
    SectionMissingClose { position: Position, literal: String },

    /// A directive appeared before any section header.
    #[error("{position}: key started outside of section {literal:?}")]
    KeyOutsideSection { position: Position, literal: String },

    /// A bare token at key position was not followed by `=`.
    #[error("{position}: key not followed by = (ASSIGN), token found: {kind} {literal:?}")]
    KeyWithoutAssign {
        position: Position,
        kind: TokenKind,
        literal: String,
    },
}

impl Error {
    /// The source position attached to this error, if it has one.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        match self {
            Error::Io(_) | Error::InvalidUtf8(_) => None,
            Error::SectionMissingOpen { position, .. }
            | Error::SectionMissingClose { position, .. }
            | Error::KeyOutsideSection { position, .. }
            | Error::KeyWithoutAssign { position, .. } => Some(*position),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_positions() {
        let err = Error::KeyWithoutAssign {
            position: Position { line: 2, column: 5 },
            kind: TokenKind::Newline,
            literal: "\n".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("2:5"), "unexpected message: {msg}");
        assert!(msg.contains("NEWLINE"));
        assert_eq!(err.position(), Some(Position { line: 2, column: 5 }));
    }
}
