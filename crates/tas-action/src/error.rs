//! Reasons a line is not an action line.

use thiserror::Error;

/// Why [`ActionLine::parse`](crate::ActionLine::parse) rejected a line.
///
/// Rejection is ordinary control flow: comments, commands and half-typed
/// lines all land here, and the editor falls back to plain-text behaviour.
/// The variants exist so that callers (and trace logs) can say *why*.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line is empty")]
    Empty,

    #[error("invalid frame count {0:?}")]
    InvalidFrames(String),

    #[error("frame count has {digits} digits, at most {max} allowed")]
    TooManyDigits { digits: usize, max: usize },

    #[error("empty token")]
    EmptyToken,

    #[error("unknown input {0:?}")]
    UnknownInput(String),

    #[error("invalid feather value {0:?}")]
    InvalidFeatherValue(String),

    #[error("numeric field {0:?} without a preceding feather input")]
    ValueWithoutFeather(String),
}
