//! Error types for navigation and configuration.

use thiserror::Error;

use crate::movement::CaretMovement;

/// A navigation request with no valid answer.
///
/// These are invariant violations, not user situations: a document always
/// has at least one caret slot, and every movement has a defined result.
/// Hosts should treat them as bugs in the layout collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("no valid caret position on line {line}")]
    NoValidCaretPosition { line: usize },

    #[error("movement {0} is not supported here")]
    Unsupported(CaretMovement),
}

/// A rejected option setting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    #[error("unknown option: {0}")]
    Unknown(String),

    #[error("option {0} is not a boolean")]
    NotBoolean(String),

    #[error("option {0} is not numeric")]
    NotNumeric(String),

    #[error("invalid value {value:?} for {name}")]
    InvalidValue { name: String, value: String },
}

/// A document edit that names a position outside the text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("position {line}:{column} is outside the document")]
    OutOfBounds { line: usize, column: usize },
}
