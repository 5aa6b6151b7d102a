//! Caret movement commands.
//!
//! One closed enumeration covers every way the caret can be moved by a
//! key. Each command maps to exactly one resulting position given the
//! current state; the enum itself carries no state.

use std::fmt;

/// A caret movement command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaretMovement {
    /// Stay put.
    None,
    CharLeft,
    CharRight,
    WordLeft,
    WordRight,
    LineUp,
    LineDown,
    PageUp,
    PageDown,
    LineStart,
    LineEnd,
    DocumentStart,
    DocumentEnd,
    /// One step left for deletion purposes. Moves by code point in plain
    /// text and by whole token on action lines.
    Backspace,
}

impl CaretMovement {
    /// Every movement, in declaration order.
    pub const ALL: [Self; 14] = [
        Self::None,
        Self::CharLeft,
        Self::CharRight,
        Self::WordLeft,
        Self::WordRight,
        Self::LineUp,
        Self::LineDown,
        Self::PageUp,
        Self::PageDown,
        Self::LineStart,
        Self::LineEnd,
        Self::DocumentStart,
        Self::DocumentEnd,
        Self::Backspace,
    ];

    /// Vertical movements keep the desired horizontal position; every other
    /// movement resets it.
    #[inline]
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(
            self,
            Self::LineUp | Self::LineDown | Self::PageUp | Self::PageDown
        )
    }

    /// Movements that step toward the start of the line.
    #[inline]
    #[must_use]
    pub const fn is_leftward(self) -> bool {
        matches!(self, Self::CharLeft | Self::WordLeft | Self::Backspace)
    }

    /// Movements that step toward the end of the line.
    #[inline]
    #[must_use]
    pub const fn is_rightward(self) -> bool {
        matches!(self, Self::CharRight | Self::WordRight)
    }
}

impl fmt::Display for CaretMovement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
