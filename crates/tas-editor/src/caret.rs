//! Caret: a position plus the remembered horizontal position for vertical
//! movement.
//!
//! # Desired x
//!
//! When moving vertically, the caret remembers the display x it started
//! from. Passing through a short line and reaching a long line again puts
//! it back at that x. Any movement other than LineUp/LineDown/PageUp/
//! PageDown forgets it.
//!
//! The caret does not own or reference the document; the navigator reads
//! the document and updates the caret.

use crate::position::Position;

/// A caret in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Caret {
    position: Position,

    /// Remembered x (display cells) for vertical movement. `None` until the
    /// first vertical move captures it.
    desired_x: Option<usize>,
}

impl Caret {
    /// A caret at the start of the document.
    #[must_use]
    pub const fn new() -> Self {
        Self::at(Position::START)
    }

    /// A caret at a specific position, with no remembered x.
    #[must_use]
    pub const fn at(position: Position) -> Self {
        Self {
            position,
            desired_x: None,
        }
    }

    // -- Accessors ----------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    #[inline]
    #[must_use]
    pub const fn line(&self) -> usize {
        self.position.line
    }

    #[inline]
    #[must_use]
    pub const fn column(&self) -> usize {
        self.position.column
    }

    #[inline]
    #[must_use]
    pub const fn desired_x(&self) -> Option<usize> {
        self.desired_x
    }

    // -- Mutation -----------------------------------------------------------

    /// Place the caret, forgetting the remembered x (a click or an edit).
    pub const fn set_position(&mut self, position: Position) {
        self.position = position;
        self.desired_x = None;
    }

    /// Store the outcome of a movement: the new position and whatever the
    /// movement left in the remembered x.
    pub(crate) const fn apply(&mut self, position: Position, desired_x: Option<usize>) {
        self.position = position;
        self.desired_x = desired_x;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_at_document_start() {
        let caret = Caret::new();
        assert_eq!(caret.position(), Position::START);
        assert_eq!(caret.desired_x(), None);
        assert_eq!(Caret::default(), caret);
    }

    #[test]
    fn at_specific_position() {
        let caret = Caret::at(Position::new(3, 7));
        assert_eq!(caret.line(), 3);
        assert_eq!(caret.column(), 7);
    }

    #[test]
    fn set_position_forgets_desired_x() {
        let mut caret = Caret::new();
        caret.apply(Position::new(2, 4), Some(9));
        assert_eq!(caret.desired_x(), Some(9));
        caret.set_position(Position::new(1, 1));
        assert_eq!(caret.desired_x(), None);
    }
}
