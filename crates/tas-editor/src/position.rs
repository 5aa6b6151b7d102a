//! Caret position and range types.
//!
//! All coordinates are **1-based**. Line 1 is the first line, column 1 is
//! the slot before the first character. Columns count Unicode scalar values
//! (chars), matching how `ropey` indexes text. A column one past the last
//! character (`line_len + 1`) is the end-of-line slot.
//!
//! 1-based columns are what the action-line layout is defined in
//! (`MaxFramesDigits + 1` is the boundary column), so the navigation code
//! uses them directly rather than converting at every step.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A caret position: (line, column), both 1-based, plus layout hints.
///
/// `visual_column` and `at_end_of_line` belong to the text layout engine
/// (wrapped lines have visual columns that differ from logical ones, and a
/// caret at a wrap point can sit at the end of the upper row). They are
/// carried along untouched by ordinary navigation and refreshed by
/// [`refresh_visual`](Self::refresh_visual) on action lines, which never
/// wrap.
///
/// # Equality and ordering
///
/// Only `(line, column)` takes part. Two positions naming the same slot are
/// equal even if their layout hints differ.
#[derive(Clone, Copy)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    /// 0-based visual column inside the line's layout.
    pub visual_column: usize,
    /// Caret sits at the end of a visual row rather than the start of the
    /// next one.
    pub at_end_of_line: bool,
}

impl Position {
    /// The first slot of the document.
    pub const START: Self = Self::new(1, 1);

    /// Create a position with layout hints derived from the column.
    #[inline]
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self {
            line,
            column,
            visual_column: column.saturating_sub(1),
            at_end_of_line: false,
        }
    }

    /// Same slot, marked as sitting at the end of its visual row.
    #[inline]
    #[must_use]
    pub const fn at_end(mut self) -> Self {
        self.at_end_of_line = true;
        self
    }

    /// Re-derive the layout hints from the logical column. Used on action
    /// lines, where canonical text has no wrapped rows.
    #[inline]
    pub const fn refresh_visual(&mut self) {
        self.visual_column = self.column.saturating_sub(1);
        self.at_end_of_line = false;
    }

    /// Same line, another column. Layout hints are re-derived.
    #[inline]
    #[must_use]
    pub const fn with_column(self, column: usize) -> Self {
        Self::new(self.line, column)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.line == other.line && self.column == other.column
    }
}

impl Eq for Position {}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.line.hash(state);
        self.column.hash(state);
    }
}

// Natural ordering: line first, then column.
impl Ord for Position {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then(self.column.cmp(&other.column))
    }
}

impl PartialOrd for Position {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pos({}:{})", self.line, self.column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// A half-open range between two positions: `[start, end)`.
///
/// Always normalized so that `start <= end`: the fields are private and
/// every constructor orders its endpoints. Selections keep their own
/// anchor/active pair and produce a `Range` on demand.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    start: Position,
    end: Position,
}

impl Range {
    /// Build a range from two arbitrary positions, swapping if needed.
    #[inline]
    #[must_use]
    pub fn ordered(a: Position, b: Position) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// A zero-width range at `pos`.
    #[inline]
    #[must_use]
    pub const fn point(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    #[inline]
    #[must_use]
    pub const fn start(self) -> Position {
        self.start
    }

    #[inline]
    #[must_use]
    pub const fn end(self) -> Position {
        self.end
    }

    /// True when the range spans zero characters.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start.line == self.end.line && self.start.column == self.end.column
    }

    /// Number of lines touched. An empty range still sits on one line.
    #[inline]
    #[must_use]
    pub const fn line_span(self) -> usize {
        self.end.line - self.start.line + 1
    }

    /// True when `pos` falls within `[start, end)`.
    #[inline]
    #[must_use]
    pub fn contains(self, pos: Position) -> bool {
        pos >= self.start && pos < self.end
    }
}

impl fmt::Debug for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Range({}:{} .. {}:{})",
            self.start.line, self.start.column, self.end.line, self.end.column
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_derives_visual_column() {
        let p = Position::new(3, 7);
        assert_eq!(p.visual_column, 6);
        assert!(!p.at_end_of_line);
    }

    #[test]
    fn start_is_line_one_column_one() {
        assert_eq!(Position::START, Position::new(1, 1));
        assert_eq!(Position::default(), Position::START);
    }

    #[test]
    fn equality_ignores_layout_hints() {
        let mut a = Position::new(2, 5);
        a.visual_column = 40;
        let b = Position::new(2, 5).at_end();
        assert_eq!(a, b);
    }

    #[test]
    fn refresh_visual_resets_hints() {
        let mut p = Position::new(1, 9).at_end();
        p.visual_column = 2;
        p.refresh_visual();
        assert_eq!(p.visual_column, 8);
        assert!(!p.at_end_of_line);
    }

    #[test]
    fn ordering_line_then_column() {
        assert!(Position::new(1, 100) < Position::new(2, 1));
        assert!(Position::new(4, 2) < Position::new(4, 3));
    }

    #[test]
    fn hash_matches_equality() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Position::new(1, 2));
        set.insert(Position::new(1, 2).at_end());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn display_and_debug() {
        let p = Position::new(10, 15);
        assert_eq!(format!("{p}"), "10:15");
        assert_eq!(format!("{p:?}"), "Pos(10:15)");
    }

    #[test]
    fn range_ordered_swaps() {
        let a = Position::new(5, 1);
        let b = Position::new(2, 3);
        let r = Range::ordered(a, b);
        assert_eq!(r.start(), b);
        assert_eq!(r.end(), a);
        assert_eq!(r.line_span(), 4);
    }

    #[test]
    fn range_point_is_empty() {
        let r = Range::point(Position::new(3, 3));
        assert!(r.is_empty());
        assert!(!r.contains(Position::new(3, 3)));
    }

    #[test]
    fn range_contains_half_open() {
        let r = Range::ordered(Position::new(1, 1), Position::new(2, 4));
        assert!(r.contains(Position::new(1, 1)));
        assert!(r.contains(Position::new(2, 3)));
        assert!(!r.contains(Position::new(2, 4)));
    }
}
