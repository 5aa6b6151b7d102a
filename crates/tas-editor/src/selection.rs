//! Selections and the editing session that drives them.
//!
//! Every navigation key runs one of three handlers:
//!
//! - **move**: drop the selection, move the caret
//! - **extend**: move the caret, stretch the selection from where it was
//! - **box**: like extend, but the selection is a column rectangle
//!
//! [`EditorSession`] owns the document, caret, selection and options, and
//! exposes those handlers plus Select All. The host only resolves a key to
//! a [`NavigationCommand`] and calls [`EditorSession::execute`].

use tas_action::ActionLine;

use crate::caret::Caret;
use crate::document::{Document, LineSource};
use crate::error::NavigationError;
use crate::keymap::{NavigationCommand, SelectionMode};
use crate::movement::CaretMovement;
use crate::navigation::Navigator;
use crate::options::EditorOptions;
use crate::position::{Position, Range};
use crate::text::PlainTextNavigator;

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// The current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Empty,
    /// A contiguous run of text. `anchor` stays put; `active` follows the
    /// caret.
    Simple { anchor: Position, active: Position },
    /// A column rectangle.
    Rectangle(RectangleSelection),
}

impl Selection {
    /// A contiguous selection, or `Empty` when both ends coincide.
    #[must_use]
    pub fn simple(anchor: Position, active: Position) -> Self {
        if anchor == active {
            Self::Empty
        } else {
            Self::Simple { anchor, active }
        }
    }

    /// Start a selection at `from`, or keep the existing anchor, and move
    /// the endpoint to `to`.
    #[must_use]
    pub fn start_or_extend(self, from: Position, to: Position) -> Self {
        match self {
            Self::Empty => Self::simple(from, to),
            Self::Simple { anchor, .. } => Self::simple(anchor, to),
            Self::Rectangle(rect) => Self::Rectangle(RectangleSelection::new(rect.anchor, to)),
        }
    }

    /// True when nothing is selected. A rectangle is empty when it spans
    /// no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Simple { anchor, active } => anchor == active,
            Self::Rectangle(rect) => rect.anchor.column == rect.active.column,
        }
    }

    /// The ordered span between the two ends. For a rectangle this is the
    /// span from its top-left corner to its bottom-right corner.
    #[must_use]
    pub fn range(&self) -> Option<Range> {
        match self {
            Self::Empty => None,
            Self::Simple { anchor, active } => Some(Range::ordered(*anchor, *active)),
            Self::Rectangle(rect) => Some(rect.range()),
        }
    }

    #[must_use]
    pub const fn is_rectangle(&self) -> bool {
        matches!(self, Self::Rectangle(_))
    }
}

/// A rectangular (column) selection between two corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectangleSelection {
    pub anchor: Position,
    pub active: Position,
}

/// The part of one line covered by a rectangular selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSegment {
    pub line: usize,
    /// First covered column.
    pub start_column: usize,
    /// Column after the last covered character.
    pub end_column: usize,
}

impl LineSegment {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start_column == self.end_column
    }
}

impl RectangleSelection {
    #[must_use]
    pub const fn new(anchor: Position, active: Position) -> Self {
        Self { anchor, active }
    }

    /// Top-left to bottom-right.
    #[must_use]
    pub fn range(&self) -> Range {
        let (top, bottom) = self.lines();
        let (left, right) = self.columns();
        Range::ordered(Position::new(top, left), Position::new(bottom, right))
    }

    /// One segment per covered line. Lines shorter than the rectangle get a
    /// segment clamped to their end.
    #[must_use]
    pub fn segments(&self, source: &dyn LineSource) -> Vec<LineSegment> {
        let (top, bottom) = self.lines();
        let (left, right) = self.columns();
        (top..=bottom)
            .filter_map(|line| {
                let end = source.line_len(line)? + 1;
                Some(LineSegment {
                    line,
                    start_column: left.min(end),
                    end_column: right.min(end),
                })
            })
            .collect()
    }

    fn lines(&self) -> (usize, usize) {
        let (a, b) = (self.anchor.line, self.active.line);
        (a.min(b), a.max(b))
    }

    fn columns(&self) -> (usize, usize) {
        let (a, b) = (self.anchor.column, self.active.column);
        (a.min(b), a.max(b))
    }
}

// ---------------------------------------------------------------------------
// EditorSession
// ---------------------------------------------------------------------------

/// A document with its caret, selection and options.
pub struct EditorSession {
    document: Document,
    caret: Caret,
    selection: Selection,
    options: EditorOptions,
    /// Set by every handler; the host scrolls the caret into view and
    /// clears it with [`take_reveal_request`](Self::take_reveal_request).
    reveal: bool,
}

impl EditorSession {
    #[must_use]
    pub fn new(document: Document, options: EditorOptions) -> Self {
        Self {
            document,
            caret: Caret::new(),
            selection: Selection::Empty,
            options,
            reveal: false,
        }
    }

    // -- Accessors ----------------------------------------------------------

    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    #[must_use]
    pub const fn caret(&self) -> &Caret {
        &self.caret
    }

    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub const fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub const fn options_mut(&mut self) -> &mut EditorOptions {
        &mut self.options
    }

    /// Place the caret (a click, or after an edit), snapped if it lands on
    /// an action line. The selection is dropped.
    pub fn set_caret_position(&mut self, position: Position) {
        let column = self.navigator().snap_column(position.line, position.column);
        self.caret.set_position(position.with_column(column));
        self.selection = Selection::Empty;
    }

    /// Replace the whole text. The caret is clamped into the new text and
    /// the selection dropped.
    pub fn set_text(&mut self, text: &str) {
        self.document.set_text(text);
        let line = self.caret.line().clamp(1, self.document.line_count().max(1));
        let len = self.document.line_len(line).unwrap_or(0);
        self.set_caret_position(Position::new(line, self.caret.column().min(len + 1)));
    }

    /// Whether the caret moved since the last call. Clears the request.
    pub const fn take_reveal_request(&mut self) -> bool {
        std::mem::replace(&mut self.reveal, false)
    }

    /// The action line under the caret, if any.
    #[must_use]
    pub fn current_action_line(&self) -> Option<ActionLine> {
        self.navigator().action_line(self.caret.line())
    }

    // -- Handlers -----------------------------------------------------------

    /// Drop the selection and move the caret.
    ///
    /// # Errors
    ///
    /// Propagates [`NavigationError`] from the navigator. The session is
    /// left unchanged except for the dropped selection.
    pub fn move_caret(&mut self, movement: CaretMovement) -> Result<Position, NavigationError> {
        self.selection = Selection::Empty;
        let position = self.navigate(movement)?;
        self.reveal = true;
        Ok(position)
    }

    /// Move the caret and stretch the selection to follow it.
    ///
    /// # Errors
    ///
    /// Propagates [`NavigationError`] from the navigator.
    pub fn move_caret_extend_selection(
        &mut self,
        movement: CaretMovement,
    ) -> Result<Position, NavigationError> {
        let before = self.caret.position();
        let position = self.navigate(movement)?;
        self.selection = self.selection.start_or_extend(before, position);
        self.reveal = true;
        Ok(position)
    }

    /// Move the caret and stretch a rectangular selection to follow it.
    /// With box selection disabled this is [`move_caret_extend_selection`].
    ///
    /// [`move_caret_extend_selection`]: Self::move_caret_extend_selection
    ///
    /// # Errors
    ///
    /// Propagates [`NavigationError`] from the navigator.
    pub fn move_caret_box_selection(
        &mut self,
        movement: CaretMovement,
    ) -> Result<Position, NavigationError> {
        if self.options.rectangular_selection && !self.selection.is_rectangle() {
            let caret = self.caret.position();
            let corner = match self.selection {
                Selection::Simple { anchor, .. } => anchor,
                _ => caret,
            };
            self.selection = Selection::Rectangle(RectangleSelection::new(corner, caret));
        }
        self.move_caret_extend_selection(movement)
    }

    /// Select the whole document and put the caret at its end.
    ///
    /// # Errors
    ///
    /// [`NavigationError::NoValidCaretPosition`] if the document cannot
    /// locate its own end.
    pub fn select_all(&mut self) -> Result<Selection, NavigationError> {
        let end = self
            .document
            .location_of(self.document.text_len())
            .ok_or(NavigationError::NoValidCaretPosition {
                line: self.document.line_count(),
            })?;
        self.caret.set_position(end);
        self.selection = Selection::simple(Position::START, end);
        Ok(self.selection)
    }

    /// Run a resolved key binding.
    ///
    /// # Errors
    ///
    /// Propagates [`NavigationError`] from the navigator.
    pub fn execute(&mut self, command: NavigationCommand) -> Result<(), NavigationError> {
        match command {
            NavigationCommand::Caret { movement, mode } => {
                match mode {
                    SelectionMode::Move => self.move_caret(movement)?,
                    SelectionMode::Extend => self.move_caret_extend_selection(movement)?,
                    SelectionMode::Box => self.move_caret_box_selection(movement)?,
                };
            }
            NavigationCommand::SelectAll => {
                self.select_all()?;
            }
        }
        Ok(())
    }

    fn navigator(&self) -> Navigator<'_> {
        navigator_for(&self.document, &self.options)
    }

    fn navigate(&mut self, movement: CaretMovement) -> Result<Position, NavigationError> {
        navigator_for(&self.document, &self.options).move_caret(&mut self.caret, movement)
    }
}

fn navigator_for<'a>(document: &'a Document, options: &EditorOptions) -> Navigator<'a> {
    Navigator::with_text_navigator(
        document,
        PlainTextNavigator::new(options.page_lines),
        options.max_frames_digits,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
