//! Caret movement engine.
//!
//! [`Navigator::move_caret`] is the single entry point every movement key
//! goes through. On an action line the caret moves between meaningful
//! stops (frame digits, whole input tokens, feather payload characters);
//! on any other line the move is handed to a [`TextNavigator`].
//!
//! # Regions
//!
//! After snapping, the caret column on an action line falls in exactly one
//! region, and each `(region, movement)` pair has one rule:
//!
//! ```text
//!    15,R,F,45.5,1
//! ^^^^                 Digits   (columns 1..=MaxFramesDigits)
//!     ^                Boundary (MaxFramesDigits + 1)
//!       ^              Token    (right after a plain input letter)
//!         ^            Feather  (right after the feather letter)
//!          ^^^^^^^^^^  Payload  (no input letter to the left)
//! ```
//!
//! Whatever the rules produce is settled the same way: the line is clamped
//! into the document, the column into the line, and an action-line
//! destination is snapped again.

use tas_action::{ActionLine, InputSet};

use crate::caret::Caret;
use crate::document::LineSource;
use crate::error::NavigationError;
use crate::locator::inputs_adjacent;
use crate::movement::CaretMovement;
use crate::position::Position;
use crate::snap;
use crate::text::{PlainTextNavigator, TextNavigator};

/// Where a snapped caret sits on an action line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Digits,
    Boundary,
    Token,
    Feather,
    Payload,
}

/// What the region rules decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Same line, new column.
    Column(usize),
    /// Another line, same column (re-snapped on arrival).
    Line(usize),
    /// End of the previous line or start of the next one.
    Wrap(Position),
    /// No action-line rule; ask the ordinary-text navigator.
    Delegate,
}

/// The caret movement engine over one document.
pub struct Navigator<'a, T = PlainTextNavigator> {
    source: &'a dyn LineSource,
    text: T,
    max_frames_digits: usize,
}

impl<'a> Navigator<'a> {
    /// A navigator using [`PlainTextNavigator`] for ordinary lines.
    #[must_use]
    pub fn new(source: &'a dyn LineSource, max_frames_digits: usize) -> Self {
        Self::with_text_navigator(source, PlainTextNavigator::default(), max_frames_digits)
    }
}

impl<'a, T: TextNavigator> Navigator<'a, T> {
    /// A navigator delegating ordinary lines to `text`.
    #[must_use]
    pub const fn with_text_navigator(
        source: &'a dyn LineSource,
        text: T,
        max_frames_digits: usize,
    ) -> Self {
        Self {
            source,
            text,
            max_frames_digits,
        }
    }

    #[inline]
    #[must_use]
    pub const fn max_frames_digits(&self) -> usize {
        self.max_frames_digits
    }

    /// The action line at `line`, if that line parses as one.
    #[must_use]
    pub fn action_line(&self, line: usize) -> Option<ActionLine> {
        let text = self.source.line_text(line)?;
        ActionLine::try_parse(&text, self.max_frames_digits)
    }

    /// Snap `column` on `line` to a valid caret slot. Lines that are not
    /// action lines accept any column.
    #[must_use]
    pub fn snap_column(&self, line: usize, column: usize) -> usize {
        self.action_line(line)
            .map_or(column, |action| snap::snap_column(&action, column))
    }

    /// Move `caret` by `movement` and return its new position.
    ///
    /// # Errors
    ///
    /// Propagates [`NavigationError`] from the ordinary-text navigator, and
    /// reports [`NavigationError::NoValidCaretPosition`] when the document
    /// has no line to land on.
    pub fn move_caret(
        &self,
        caret: &mut Caret,
        movement: CaretMovement,
    ) -> Result<Position, NavigationError> {
        let mut desired_x = caret.desired_x();
        let position = caret.position();

        let raw = self
            .source
            .line_text(position.line)
            .ok_or(NavigationError::NoValidCaretPosition {
                line: position.line,
            })?;

        let (target, computed) = match ActionLine::try_parse(&raw, self.max_frames_digits) {
            Some(action) => {
                let limit = column_limit(&action, &raw);
                let column = snap::snap_column(&action, position.column.clamp(1, limit));
                let from = Position::new(position.line, column);
                match self.step(&action, &raw, from, movement)? {
                    Step::Column(column) => (from.with_column(column), true),
                    Step::Line(line) => (Position::new(line, column), true),
                    Step::Wrap(target) => {
                        tracing::debug!("wrap {} -> {} on {}", from, target, movement);
                        (target, true)
                    }
                    Step::Delegate => {
                        tracing::debug!("{} on action line {} delegated", movement, from.line);
                        let target =
                            self.text.move_caret(self.source, from, movement, &mut desired_x)?;
                        (target, false)
                    }
                }
            }
            None => {
                tracing::debug!("ordinary text at line {}: {}", position.line, movement);
                let target = self
                    .text
                    .move_caret(self.source, position, movement, &mut desired_x)?;
                (target, false)
            }
        };

        let target = self.settle(target, computed)?;
        if !movement.is_vertical() {
            desired_x = None;
        }
        caret.apply(target, desired_x);
        Ok(target)
    }

    // -- Action-line rules --------------------------------------------------

    fn step(
        &self,
        action: &ActionLine,
        raw: &str,
        from: Position,
        movement: CaretMovement,
    ) -> Result<Step, NavigationError> {
        let column = from.column;
        // Last caret slot: the last token edge, or the end of feather payload.
        let line_end = snap::snap_column(action, column_limit(action, raw));
        let first_digit = action.leading_spaces() + 1;
        let boundary = action.boundary_column();

        // Backspace removes the same extent CharLeft walks over.
        let movement = match movement {
            CaretMovement::Backspace => CaretMovement::CharLeft,
            other => other,
        };

        if movement.is_leftward() && column <= first_digit && from.line > 1 {
            let previous = from.line - 1;
            return Ok(Step::Wrap(Position::new(previous, self.line_end(previous)?)));
        }
        if movement.is_rightward() && column >= line_end && from.line < self.source.line_count() {
            return Ok(Step::Wrap(Position::new(from.line + 1, 1)));
        }

        let region = region_of(action, column);
        tracing::trace!("action line {} col {}: {:?} {}", from.line, column, region, movement);

        let step = match (region, movement) {
            // Overrides shared by every region.
            (_, CaretMovement::LineStart) => Step::Column(first_digit),
            (_, CaretMovement::LineEnd) => Step::Column(line_end),
            (_, CaretMovement::LineUp) => Step::Line(from.line.saturating_sub(1)),
            (_, CaretMovement::LineDown) => Step::Line(from.line + 1),
            (
                _,
                CaretMovement::None
                | CaretMovement::PageUp
                | CaretMovement::PageDown
                | CaretMovement::DocumentStart
                | CaretMovement::DocumentEnd,
            ) => Step::Delegate,

            (Region::Digits, CaretMovement::CharLeft) => Step::Column(column - 1),
            (Region::Digits, CaretMovement::CharRight) => Step::Column(column + 1),
            (Region::Digits | Region::Boundary, CaretMovement::WordLeft) => {
                Step::Column(first_digit)
            }
            (Region::Digits, CaretMovement::WordRight) => Step::Column(boundary),

            (Region::Boundary, CaretMovement::CharLeft) => Step::Column(column - 1),
            (Region::Boundary, CaretMovement::CharRight) => Step::Column(column + 2),
            (Region::Boundary, CaretMovement::WordRight) => Step::Column(line_end),

            (Region::Token | Region::Feather, CaretMovement::CharLeft) => Step::Column(column - 2),
            (Region::Token, CaretMovement::CharRight) => Step::Column(column + 2),
            (Region::Token | Region::Feather, CaretMovement::WordLeft) => Step::Column(boundary),
            (Region::Token, CaretMovement::WordRight) => Step::Column(line_end),
            (Region::Feather, CaretMovement::CharRight | CaretMovement::WordRight) => {
                Step::Column(column + 1)
            }

            (Region::Payload, movement) => Step::Column(payload_step(raw, column, movement)),

            // Backspace was folded into CharLeft above.
            (_, CaretMovement::Backspace) => Step::Column(column),
        };
        Ok(step)
    }

    // -- Settling -----------------------------------------------------------

    /// Clamp `target` into the document. An action-line destination is
    /// snapped; positions the engine computed get fresh layout hints.
    fn settle(&self, mut target: Position, computed: bool) -> Result<Position, NavigationError> {
        let line_count = self.source.line_count().max(1);
        let line = target.line.clamp(1, line_count);
        if line != target.line {
            target = Position::new(line, target.column);
        }

        let text = self
            .source
            .line_text(line)
            .ok_or(NavigationError::NoValidCaretPosition { line })?;
        let action = ActionLine::try_parse(&text, self.max_frames_digits);
        let limit = action
            .as_ref()
            .map_or_else(|| text.chars().count() + 1, |action| column_limit(action, &text));
        let column = target.column.clamp(1, limit);
        if column != target.column {
            target = target.with_column(column);
        }

        if let Some(action) = action {
            let snapped = snap::snap_column(&action, column);
            if snapped != column {
                tracing::trace!("snapped {}:{} to column {}", line, column, snapped);
            }
            target.column = snapped;
            target.refresh_visual();
        } else if computed {
            target.refresh_visual();
        }
        Ok(target)
    }

    /// Last caret slot of `line`.
    fn line_end(&self, line: usize) -> Result<usize, NavigationError> {
        let text = self
            .source
            .line_text(line)
            .ok_or(NavigationError::NoValidCaretPosition { line })?;
        Ok(match ActionLine::try_parse(&text, self.max_frames_digits) {
            Some(action) => snap::snap_column(&action, column_limit(&action, &text)),
            None => text.chars().count() + 1,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// One past the last usable column of an action line. Raw text with extra
/// spacing is longer than the canonical form and unpadded text is shorter;
/// both layouts must stay reachable.
fn column_limit(action: &ActionLine, raw: &str) -> usize {
    raw.chars().count().max(action.text_len()) + 1
}

fn region_of(action: &ActionLine, column: usize) -> Region {
    let boundary = action.boundary_column();
    if column < boundary {
        return Region::Digits;
    }
    if column == boundary {
        return Region::Boundary;
    }
    let left = inputs_adjacent(action, column, CaretMovement::CharLeft);
    if left.is_empty() {
        Region::Payload
    } else if left == InputSet::FEATHER {
        Region::Feather
    } else {
        Region::Token
    }
}

/// Movement inside free-form payload text (`45.5`), where the enclosing
/// commas bound the field and a `.` splits it in two word stops.
fn payload_step(raw: &str, column: usize, movement: CaretMovement) -> usize {
    let chars: Vec<char> = raw.chars().collect();
    let char_at = |column: usize| chars.get(column - 1).copied();

    let mut left = column;
    while left > 1 && char_at(left - 1) != Some(',') {
        left -= 1;
    }
    let mut right = column;
    while right <= chars.len() && char_at(right) != Some(',') {
        right += 1;
    }
    let dot = (left..right).find(|&c| char_at(c) == Some('.'));

    match movement {
        CaretMovement::CharLeft | CaretMovement::WordLeft if column == left => column - 1,
        CaretMovement::CharRight | CaretMovement::WordRight if column == right => column + 1,
        CaretMovement::CharLeft => column - 1,
        CaretMovement::CharRight => column + 1,
        CaretMovement::WordLeft => match dot {
            Some(dot) if column > dot => dot,
            _ => left,
        },
        CaretMovement::WordRight => match dot {
            Some(dot) if column <= dot => dot + 1,
            _ => right,
        },
        _ => column,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
