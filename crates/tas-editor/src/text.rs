//! Ordinary-text navigation.
//!
//! Every line that is not an action line (comments, commands, blank lines,
//! half-typed input) moves like text in any other editor. The caret engine
//! hands those moves to a [`TextNavigator`]. Hosts with a real layout engine
//! (wrapping, proportional fonts) implement the trait themselves.
//! [`PlainTextNavigator`] is the monospace, non-wrapping implementation used
//! by tests and simple hosts.

use std::borrow::Cow;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::document::LineSource;
use crate::error::NavigationError;
use crate::movement::CaretMovement;
use crate::position::Position;
use crate::word;

/// Default page height used by [`PlainTextNavigator`].
pub const DEFAULT_PAGE_LINES: usize = 20;

/// The ordinary-text navigation collaborator.
///
/// `desired_x` is the caret's remembered horizontal position in display
/// cells. Vertical movements read it (capturing it first if unset); every
/// other movement clears it.
pub trait TextNavigator {
    /// Compute where `movement` takes a caret at `position`.
    ///
    /// # Errors
    ///
    /// [`NavigationError::NoValidCaretPosition`] when the source has no line
    /// to place the caret on, [`NavigationError::Unsupported`] when the
    /// navigator has no answer for `movement`.
    fn move_caret(
        &self,
        source: &dyn LineSource,
        position: Position,
        movement: CaretMovement,
        desired_x: &mut Option<usize>,
    ) -> Result<Position, NavigationError>;
}

// ---------------------------------------------------------------------------
// PlainTextNavigator
// ---------------------------------------------------------------------------

/// Monospace, non-wrapping ordinary-text navigation.
///
/// - CharLeft/CharRight step one grapheme cluster; Backspace one code point.
/// - WordLeft/WordRight stop at word starts and line edges.
/// - Horizontal moves wrap to the neighbouring line at the line edges.
/// - Vertical moves keep the desired x (display cells, `unicode-width`).
/// - LineStart toggles between the first non-blank char and column 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlainTextNavigator {
    page_lines: usize,
}

impl PlainTextNavigator {
    #[must_use]
    pub const fn new(page_lines: usize) -> Self {
        Self {
            page_lines: if page_lines == 0 { 1 } else { page_lines },
        }
    }

    /// Lines moved by PageUp/PageDown.
    #[inline]
    #[must_use]
    pub const fn page_lines(&self) -> usize {
        self.page_lines
    }

    fn vertical(
        &self,
        source: &dyn LineSource,
        position: Position,
        movement: CaretMovement,
        desired_x: &mut Option<usize>,
    ) -> Result<Position, NavigationError> {
        let text = line_of(source, position.line)?;
        let x = *desired_x.get_or_insert_with(|| display_x(&text, position.column));
        let last_line = source.line_count();

        let target = match movement {
            CaretMovement::LineUp => position.line.checked_sub(1).filter(|&line| line >= 1),
            CaretMovement::LineDown => Some(position.line + 1).filter(|&line| line <= last_line),
            CaretMovement::PageUp => Some(position.line.saturating_sub(self.page_lines).max(1)),
            CaretMovement::PageDown => Some((position.line + self.page_lines).min(last_line)),
            other => return Err(NavigationError::Unsupported(other)),
        };
        let Some(target) = target else {
            return Ok(position);
        };

        let target_text = line_of(source, target)?;
        Ok(Position::new(target, column_at_x(&target_text, x)))
    }
}

impl Default for PlainTextNavigator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_LINES)
    }
}

impl TextNavigator for PlainTextNavigator {
    fn move_caret(
        &self,
        source: &dyn LineSource,
        position: Position,
        movement: CaretMovement,
        desired_x: &mut Option<usize>,
    ) -> Result<Position, NavigationError> {
        if movement.is_vertical() {
            return self.vertical(source, position, movement, desired_x);
        }
        *desired_x = None;

        match movement {
            CaretMovement::None => Ok(position),
            CaretMovement::DocumentStart => Ok(Position::START),
            CaretMovement::DocumentEnd => {
                source
                    .location_of(source.text_len())
                    .ok_or(NavigationError::NoValidCaretPosition {
                        line: position.line,
                    })
            }
            CaretMovement::CharLeft => {
                let text = line_of(source, position.line)?;
                let column = clamp_column(&text, position.column);
                let stop = grapheme_stops(&text).into_iter().rev().find(|&c| c < column);
                step_back(source, position, stop)
            }
            CaretMovement::Backspace => {
                let text = line_of(source, position.line)?;
                let column = clamp_column(&text, position.column);
                step_back(source, position, column.checked_sub(1).filter(|&c| c >= 1))
            }
            CaretMovement::WordLeft => {
                let text = line_of(source, position.line)?;
                step_back(source, position, word::prev_word_start(&text, position.column))
            }
            CaretMovement::CharRight => {
                let text = line_of(source, position.line)?;
                let column = clamp_column(&text, position.column);
                let stop = grapheme_stops(&text).into_iter().find(|&c| c > column);
                step_forward(source, position, stop)
            }
            CaretMovement::WordRight => {
                let text = line_of(source, position.line)?;
                step_forward(source, position, word::next_word_start(&text, position.column))
            }
            CaretMovement::LineStart => {
                let text = line_of(source, position.line)?;
                let first_non_blank = text
                    .chars()
                    .position(|ch| !ch.is_whitespace())
                    .map_or(1, |index| index + 1);
                let column = if position.column == first_non_blank {
                    1
                } else {
                    first_non_blank
                };
                Ok(Position::new(position.line, column))
            }
            CaretMovement::LineEnd => {
                let text = line_of(source, position.line)?;
                Ok(Position::new(position.line, text.chars().count() + 1).at_end())
            }
            CaretMovement::LineUp
            | CaretMovement::LineDown
            | CaretMovement::PageUp
            | CaretMovement::PageDown => Err(NavigationError::Unsupported(movement)),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn line_of(source: &dyn LineSource, line: usize) -> Result<Cow<'_, str>, NavigationError> {
    source
        .line_text(line)
        .ok_or(NavigationError::NoValidCaretPosition { line })
}

fn clamp_column(text: &str, column: usize) -> usize {
    column.clamp(1, text.chars().count() + 1)
}

/// Land on `stop` in the current line, or wrap to the end of the previous
/// line. At the start of the document the caret stays.
fn step_back(
    source: &dyn LineSource,
    position: Position,
    stop: Option<usize>,
) -> Result<Position, NavigationError> {
    if let Some(column) = stop {
        return Ok(Position::new(position.line, column));
    }
    if position.line <= 1 {
        return Ok(Position::START);
    }
    let previous = position.line - 1;
    let len = line_of(source, previous)?.chars().count();
    Ok(Position::new(previous, len + 1))
}

/// Land on `stop` in the current line, or wrap to the start of the next
/// line. At the end of the document the caret stays on the end slot.
fn step_forward(
    source: &dyn LineSource,
    position: Position,
    stop: Option<usize>,
) -> Result<Position, NavigationError> {
    if let Some(column) = stop {
        return Ok(Position::new(position.line, column));
    }
    if position.line >= source.line_count() {
        let len = line_of(source, position.line)?.chars().count();
        return Ok(Position::new(position.line, len + 1));
    }
    line_of(source, position.line + 1)?;
    Ok(Position::new(position.line + 1, 1))
}

/// Columns at grapheme cluster boundaries, from 1 through the end slot.
fn grapheme_stops(text: &str) -> Vec<usize> {
    let mut column = 1;
    let mut stops = vec![column];
    for grapheme in text.graphemes(true) {
        column += grapheme.chars().count();
        stops.push(column);
    }
    stops
}

/// Display width of everything left of `column`.
fn display_x(text: &str, column: usize) -> usize {
    let byte = text
        .char_indices()
        .nth(column.saturating_sub(1))
        .map_or(text.len(), |(index, _)| index);
    text[..byte].width()
}

/// The grapheme boundary nearest to display position `x`. Ties go right.
fn column_at_x(text: &str, x: usize) -> usize {
    let mut column = 1;
    let mut cells = 0;
    for grapheme in text.graphemes(true) {
        let width = grapheme.width();
        if x < cells + width.div_ceil(2) {
            break;
        }
        cells += width;
        column += grapheme.chars().count();
    }
    column
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
