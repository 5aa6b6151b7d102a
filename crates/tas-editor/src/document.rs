//! Documents: the line store navigation reads from.
//!
//! Navigation only ever *reads* text, through the [`LineSource`] trait: a
//! line lookup, the line count and the total length. Hosts with their own
//! buffer implement the trait directly; [`Document`] is the rope-backed
//! implementation the crate ships with.
//!
//! # Design choices
//!
//! - **ropey** gives O(log n) line lookup and char/line conversion, which is
//!   all the caret engine needs per keystroke.
//!
//! - **Lines are 1-based** on this API, matching [`Position`].
//!
//! - **Edits notify subscribers.** A host that mirrors the text elsewhere
//!   (a view model, a file watcher) registers a handler with
//!   [`Document::subscribe`] instead of wiring an event delegate. The
//!   navigation core never subscribes; it re-reads lines on demand.

use std::borrow::Cow;
use std::fmt;

use ropey::Rope;

use crate::error::DocumentError;
use crate::position::{Position, Range};

// ---------------------------------------------------------------------------
// LineSource
// ---------------------------------------------------------------------------

/// Read-only line access, as consumed by the navigation engine.
pub trait LineSource {
    /// Number of lines. A document always has at least one (possibly empty)
    /// line; zero means the source is broken.
    fn line_count(&self) -> usize;

    /// Text of a 1-based line without its line ending. `None` when the line
    /// does not exist.
    fn line_text(&self, line: usize) -> Option<Cow<'_, str>>;

    /// Total length in chars, line endings included.
    fn text_len(&self) -> usize;

    /// Position of a char offset. `None` when `offset > text_len()`.
    fn location_of(&self, offset: usize) -> Option<Position>;

    /// Chars in a line, excluding the line ending.
    fn line_len(&self, line: usize) -> Option<usize> {
        self.line_text(line).map(|text| text.chars().count())
    }
}

// ---------------------------------------------------------------------------
// Line ending detection
// ---------------------------------------------------------------------------

/// Line ending style of a document, detected from the first occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineEnding {
    /// `\n`
    Lf,
    /// `\r\n`
    CrLf,
    /// `\r`
    Cr,
}

impl LineEnding {
    /// The string form of this line ending.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::Cr => "\r",
        }
    }

    /// Detect the line ending from its first occurrence. `Lf` when the text
    /// has none.
    #[must_use]
    pub fn detect(text: &str) -> Self {
        let bytes = text.as_bytes();
        for (i, &byte) in bytes.iter().enumerate() {
            match byte {
                b'\n' if i > 0 && bytes[i - 1] == b'\r' => return Self::CrLf,
                b'\n' => return Self::Lf,
                b'\r' if bytes.get(i + 1) == Some(&b'\n') => return Self::CrLf,
                b'\r' => return Self::Cr,
                _ => {}
            }
        }
        Self::Lf
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lf => f.write_str("LF"),
            Self::CrLf => f.write_str("CRLF"),
            Self::Cr => f.write_str("CR"),
        }
    }
}

// ---------------------------------------------------------------------------
// Change notification
// ---------------------------------------------------------------------------

/// One committed edit, in char offsets of the text *before* the edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextChange {
    pub offset: usize,
    pub removed_len: usize,
    pub inserted_len: usize,
}

/// Handle returned by [`Document::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type ChangeHandler = Box<dyn FnMut(&TextChange)>;

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// A rope-backed script document.
pub struct Document {
    rope: Rope,
    line_ending: LineEnding,
    handlers: Vec<(SubscriptionId, ChangeHandler)>,
    next_subscription: u64,
}

impl Document {
    // -- Construction -------------------------------------------------------

    /// An empty document (one empty line).
    #[must_use]
    pub fn new() -> Self {
        Self::from_text("")
    }

    /// A document holding `text`.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            line_ending: LineEnding::detect(text),
            handlers: Vec::new(),
            next_subscription: 0,
        }
    }

    // -- Text access --------------------------------------------------------

    /// The underlying rope.
    #[inline]
    #[must_use]
    pub const fn rope(&self) -> &Rope {
        &self.rope
    }

    /// Detected line ending style.
    #[inline]
    #[must_use]
    pub const fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Collect all text into a `String`.
    #[must_use]
    pub fn contents(&self) -> String {
        self.rope.to_string()
    }

    /// Char offset of a position. The end-of-line slot (`line_len + 1`) is
    /// valid; anything further right is not.
    #[must_use]
    pub fn offset_of(&self, pos: Position) -> Option<usize> {
        if pos.line == 0 || pos.column == 0 || pos.line > self.rope.len_lines() {
            return None;
        }
        let len = self.line_len(pos.line)?;
        if pos.column > len + 1 {
            return None;
        }
        Some(self.rope.line_to_char(pos.line - 1) + pos.column - 1)
    }

    // -- Editing ------------------------------------------------------------

    /// Replace the whole text. Subscribers see one change covering the old
    /// text.
    pub fn set_text(&mut self, text: &str) {
        let change = TextChange {
            offset: 0,
            removed_len: self.rope.len_chars(),
            inserted_len: text.chars().count(),
        };
        self.rope = Rope::from_str(text);
        self.line_ending = LineEnding::detect(text);
        self.notify(&change);
    }

    /// Replace the text in `range` with `text`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::OutOfBounds`] if either endpoint is not a
    /// valid position. The document is unchanged in that case.
    pub fn replace(&mut self, range: Range, text: &str) -> Result<TextChange, DocumentError> {
        let start = self.checked_offset(range.start())?;
        let end = self.checked_offset(range.end())?;
        self.rope.remove(start..end);
        self.rope.insert(start, text);
        let change = TextChange {
            offset: start,
            removed_len: end - start,
            inserted_len: text.chars().count(),
        };
        self.notify(&change);
        Ok(change)
    }

    /// Insert `text` at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::OutOfBounds`] if `pos` is not a valid
    /// position.
    pub fn insert(&mut self, pos: Position, text: &str) -> Result<TextChange, DocumentError> {
        self.replace(Range::point(pos), text)
    }

    // -- Subscriptions ------------------------------------------------------

    /// Register a handler run after every committed edit.
    pub fn subscribe(&mut self, handler: impl FnMut(&TextChange) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Remove a handler. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    fn notify(&mut self, change: &TextChange) {
        for (_, handler) in &mut self.handlers {
            handler(change);
        }
    }

    fn checked_offset(&self, pos: Position) -> Result<usize, DocumentError> {
        self.offset_of(pos).ok_or(DocumentError::OutOfBounds {
            line: pos.line,
            column: pos.column,
        })
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSource for Document {
    fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    fn line_text(&self, line: usize) -> Option<Cow<'_, str>> {
        if line == 0 || line > self.rope.len_lines() {
            return None;
        }
        let slice = self.rope.line(line - 1);
        let text = match slice.as_str() {
            Some(text) => Cow::Borrowed(text),
            None => Cow::Owned(slice.to_string()),
        };
        Some(strip_line_ending(text))
    }

    fn text_len(&self) -> usize {
        self.rope.len_chars()
    }

    fn location_of(&self, offset: usize) -> Option<Position> {
        if offset > self.rope.len_chars() {
            return None;
        }
        let line = self.rope.char_to_line(offset);
        let line_start = self.rope.line_to_char(line);
        Some(Position::new(line + 1, offset - line_start + 1))
    }
}

/// Every character ropey ends a line on: LF, CR (and so CRLF), VT, FF,
/// NEL, LINE SEPARATOR and PARAGRAPH SEPARATOR.
const LINE_BREAKS: [char; 7] = [
    '\n', '\r', '\u{000B}', '\u{000C}', '\u{0085}', '\u{2028}', '\u{2029}',
];

fn strip_line_ending(text: Cow<'_, str>) -> Cow<'_, str> {
    let trimmed_len = text.trim_end_matches(LINE_BREAKS).len();
    if trimmed_len == text.len() {
        return text;
    }
    match text {
        Cow::Borrowed(text) => Cow::Borrowed(&text[..trimmed_len]),
        Cow::Owned(mut text) => {
            text.truncate(trimmed_len);
            Cow::Owned(text)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
