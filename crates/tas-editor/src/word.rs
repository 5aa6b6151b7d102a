//! Word stops within a single line.
//!
//! Ordinary-text word movement (Ctrl+Left / Ctrl+Right) stops at the start
//! of every word. A word is a run of same-class characters:
//!
//! - **Word**: letters, digits, underscore
//! - **Punctuation**: any other non-blank character
//! - **Blank**: whitespace, never a stop on its own
//!
//! `hello.world` holds three words (`hello`, `.`, `world`). Column 1 and the
//! end-of-line slot are always stops, so repeated jumps reach the line edges
//! before the navigator wraps to a neighbouring line.
//!
//! Columns are 1-based char offsets, the same as [`Position`](crate::Position).

// ---------------------------------------------------------------------------
// Character classification
// ---------------------------------------------------------------------------

/// Character class for word boundary detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CharClass {
    /// Letters, digits, underscore.
    Word,
    /// Non-blank, non-word characters (commas, dots, operators).
    Punctuation,
    /// Whitespace.
    Blank,
}

/// Classify a character for word stops.
pub(crate) fn classify(ch: char) -> CharClass {
    if ch.is_whitespace() {
        CharClass::Blank
    } else if ch.is_alphanumeric() || ch == '_' {
        CharClass::Word
    } else {
        CharClass::Punctuation
    }
}

// ---------------------------------------------------------------------------
// Stops
// ---------------------------------------------------------------------------

/// The next word stop strictly after `column`, or `None` when the caret is
/// already at (or past) the end of the line.
#[must_use]
pub fn next_word_start(line: &str, column: usize) -> Option<usize> {
    let chars: Vec<char> = line.chars().collect();
    let end = chars.len() + 1;
    if column >= end {
        return None;
    }

    let found = (column.max(1) + 1..end).find(|&candidate| is_word_start(&chars, candidate));
    Some(found.unwrap_or(end))
}

/// The previous word stop strictly before `column`, or `None` when the
/// caret is already at column 1.
#[must_use]
pub fn prev_word_start(line: &str, column: usize) -> Option<usize> {
    let chars: Vec<char> = line.chars().collect();
    if column <= 1 {
        return None;
    }

    let column = column.min(chars.len() + 1);
    let found = (2..column)
        .rev()
        .find(|&candidate| is_word_start(&chars, candidate));
    Some(found.unwrap_or(1))
}

/// True when the char at `column` starts a word: it is non-blank and its
/// class differs from the char before it.
fn is_word_start(chars: &[char], column: usize) -> bool {
    let Some(&ch) = chars.get(column - 1) else {
        return false;
    };
    let class = classify(ch);
    if class == CharClass::Blank {
        return false;
    }
    column == 1 || chars.get(column - 2).is_none_or(|&prev| classify(prev) != class)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
