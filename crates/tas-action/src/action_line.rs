//! The action line: one frame count plus the inputs held for it.
//!
//! # Canonical text
//!
//! ```text
//!   15,R,J,F,45,0.5
//! ^^^^                 frame count, right-aligned to MaxFramesDigits (4)
//!     ^                boundary: column MaxFramesDigits + 1
//!      ^^ ^^ ^^        one 2-char `,letter` token per input, canonical order
//!               ^^^^^^ feather payload `,angle,magnitude` (free width)
//! ```
//!
//! Columns are 1-based character offsets. The token after the boundary
//! ends at `MaxFramesDigits + 1 + 2 * (index + 1)`; those columns are the
//! only positions a caret may rest on inside the token run.
//!
//! Parsing is normalizing: `"15, j ,r"` and `"  15,R,J"` describe the same
//! line and render identically. Token width is fixed at two characters.
//! Custom, move-only and dash-only binds (which would need wider tokens)
//! are not part of the grammar and make the whole line fail to parse.

use std::fmt;

use crate::error::ParseError;
use crate::input::{Input, InputSet};

/// Default width of the frame-count field.
pub const DEFAULT_MAX_FRAMES_DIGITS: usize = 4;

/// Widest frame-count field a configuration may ask for. Nine digits keep
/// every count inside a `u32`.
pub const MAX_FRAMES_DIGITS_LIMIT: usize = 9;

/// Number of decimal digits in `frames`. Zero has one digit.
#[must_use]
pub fn digits_of(frames: u32) -> usize {
    frames.checked_ilog10().map_or(1, |log| log as usize + 1)
}

// ---------------------------------------------------------------------------
// ActionLine
// ---------------------------------------------------------------------------

/// A parsed action line.
///
/// Immutable once built. Lines are parsed on demand from buffer text and
/// dropped after use; the buffer stays the source of truth.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionLine {
    frames: u32,
    inputs: InputSet,
    feather_angle: Option<f64>,
    feather_magnitude: Option<f64>,
    max_frames_digits: usize,
}

impl ActionLine {
    // -- Construction -------------------------------------------------------

    /// Build a line from a frame count and a set of inputs, using the
    /// default frame-count width.
    #[must_use]
    pub const fn new(frames: u32, inputs: InputSet) -> Self {
        Self {
            frames,
            inputs,
            feather_angle: None,
            feather_magnitude: None,
            max_frames_digits: DEFAULT_MAX_FRAMES_DIGITS,
        }
    }

    /// Add feather aim with an angle and optional magnitude. Also adds
    /// [`Input::Feather`] to the input set.
    #[must_use]
    pub fn with_feather(mut self, angle: f64, magnitude: Option<f64>) -> Self {
        self.inputs = self.inputs.union(InputSet::FEATHER);
        self.feather_angle = Some(angle);
        self.feather_magnitude = magnitude;
        self
    }

    /// Use a different frame-count width. Clamped to
    /// `1..=MAX_FRAMES_DIGITS_LIMIT`.
    #[must_use]
    pub fn with_max_frames_digits(mut self, max_frames_digits: usize) -> Self {
        self.max_frames_digits = max_frames_digits.clamp(1, MAX_FRAMES_DIGITS_LIMIT);
        self
    }

    /// Parse one line of text.
    ///
    /// Accepts optional surrounding whitespace, a frame count of at most
    /// `max_frames_digits` digits, then any number of `,letter` tokens in any
    /// order and case. A feather token may be followed by up to two numeric
    /// fields (angle, then magnitude). Anything else is rejected.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] describing the first thing that does not fit
    /// the grammar. This is the expected outcome for comments and commands.
    pub fn parse(text: &str, max_frames_digits: usize) -> Result<Self, ParseError> {
        let max_frames_digits = max_frames_digits.clamp(1, MAX_FRAMES_DIGITS_LIMIT);
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ParseError::Empty);
        }

        let mut fields = trimmed.split(',').map(str::trim);
        let Some(frames_field) = fields.next() else {
            return Err(ParseError::Empty);
        };
        let frames = parse_frames(frames_field, max_frames_digits)?;

        let mut line =
            Self::new(frames, InputSet::empty()).with_max_frames_digits(max_frames_digits);
        // Numeric fields still allowed after the most recent feather token.
        let mut feather_slots = 0_u8;

        for field in fields {
            if field.is_empty() {
                return Err(ParseError::EmptyToken);
            }

            if is_numeric_field(field) {
                if feather_slots == 0 {
                    return Err(ParseError::ValueWithoutFeather(field.to_string()));
                }
                let value = parse_feather_value(field)?;
                if feather_slots == 2 {
                    line.feather_angle = Some(value);
                } else {
                    line.feather_magnitude = Some(value);
                }
                feather_slots -= 1;
                continue;
            }

            let input = parse_token(field)?;
            if input == Input::Feather {
                feather_slots = 2;
            } else {
                feather_slots = 0;
            }
            line.inputs |= input.flag();
        }

        Ok(line)
    }

    /// [`parse`](Self::parse), discarding the reason on failure.
    #[must_use]
    pub fn try_parse(text: &str, max_frames_digits: usize) -> Option<Self> {
        Self::parse(text, max_frames_digits).ok()
    }

    // -- Accessors ----------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn frames(&self) -> u32 {
        self.frames
    }

    #[inline]
    #[must_use]
    pub const fn inputs(&self) -> InputSet {
        self.inputs
    }

    #[inline]
    #[must_use]
    pub const fn feather_angle(&self) -> Option<f64> {
        self.feather_angle
    }

    #[inline]
    #[must_use]
    pub const fn feather_magnitude(&self) -> Option<f64> {
        self.feather_magnitude
    }

    /// Width of the right-aligned frame-count field.
    #[inline]
    #[must_use]
    pub const fn max_frames_digits(&self) -> usize {
        self.max_frames_digits
    }

    /// Canonical text. Same as `to_string()`.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }

    // -- Layout -------------------------------------------------------------

    /// Digits actually used by the frame count.
    #[must_use]
    pub fn digits(&self) -> usize {
        digits_of(self.frames)
    }

    /// Spaces padding the frame count on the left.
    #[must_use]
    pub fn leading_spaces(&self) -> usize {
        self.max_frames_digits.saturating_sub(self.digits())
    }

    /// Column between the frame count and the first token.
    #[inline]
    #[must_use]
    pub const fn boundary_column(&self) -> usize {
        self.max_frames_digits + 1
    }

    /// Number of input tokens.
    #[must_use]
    pub const fn token_count(&self) -> usize {
        self.inputs.bits().count_ones() as usize
    }

    /// Column right after each token's letter, in canonical order.
    pub fn token_columns(&self) -> impl Iterator<Item = usize> {
        let boundary = self.boundary_column();
        (1..=self.token_count()).map(move |index| boundary + 2 * index)
    }

    /// Column right after the last token letter (the boundary column when
    /// there are no inputs). Feather payload, if any, starts here.
    #[must_use]
    pub const fn tokens_end_column(&self) -> usize {
        self.boundary_column() + 2 * self.token_count()
    }

    /// Column right after `input`'s letter, or `None` if the line does not
    /// hold that input.
    #[must_use]
    pub fn column_of_input(&self, input: Input) -> Option<usize> {
        self.inputs
            .position_of(input)
            .map(|index| self.boundary_column() + 2 * (index + 1))
    }

    /// Length of the canonical text in characters.
    #[must_use]
    pub fn text_len(&self) -> usize {
        // Canonical text is pure ASCII.
        self.to_string().len()
    }
}

impl fmt::Display for ActionLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>width$}", self.frames, width = self.max_frames_digits)?;
        for input in self.inputs.inputs() {
            write!(f, ",{}", input.letter())?;
            if input == Input::Feather {
                if let Some(angle) = self.feather_angle {
                    write!(f, ",{angle}")?;
                    if let Some(magnitude) = self.feather_magnitude {
                        write!(f, ",{magnitude}")?;
                    }
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Field parsers
// ---------------------------------------------------------------------------

fn parse_frames(field: &str, max_frames_digits: usize) -> Result<u32, ParseError> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidFrames(field.to_string()));
    }
    if field.len() > max_frames_digits {
        return Err(ParseError::TooManyDigits {
            digits: field.len(),
            max: max_frames_digits,
        });
    }
    field
        .parse()
        .map_err(|_| ParseError::InvalidFrames(field.to_string()))
}

fn parse_token(field: &str) -> Result<Input, ParseError> {
    let mut chars = field.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => {
            Input::from_letter(ch).ok_or_else(|| ParseError::UnknownInput(field.to_string()))
        }
        _ => Err(ParseError::UnknownInput(field.to_string())),
    }
}

/// Numeric fields start like a number; letters never do.
fn is_numeric_field(field: &str) -> bool {
    field
        .chars()
        .next()
        .is_some_and(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.'))
}

fn parse_feather_value(field: &str) -> Result<f64, ParseError> {
    match field.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ParseError::InvalidFeatherValue(field.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn parse(text: &str) -> Result<ActionLine, ParseError> {
        ActionLine::parse(text, DEFAULT_MAX_FRAMES_DIGITS)
    }

    // -- digits_of ----------------------------------------------------------

    #[test]
    fn digits_of_counts() {
        assert_eq!(digits_of(0), 1);
        assert_eq!(digits_of(7), 1);
        assert_eq!(digits_of(15), 2);
        assert_eq!(digits_of(999), 3);
        assert_eq!(digits_of(1000), 4);
        assert_eq!(digits_of(999_999_999), 9);
    }

    // -- Parsing ------------------------------------------------------------

    #[test]
    fn parse_canonical_line() {
        let line = parse("  15,R,J").unwrap();
        assert_eq!(line.frames(), 15);
        assert_eq!(line.inputs(), InputSet::RIGHT | InputSet::JUMP);
        assert_eq!(line.feather_angle(), None);
    }

    #[test]
    fn parse_frames_only() {
        let line = parse("   1").unwrap();
        assert_eq!(line.frames(), 1);
        assert!(line.inputs().is_empty());
        assert_eq!(line.render(), "   1");
    }

    #[test]
    fn parse_tolerates_sloppy_spacing_and_case() {
        let line = parse("15 , j,  r ").unwrap();
        assert_eq!(line.render(), "  15,R,J");
    }

    #[test]
    fn parse_merges_duplicates() {
        assert_eq!(parse("5,R,R,J,R").unwrap().render(), "   5,R,J");
    }

    #[test]
    fn parse_feather_with_angle_and_magnitude() {
        let line = parse("  20,F,45.5,0.8").unwrap();
        assert!(line.inputs().has(Input::Feather));
        assert_eq!(line.feather_angle(), Some(45.5));
        assert_eq!(line.feather_magnitude(), Some(0.8));
        assert_eq!(line.render(), "  20,F,45.5,0.8");
    }

    #[test]
    fn parse_feather_angle_only() {
        let line = parse("20,F,90").unwrap();
        assert_eq!(line.feather_angle(), Some(90.0));
        assert_eq!(line.feather_magnitude(), None);
        assert_eq!(line.render(), "  20,F,90");
    }

    #[test]
    fn parse_feather_without_values() {
        let line = parse("1,F").unwrap();
        assert_eq!(line.feather_angle(), None);
        assert_eq!(line.render(), "   1,F");
    }

    #[test]
    fn feather_payload_moves_to_the_tail() {
        // Non-canonical order: the payload follows F, then more letters.
        let line = parse("3,F,180,1,R,X").unwrap();
        assert_eq!(line.render(), "   3,R,X,F,180,1");
    }

    #[test]
    fn parse_rejects_comments_and_commands() {
        assert_eq!(parse("# comment"), Err(ParseError::InvalidFrames("# comment".into())));
        assert!(parse("Read, file, 1").is_err());
        assert!(parse("RecordCount: 1").is_err());
    }

    #[test]
    fn parse_rejects_empty_line() {
        assert_eq!(parse(""), Err(ParseError::Empty));
        assert_eq!(parse("    "), Err(ParseError::Empty));
    }

    #[test]
    fn parse_rejects_too_many_digits() {
        assert_eq!(
            parse("12345,R"),
            Err(ParseError::TooManyDigits { digits: 5, max: 4 })
        );
        assert!(ActionLine::parse("12345,R", 5).is_ok());
    }

    #[test]
    fn parse_rejects_unknown_letter() {
        assert_eq!(parse("15,R,Y"), Err(ParseError::UnknownInput("Y".into())));
        assert_eq!(parse("15,RJ"), Err(ParseError::UnknownInput("RJ".into())));
    }

    #[test]
    fn parse_rejects_trailing_comma() {
        assert_eq!(parse("15,R,"), Err(ParseError::EmptyToken));
    }

    #[test]
    fn parse_rejects_value_without_feather() {
        assert_eq!(
            parse("15,R,45"),
            Err(ParseError::ValueWithoutFeather("45".into()))
        );
        // Third numeric field after F has no slot left.
        assert_eq!(
            parse("15,F,45,1,2"),
            Err(ParseError::ValueWithoutFeather("2".into()))
        );
    }

    #[test]
    fn parse_rejects_bad_feather_value() {
        assert_eq!(
            parse("15,F,4.5.1"),
            Err(ParseError::InvalidFeatherValue("4.5.1".into()))
        );
        assert_eq!(
            parse("15,F,1e999"),
            Err(ParseError::InvalidFeatherValue("1e999".into()))
        );
    }

    #[test]
    fn try_parse_discards_reason() {
        assert!(ActionLine::try_parse("  15,R", 4).is_some());
        assert!(ActionLine::try_parse("comment", 4).is_none());
    }

    // -- Rendering & layout -------------------------------------------------

    #[test]
    fn render_right_aligns_frames() {
        let line = ActionLine::new(7, InputSet::JUMP);
        assert_eq!(line.render(), "   7,J");
        let wide = ActionLine::new(7, InputSet::JUMP).with_max_frames_digits(6);
        assert_eq!(wide.render(), "     7,J");
    }

    #[test]
    fn render_uses_canonical_order() {
        let line = ActionLine::new(15, InputSet::DASH | InputSet::LEFT | InputSet::JUMP);
        assert_eq!(line.render(), "  15,L,J,X");
    }

    #[test]
    fn with_feather_adds_input() {
        let line = ActionLine::new(1, InputSet::empty()).with_feather(0.5, None);
        assert!(line.inputs().has(Input::Feather));
        assert_eq!(line.render(), "   1,F,0.5");
    }

    #[test]
    fn layout_facts() {
        let line = parse("  15,R,J").unwrap();
        assert_eq!(line.digits(), 2);
        assert_eq!(line.leading_spaces(), 2);
        assert_eq!(line.boundary_column(), 5);
        assert_eq!(line.token_count(), 2);
        assert_eq!(line.token_columns().collect::<Vec<_>>(), vec![7, 9]);
        assert_eq!(line.tokens_end_column(), 9);
        assert_eq!(line.text_len(), 8);
    }

    #[test]
    fn column_of_input_after_letter() {
        let line = parse("  15,R,J,F,90").unwrap();
        assert_eq!(line.column_of_input(Input::Right), Some(7));
        assert_eq!(line.column_of_input(Input::Jump), Some(9));
        assert_eq!(line.column_of_input(Input::Feather), Some(11));
        assert_eq!(line.column_of_input(Input::Dash), None);
    }

    #[test]
    fn no_inputs_tokens_end_at_boundary() {
        let line = parse("1234").unwrap();
        assert_eq!(line.leading_spaces(), 0);
        assert_eq!(line.tokens_end_column(), line.boundary_column());
        assert_eq!(line.token_columns().count(), 0);
    }

    // -- Properties ---------------------------------------------------------

    fn arb_line() -> impl Strategy<Value = ActionLine> {
        (
            0_u32..10_000,
            0_u32..(1 << 16),
            proptest::option::of((-360.0_f64..360.0, proptest::option::of(0.0_f64..1.0))),
        )
            .prop_map(|(frames, bits, feather)| {
                let line = ActionLine::new(frames, InputSet::from_bits_truncate(bits));
                match feather {
                    Some((angle, magnitude)) => line.with_feather(angle, magnitude),
                    None => line,
                }
            })
    }

    proptest! {
        #[test]
        fn prop_parse_render_round_trip(line in arb_line()) {
            let reparsed = ActionLine::parse(&line.render(), DEFAULT_MAX_FRAMES_DIGITS);
            prop_assert_eq!(reparsed, Ok(line));
        }

        #[test]
        fn prop_render_is_idempotent(line in arb_line()) {
            let once = line.render();
            let twice = parse(&once).unwrap().render();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_token_order_does_not_matter(
            frames in 0_u32..10_000,
            shuffled in proptest::sample::subsequence(Input::ALL[..16].to_vec(), 0..=16)
                .prop_shuffle()
        ) {
            let mut sorted = shuffled.clone();
            sorted.sort();
            let as_text = |inputs: &[Input]| {
                let mut text = frames.to_string();
                for input in inputs {
                    text.push(',');
                    text.push(input.letter());
                }
                text
            };
            let a = parse(&as_text(&shuffled)).unwrap();
            let b = parse(&as_text(&sorted)).unwrap();
            prop_assert_eq!(a.render(), b.render());
        }
    }
}
