//! Token location: which inputs sit next to a caret column.
//!
//! The caret engine asks "what is immediately to my left/right?" to decide
//! how far one step goes: a plain token costs two columns, the feather
//! token leads into free-form payload, and no adjacent input at all means
//! the caret is inside payload text.

use tas_action::{ActionLine, Input, InputSet};

use crate::movement::CaretMovement;

/// Inputs adjacent to `column` on the side `movement` looks at.
///
/// | Movement               | Result                                           |
/// |------------------------|--------------------------------------------------|
/// | `CharLeft`/`Backspace` | the input whose letter is just left of the caret |
/// | `CharRight`            | the input whose letter follows the next comma    |
/// | `WordLeft`             | every input from the caret back to the boundary  |
/// | `WordRight`            | every input from the caret to the end of tokens  |
///
/// `column` is expected to be snapped. Any other movement yields the empty
/// set, as does a column with nothing on the requested side.
#[must_use]
pub fn inputs_adjacent(line: &ActionLine, column: usize, movement: CaretMovement) -> InputSet {
    let text = line.render();
    let bytes = text.as_bytes();
    let boundary = line.boundary_column();
    let input_at = |index: usize| {
        bytes
            .get(index)
            .and_then(|&byte| Input::from_letter(char::from(byte)))
            .map_or_else(InputSet::empty, Input::flag)
    };

    match movement {
        CaretMovement::CharLeft | CaretMovement::Backspace if column > boundary => {
            //   15,R|,X => R
            input_at(column - 2)
        }
        CaretMovement::CharRight if column >= boundary && column < bytes.len() => {
            //   15,R|,X => X
            input_at(column)
        }
        CaretMovement::WordLeft if column > boundary => {
            //   15,R,D|,X => R,D
            let mut inputs = InputSet::empty();
            let mut column = column;
            while column > boundary {
                inputs |= input_at(column - 2);
                column -= 2;
            }
            inputs
        }
        CaretMovement::WordRight if column >= boundary && column < bytes.len() => {
            //   15,R|,D,X => D,X
            let mut inputs = InputSet::empty();
            let mut column = column;
            while column < bytes.len() {
                inputs |= input_at(column);
                column += 2;
            }
            inputs
        }
        _ => InputSet::empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tas_action::DEFAULT_MAX_FRAMES_DIGITS;

    fn line(text: &str) -> ActionLine {
        ActionLine::parse(text, DEFAULT_MAX_FRAMES_DIGITS).unwrap()
    }

    #[test]
    fn char_left_finds_previous_letter() {
        let l = line("  15,R,X");
        assert_eq!(inputs_adjacent(&l, 7, CaretMovement::CharLeft), InputSet::RIGHT);
        assert_eq!(inputs_adjacent(&l, 9, CaretMovement::CharLeft), InputSet::DASH);
        assert_eq!(inputs_adjacent(&l, 9, CaretMovement::Backspace), InputSet::DASH);
    }

    #[test]
    fn nothing_left_of_boundary() {
        let l = line("  15,R,X");
        assert!(inputs_adjacent(&l, 5, CaretMovement::CharLeft).is_empty());
        assert!(inputs_adjacent(&l, 3, CaretMovement::WordLeft).is_empty());
    }

    #[test]
    fn char_right_finds_next_letter() {
        let l = line("  15,R,X");
        assert_eq!(inputs_adjacent(&l, 5, CaretMovement::CharRight), InputSet::RIGHT);
        assert_eq!(inputs_adjacent(&l, 7, CaretMovement::CharRight), InputSet::DASH);
    }

    #[test]
    fn nothing_right_of_line_end() {
        let l = line("  15,R,X");
        assert!(inputs_adjacent(&l, 9, CaretMovement::CharRight).is_empty());
        assert!(inputs_adjacent(&l, 9, CaretMovement::WordRight).is_empty());
        assert!(inputs_adjacent(&l, 2, CaretMovement::CharRight).is_empty());
    }

    #[test]
    fn word_left_accumulates_run() {
        let l = line("  15,R,D,X");
        assert_eq!(
            inputs_adjacent(&l, 9, CaretMovement::WordLeft),
            InputSet::RIGHT | InputSet::DOWN
        );
        assert_eq!(
            inputs_adjacent(&l, 11, CaretMovement::WordLeft),
            InputSet::RIGHT | InputSet::DOWN | InputSet::DASH
        );
    }

    #[test]
    fn word_right_accumulates_run() {
        let l = line("  15,R,D,X");
        assert_eq!(
            inputs_adjacent(&l, 7, CaretMovement::WordRight),
            InputSet::DOWN | InputSet::DASH
        );
        assert_eq!(
            inputs_adjacent(&l, 5, CaretMovement::WordRight),
            InputSet::RIGHT | InputSet::DOWN | InputSet::DASH
        );
    }

    #[test]
    fn feather_letter_and_payload() {
        let l = line("   1,F,90");
        assert_eq!(inputs_adjacent(&l, 7, CaretMovement::CharLeft), InputSet::FEATHER);
        assert!(inputs_adjacent(&l, 8, CaretMovement::CharLeft).is_empty());
        assert!(inputs_adjacent(&l, 10, CaretMovement::CharLeft).is_empty());
    }

    #[test]
    fn other_movements_see_nothing() {
        let l = line("  15,R,X");
        for movement in [CaretMovement::LineUp, CaretMovement::PageDown, CaretMovement::None] {
            assert!(inputs_adjacent(&l, 7, movement).is_empty(), "{movement}");
        }
    }
}
