//! Column snapping: keeping the caret on token boundaries.
//!
//! On an action line the caret may only rest:
//!
//! - on a frame-count digit or right after the last digit (never inside
//!   the leading padding),
//! - right after a token letter (`  15,R|,J|`),
//! - anywhere inside the feather payload, which is plain numeric text.
//!
//! [`snap_column`] maps any column onto one of those slots. It is
//! idempotent: snapping an already snapped column returns it unchanged.

use tas_action::{ActionLine, Input};

/// Snap `column` to the nearest valid caret slot of `line`.
///
/// Columns in the frame-count field clamp into the digits; columns in the
/// token run snap right to the next token edge (or the last one, which is
/// the boundary column on a line without inputs); columns at or past the
/// feather token are returned as-is.
#[must_use]
pub fn snap_column(line: &ActionLine, column: usize) -> usize {
    let column = column.max(1);

    if column <= line.boundary_column() {
        let first_digit = line.leading_spaces() + 1;
        return column.clamp(first_digit, first_digit + line.digits());
    }

    if line
        .column_of_input(Input::Feather)
        .is_some_and(|feather| column >= feather)
    {
        return column;
    }

    line.token_columns()
        .find(|&edge| edge >= column)
        .or_else(|| line.token_columns().last())
        .unwrap_or_else(|| line.boundary_column())
}
