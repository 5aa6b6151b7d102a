//! Input tokens and input sets.
//!
//! Every input a TAS action line can hold maps to exactly one ASCII letter.
//! The order of [`Input::ALL`] is the **canonical order**: serialization
//! writes tokens in this order regardless of how the user typed them, and
//! the caret navigation layer walks tokens in this order too.
//!
//! | Input       | Letter | Input       | Letter |
//! |-------------|--------|-------------|--------|
//! | `Left`      | `L`    | `DemoDash2` | `V`    |
//! | `Right`     | `R`    | `Confirm`   | `O`    |
//! | `Up`        | `U`    | `Start`     | `S`    |
//! | `Down`      | `D`    | `Restart`   | `Q`    |
//! | `Jump`      | `J`    | `Journal`   | `N`    |
//! | `Jump2`     | `K`    | `Grab`      | `G`    |
//! | `Dash`      | `X`    | `Grab2`     | `H`    |
//! | `Dash2`     | `C`    | `Feather`   | `F`    |
//! | `DemoDash`  | `Z`    |             |        |
//!
//! `Feather` is last on purpose: its angle/magnitude payload is variable
//! width, so it must be the tail of the canonical text.

use std::fmt;

use bitflags::bitflags;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single input token.
///
/// The discriminant doubles as the bit index inside [`InputSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Input {
    Left,
    Right,
    Up,
    Down,
    Jump,
    Jump2,
    Dash,
    Dash2,
    DemoDash,
    DemoDash2,
    Confirm,
    Start,
    Restart,
    Journal,
    Grab,
    Grab2,
    /// Analog aim. Carries an optional angle and magnitude.
    Feather,
}

impl Input {
    /// Every input, in canonical order.
    pub const ALL: [Self; 17] = [
        Self::Left,
        Self::Right,
        Self::Up,
        Self::Down,
        Self::Jump,
        Self::Jump2,
        Self::Dash,
        Self::Dash2,
        Self::DemoDash,
        Self::DemoDash2,
        Self::Confirm,
        Self::Start,
        Self::Restart,
        Self::Journal,
        Self::Grab,
        Self::Grab2,
        Self::Feather,
    ];

    /// The letter this input serializes to (always upper-case).
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Left => 'L',
            Self::Right => 'R',
            Self::Up => 'U',
            Self::Down => 'D',
            Self::Jump => 'J',
            Self::Jump2 => 'K',
            Self::Dash => 'X',
            Self::Dash2 => 'C',
            Self::DemoDash => 'Z',
            Self::DemoDash2 => 'V',
            Self::Confirm => 'O',
            Self::Start => 'S',
            Self::Restart => 'Q',
            Self::Journal => 'N',
            Self::Grab => 'G',
            Self::Grab2 => 'H',
            Self::Feather => 'F',
        }
    }

    /// Look up the input for a letter. Case-insensitive.
    ///
    /// Returns `None` for anything that is not a known input letter,
    /// including digits and separators. Callers rely on this to tell a
    /// token letter apart from feather payload text.
    #[must_use]
    pub const fn from_letter(ch: char) -> Option<Self> {
        match ch.to_ascii_uppercase() {
            'L' => Some(Self::Left),
            'R' => Some(Self::Right),
            'U' => Some(Self::Up),
            'D' => Some(Self::Down),
            'J' => Some(Self::Jump),
            'K' => Some(Self::Jump2),
            'X' => Some(Self::Dash),
            'C' => Some(Self::Dash2),
            'Z' => Some(Self::DemoDash),
            'V' => Some(Self::DemoDash2),
            'O' => Some(Self::Confirm),
            'S' => Some(Self::Start),
            'Q' => Some(Self::Restart),
            'N' => Some(Self::Journal),
            'G' => Some(Self::Grab),
            'H' => Some(Self::Grab2),
            'F' => Some(Self::Feather),
            _ => None,
        }
    }

    /// The single-member set for this input.
    #[inline]
    #[must_use]
    pub const fn flag(self) -> InputSet {
        InputSet::from_bits_retain(1 << self as u32)
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

// ---------------------------------------------------------------------------
// InputSet
// ---------------------------------------------------------------------------

bitflags! {
    /// A set of inputs held on one frame.
    ///
    /// Bit `n` is `Input::ALL[n]`, so iterating set bits low to high visits
    /// members in canonical order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct InputSet: u32 {
        const LEFT       = 1 << 0;
        const RIGHT      = 1 << 1;
        const UP         = 1 << 2;
        const DOWN       = 1 << 3;
        const JUMP       = 1 << 4;
        const JUMP2      = 1 << 5;
        const DASH       = 1 << 6;
        const DASH2      = 1 << 7;
        const DEMO_DASH  = 1 << 8;
        const DEMO_DASH2 = 1 << 9;
        const CONFIRM    = 1 << 10;
        const START      = 1 << 11;
        const RESTART    = 1 << 12;
        const JOURNAL    = 1 << 13;
        const GRAB       = 1 << 14;
        const GRAB2      = 1 << 15;
        const FEATHER    = 1 << 16;
    }
}

impl InputSet {
    /// Members of the set, in canonical order.
    pub fn inputs(self) -> impl Iterator<Item = Input> {
        Input::ALL
            .into_iter()
            .filter(move |input| self.contains(input.flag()))
    }

    /// Whether `input` is a member.
    #[inline]
    #[must_use]
    pub const fn has(self, input: Input) -> bool {
        self.contains(input.flag())
    }

    /// The lone member of a one-element set, `None` otherwise.
    #[must_use]
    pub fn single(self) -> Option<Input> {
        if self.bits().count_ones() == 1 {
            self.inputs().next()
        } else {
            None
        }
    }

    /// Canonical index of `input` among the members, if present.
    #[must_use]
    pub fn position_of(self, input: Input) -> Option<usize> {
        self.inputs().position(|member| member == input)
    }
}

impl From<Input> for InputSet {
    #[inline]
    fn from(input: Input) -> Self {
        input.flag()
    }
}

impl FromIterator<Input> for InputSet {
    fn from_iter<I: IntoIterator<Item = Input>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, input| set | input.flag())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_round_trip() {
        for input in Input::ALL {
            assert_eq!(Input::from_letter(input.letter()), Some(input));
        }
    }

    #[test]
    fn letters_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for input in Input::ALL {
            assert!(seen.insert(input.letter()), "duplicate letter {input}");
        }
    }

    #[test]
    fn from_letter_is_case_insensitive() {
        assert_eq!(Input::from_letter('j'), Some(Input::Jump));
        assert_eq!(Input::from_letter('f'), Some(Input::Feather));
    }

    #[test]
    fn from_letter_rejects_non_inputs() {
        for ch in ['1', '.', ',', ' ', 'A', 'B', 'E', 'Y', '#'] {
            assert_eq!(Input::from_letter(ch), None, "{ch:?}");
        }
    }

    #[test]
    fn flag_matches_named_constants() {
        assert_eq!(Input::Left.flag(), InputSet::LEFT);
        assert_eq!(Input::Dash.flag(), InputSet::DASH);
        assert_eq!(Input::Grab2.flag(), InputSet::GRAB2);
        assert_eq!(Input::Feather.flag(), InputSet::FEATHER);
    }

    #[test]
    fn feather_is_last_in_canonical_order() {
        assert_eq!(Input::ALL.last(), Some(&Input::Feather));
    }

    #[test]
    fn inputs_iterate_in_canonical_order() {
        let set = InputSet::FEATHER | InputSet::JUMP | InputSet::LEFT | InputSet::DASH;
        let order: Vec<Input> = set.inputs().collect();
        assert_eq!(
            order,
            vec![Input::Left, Input::Jump, Input::Dash, Input::Feather]
        );
    }

    #[test]
    fn single_member() {
        assert_eq!(InputSet::JUMP.single(), Some(Input::Jump));
        assert_eq!((InputSet::JUMP | InputSet::DASH).single(), None);
        assert_eq!(InputSet::empty().single(), None);
    }

    #[test]
    fn position_of_member() {
        let set = InputSet::RIGHT | InputSet::JUMP | InputSet::GRAB;
        assert_eq!(set.position_of(Input::Right), Some(0));
        assert_eq!(set.position_of(Input::Grab), Some(2));
        assert_eq!(set.position_of(Input::Dash), None);
    }

    #[test]
    fn collect_from_inputs() {
        let set: InputSet = [Input::Dash, Input::Right, Input::Dash].into_iter().collect();
        assert_eq!(set, InputSet::DASH | InputSet::RIGHT);
    }
}
