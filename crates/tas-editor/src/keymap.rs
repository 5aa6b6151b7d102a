//! Key-binding registry for navigation commands.
//!
//! A [`Keymap`] maps key gestures to [`NavigationCommand`]s. It is an
//! ordinary value: the host builds one at start-up (usually with
//! [`Keymap::with_defaults`]), adjusts it, and hands it to its input layer.
//! Nothing here is global.
//!
//! Platform conventions differ in which modifier means "whole word" and
//! which gestures reach line and document edges. [`HotkeyConfig`] captures
//! those differences; the binding table itself is the same everywhere.

use std::collections::HashMap;
use std::fmt;

use bitflags::bitflags;

use crate::movement::CaretMovement;

// ---------------------------------------------------------------------------
// Gestures
// ---------------------------------------------------------------------------

/// Keys that navigation bindings use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    /// A character key, stored upper-case (`A` for Select All).
    Char(char),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(ch) => write!(f, "{ch}"),
            other => fmt::Debug::fmt(other, f),
        }
    }
}

bitflags! {
    /// Keyboard modifier flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0000_0001;
        const ALT   = 0b0000_0010;
        const CTRL  = 0b0000_0100;
        const META  = 0b0000_1000;
    }
}

/// A key plus the modifiers held with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyGesture {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyGesture {
    #[must_use]
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        let key = match key {
            Key::Char(ch) => Key::Char(ch.to_ascii_uppercase()),
            other => other,
        };
        Self { key, modifiers }
    }

    /// The key with no modifiers.
    #[must_use]
    pub const fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::empty())
    }
}

impl fmt::Display for KeyGesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, name) in [
            (Modifiers::CTRL, "Ctrl"),
            (Modifiers::META, "Meta"),
            (Modifiers::ALT, "Alt"),
            (Modifiers::SHIFT, "Shift"),
        ] {
            if self.modifiers.contains(flag) {
                write!(f, "{name}+")?;
            }
        }
        write!(f, "{}", self.key)
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// How a caret movement treats the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionMode {
    /// Drop the selection, then move.
    Move,
    /// Move and extend the selection to the new position.
    Extend,
    /// Move and extend a rectangular selection.
    Box,
}

/// Something a navigation key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationCommand {
    Caret {
        movement: CaretMovement,
        mode: SelectionMode,
    },
    SelectAll,
}

impl NavigationCommand {
    #[must_use]
    pub const fn moving(movement: CaretMovement) -> Self {
        Self::Caret {
            movement,
            mode: SelectionMode::Move,
        }
    }

    #[must_use]
    pub const fn extending(movement: CaretMovement) -> Self {
        Self::Caret {
            movement,
            mode: SelectionMode::Extend,
        }
    }

    #[must_use]
    pub const fn boxing(movement: CaretMovement) -> Self {
        Self::Caret {
            movement,
            mode: SelectionMode::Box,
        }
    }
}

// ---------------------------------------------------------------------------
// HotkeyConfig
// ---------------------------------------------------------------------------

/// Platform conventions the default binding table is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotkeyConfig {
    /// Held to extend the selection (Shift everywhere).
    pub selection_modifiers: Modifiers,
    /// Held to move by word (Ctrl on PC, Alt on macOS).
    pub whole_word_modifiers: Modifiers,
    /// Held with `A` for Select All (Ctrl on PC, Meta on macOS).
    pub command_modifiers: Modifiers,
    pub line_start: Vec<KeyGesture>,
    pub line_start_with_selection: Vec<KeyGesture>,
    pub line_end: Vec<KeyGesture>,
    pub line_end_with_selection: Vec<KeyGesture>,
    pub document_start: Vec<KeyGesture>,
    pub document_start_with_selection: Vec<KeyGesture>,
    pub document_end: Vec<KeyGesture>,
    pub document_end_with_selection: Vec<KeyGesture>,
}

impl Default for HotkeyConfig {
    /// PC conventions (Windows, Linux).
    fn default() -> Self {
        let ctrl = Modifiers::CTRL;
        let shift = Modifiers::SHIFT;
        Self {
            selection_modifiers: shift,
            whole_word_modifiers: ctrl,
            command_modifiers: ctrl,
            line_start: vec![KeyGesture::plain(Key::Home)],
            line_start_with_selection: vec![KeyGesture::new(Key::Home, shift)],
            line_end: vec![KeyGesture::plain(Key::End)],
            line_end_with_selection: vec![KeyGesture::new(Key::End, shift)],
            document_start: vec![KeyGesture::new(Key::Home, ctrl)],
            document_start_with_selection: vec![KeyGesture::new(Key::Home, ctrl | shift)],
            document_end: vec![KeyGesture::new(Key::End, ctrl)],
            document_end_with_selection: vec![KeyGesture::new(Key::End, ctrl | shift)],
        }
    }
}

impl HotkeyConfig {
    /// macOS conventions: Option moves by word, Command reaches line and
    /// document edges.
    #[must_use]
    pub fn macos() -> Self {
        let meta = Modifiers::META;
        let shift = Modifiers::SHIFT;
        Self {
            selection_modifiers: shift,
            whole_word_modifiers: Modifiers::ALT,
            command_modifiers: meta,
            line_start: vec![KeyGesture::plain(Key::Home), KeyGesture::new(Key::Left, meta)],
            line_start_with_selection: vec![
                KeyGesture::new(Key::Home, shift),
                KeyGesture::new(Key::Left, meta | shift),
            ],
            line_end: vec![KeyGesture::plain(Key::End), KeyGesture::new(Key::Right, meta)],
            line_end_with_selection: vec![
                KeyGesture::new(Key::End, shift),
                KeyGesture::new(Key::Right, meta | shift),
            ],
            document_start: vec![KeyGesture::new(Key::Up, meta)],
            document_start_with_selection: vec![KeyGesture::new(Key::Up, meta | shift)],
            document_end: vec![KeyGesture::new(Key::Down, meta)],
            document_end_with_selection: vec![KeyGesture::new(Key::Down, meta | shift)],
        }
    }
}

// ---------------------------------------------------------------------------
// Keymap
// ---------------------------------------------------------------------------

/// Gesture to command registry.
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: HashMap<KeyGesture, NavigationCommand>,
}

impl Keymap {
    /// An empty keymap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The full navigation table for `config`.
    ///
    /// When two entries claim the same gesture (macOS word extension and
    /// box selection both use Alt+Shift), the one registered first keeps it.
    #[must_use]
    pub fn with_defaults(config: &HotkeyConfig) -> Self {
        let mut keymap = Self::new();
        let none = Modifiers::empty();
        let select = config.selection_modifiers;
        let word = config.whole_word_modifiers;
        let boxed = Modifiers::ALT | select;

        let horizontal = [
            (Key::Left, CaretMovement::CharLeft, CaretMovement::WordLeft),
            (Key::Right, CaretMovement::CharRight, CaretMovement::WordRight),
        ];
        for (key, by_char, _) in horizontal {
            keymap.bind_default(KeyGesture::new(key, none), NavigationCommand::moving(by_char));
            keymap.bind_default(KeyGesture::new(key, select), NavigationCommand::extending(by_char));
            keymap.bind_default(KeyGesture::new(key, boxed), NavigationCommand::boxing(by_char));
        }
        for (key, _, by_word) in horizontal {
            keymap.bind_default(KeyGesture::new(key, word), NavigationCommand::moving(by_word));
            keymap.bind_default(
                KeyGesture::new(key, word | select),
                NavigationCommand::extending(by_word),
            );
            keymap.bind_default(
                KeyGesture::new(key, word | boxed),
                NavigationCommand::boxing(by_word),
            );
        }

        for (key, movement) in [
            (Key::Up, CaretMovement::LineUp),
            (Key::Down, CaretMovement::LineDown),
        ] {
            keymap.bind_default(KeyGesture::new(key, none), NavigationCommand::moving(movement));
            keymap.bind_default(KeyGesture::new(key, select), NavigationCommand::extending(movement));
            keymap.bind_default(KeyGesture::new(key, boxed), NavigationCommand::boxing(movement));
        }

        for (key, movement) in [
            (Key::PageDown, CaretMovement::PageDown),
            (Key::PageUp, CaretMovement::PageUp),
        ] {
            keymap.bind_default(KeyGesture::new(key, none), NavigationCommand::moving(movement));
            keymap.bind_default(KeyGesture::new(key, select), NavigationCommand::extending(movement));
        }

        keymap.bind_default(
            KeyGesture::new(Key::Home, boxed),
            NavigationCommand::boxing(CaretMovement::LineStart),
        );
        keymap.bind_default(
            KeyGesture::new(Key::End, boxed),
            NavigationCommand::boxing(CaretMovement::LineEnd),
        );
        keymap.bind_default(
            KeyGesture::new(Key::Char('A'), config.command_modifiers),
            NavigationCommand::SelectAll,
        );

        let edges = [
            (&config.line_start, NavigationCommand::moving(CaretMovement::LineStart)),
            (
                &config.line_start_with_selection,
                NavigationCommand::extending(CaretMovement::LineStart),
            ),
            (&config.line_end, NavigationCommand::moving(CaretMovement::LineEnd)),
            (
                &config.line_end_with_selection,
                NavigationCommand::extending(CaretMovement::LineEnd),
            ),
            (
                &config.document_start,
                NavigationCommand::moving(CaretMovement::DocumentStart),
            ),
            (
                &config.document_start_with_selection,
                NavigationCommand::extending(CaretMovement::DocumentStart),
            ),
            (
                &config.document_end,
                NavigationCommand::moving(CaretMovement::DocumentEnd),
            ),
            (
                &config.document_end_with_selection,
                NavigationCommand::extending(CaretMovement::DocumentEnd),
            ),
        ];
        for (gestures, command) in edges {
            for &gesture in gestures {
                keymap.bind_default(gesture, command);
            }
        }

        keymap
    }

    /// Bind `gesture`, replacing any previous binding. Returns the command
    /// it was bound to before.
    pub fn bind(
        &mut self,
        gesture: KeyGesture,
        command: NavigationCommand,
    ) -> Option<NavigationCommand> {
        self.bindings.insert(gesture, command)
    }

    /// Remove the binding for `gesture`.
    pub fn unbind(&mut self, gesture: KeyGesture) -> Option<NavigationCommand> {
        self.bindings.remove(&gesture)
    }

    /// The command bound to `gesture`, if any.
    #[must_use]
    pub fn resolve(&self, gesture: KeyGesture) -> Option<NavigationCommand> {
        let command = self.bindings.get(&gesture).copied();
        if command.is_none() {
            tracing::debug!("no navigation binding for {}", gesture);
        }
        command
    }

    /// Every gesture bound to `command`.
    #[must_use]
    pub fn gestures_for(&self, command: NavigationCommand) -> Vec<KeyGesture> {
        self.bindings
            .iter()
            .filter(|&(_, bound)| *bound == command)
            .map(|(&gesture, _)| gesture)
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    fn bind_default(&mut self, gesture: KeyGesture, command: NavigationCommand) {
        self.bindings.entry(gesture).or_insert(command);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn g(key: Key, modifiers: Modifiers) -> KeyGesture {
        KeyGesture::new(key, modifiers)
    }

    #[test]
    fn pc_arrow_bindings() {
        let keymap = Keymap::with_defaults(&HotkeyConfig::default());
        assert_eq!(
            keymap.resolve(KeyGesture::plain(Key::Left)),
            Some(NavigationCommand::moving(CaretMovement::CharLeft))
        );
        assert_eq!(
            keymap.resolve(g(Key::Right, Modifiers::SHIFT)),
            Some(NavigationCommand::extending(CaretMovement::CharRight))
        );
        assert_eq!(
            keymap.resolve(g(Key::Left, Modifiers::ALT | Modifiers::SHIFT)),
            Some(NavigationCommand::boxing(CaretMovement::CharLeft))
        );
        assert_eq!(
            keymap.resolve(g(Key::Right, Modifiers::CTRL)),
            Some(NavigationCommand::moving(CaretMovement::WordRight))
        );
        assert_eq!(
            keymap.resolve(g(Key::Left, Modifiers::CTRL | Modifiers::ALT | Modifiers::SHIFT)),
            Some(NavigationCommand::boxing(CaretMovement::WordLeft))
        );
    }

    #[test]
    fn pc_edges_and_pages() {
        let keymap = Keymap::with_defaults(&HotkeyConfig::default());
        assert_eq!(
            keymap.resolve(KeyGesture::plain(Key::Home)),
            Some(NavigationCommand::moving(CaretMovement::LineStart))
        );
        assert_eq!(
            keymap.resolve(g(Key::End, Modifiers::CTRL | Modifiers::SHIFT)),
            Some(NavigationCommand::extending(CaretMovement::DocumentEnd))
        );
        assert_eq!(
            keymap.resolve(g(Key::End, Modifiers::ALT | Modifiers::SHIFT)),
            Some(NavigationCommand::boxing(CaretMovement::LineEnd))
        );
        assert_eq!(
            keymap.resolve(g(Key::PageDown, Modifiers::SHIFT)),
            Some(NavigationCommand::extending(CaretMovement::PageDown))
        );
        // No box selection by page.
        assert_eq!(keymap.resolve(g(Key::PageDown, Modifiers::ALT | Modifiers::SHIFT)), None);
    }

    #[test]
    fn select_all_is_case_insensitive() {
        let keymap = Keymap::with_defaults(&HotkeyConfig::default());
        assert_eq!(
            keymap.resolve(g(Key::Char('a'), Modifiers::CTRL)),
            Some(NavigationCommand::SelectAll)
        );
    }

    #[test]
    fn macos_conventions() {
        let keymap = Keymap::with_defaults(&HotkeyConfig::macos());
        assert_eq!(
            keymap.resolve(g(Key::Left, Modifiers::ALT)),
            Some(NavigationCommand::moving(CaretMovement::WordLeft))
        );
        assert_eq!(
            keymap.resolve(g(Key::Left, Modifiers::META)),
            Some(NavigationCommand::moving(CaretMovement::LineStart))
        );
        assert_eq!(
            keymap.resolve(g(Key::Down, Modifiers::META | Modifiers::SHIFT)),
            Some(NavigationCommand::extending(CaretMovement::DocumentEnd))
        );
        assert_eq!(
            keymap.resolve(g(Key::Char('A'), Modifiers::META)),
            Some(NavigationCommand::SelectAll)
        );
        // Alt+Shift is claimed by box selection first.
        assert_eq!(
            keymap.resolve(g(Key::Left, Modifiers::ALT | Modifiers::SHIFT)),
            Some(NavigationCommand::boxing(CaretMovement::CharLeft))
        );
    }

    #[test]
    fn bind_replaces_and_unbind_removes() {
        let mut keymap = Keymap::with_defaults(&HotkeyConfig::default());
        let gesture = KeyGesture::plain(Key::Home);
        let previous = keymap.bind(gesture, NavigationCommand::moving(CaretMovement::DocumentStart));
        assert_eq!(previous, Some(NavigationCommand::moving(CaretMovement::LineStart)));
        assert_eq!(
            keymap.resolve(gesture),
            Some(NavigationCommand::moving(CaretMovement::DocumentStart))
        );
        assert!(keymap.unbind(gesture).is_some());
        assert_eq!(keymap.resolve(gesture), None);
    }

    #[test]
    fn gestures_for_command() {
        let keymap = Keymap::with_defaults(&HotkeyConfig::macos());
        let mut gestures = keymap.gestures_for(NavigationCommand::moving(CaretMovement::LineEnd));
        gestures.sort_by_key(ToString::to_string);
        assert_eq!(gestures, vec![KeyGesture::plain(Key::End), g(Key::Right, Modifiers::META)]);
    }

    #[test]
    fn empty_keymap() {
        let keymap = Keymap::new();
        assert!(keymap.is_empty());
        assert_eq!(keymap.len(), 0);
        assert_eq!(keymap.resolve(KeyGesture::plain(Key::Left)), None);
    }

    #[test]
    fn gesture_display() {
        assert_eq!(g(Key::Home, Modifiers::CTRL | Modifiers::SHIFT).to_string(), "Ctrl+Shift+Home");
        assert_eq!(g(Key::Char('a'), Modifiers::META).to_string(), "Meta+A");
        assert_eq!(KeyGesture::plain(Key::PageDown).to_string(), "PageDown");
    }
}
