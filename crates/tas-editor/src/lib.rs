//! # tas-editor: caret navigation for TAS scripts
//!
//! This crate moves a caret through a TAS script the way a TAS author
//! expects: on action lines the caret steps between frame digits, whole
//! input tokens and feather payload characters; everywhere else it behaves
//! like any text editor.
//!
//! - **[`position`]**: `Position` (line, column) and `Range`, 1-based
//! - **[`document`]**: the `LineSource` trait and the rope-backed `Document`
//! - **[`movement`]**: `CaretMovement`, the closed set of movement commands
//! - **[`snap`]**: `snap_column`, keeping the caret on valid action-line slots
//! - **[`locator`]**: `inputs_adjacent`, the inputs next to a caret column
//! - **[`word`]**: word stops within a line
//! - **[`text`]**: the `TextNavigator` trait and `PlainTextNavigator`
//! - **[`caret`]**: `Caret`, a position plus the remembered x
//! - **[`navigation`]**: `Navigator`, the caret movement engine
//! - **[`selection`]**: selections and `EditorSession`
//! - **[`keymap`]**: the gesture to command registry
//! - **[`options`]**: `EditorOptions` and its settings-string parser
//!
//! Logging goes through `tracing`; the host installs the subscriber.

pub mod caret;
pub mod document;
pub mod error;
pub mod keymap;
pub mod locator;
pub mod movement;
pub mod navigation;
pub mod options;
pub mod position;
pub mod selection;
pub mod snap;
pub mod text;
pub mod word;

pub use caret::Caret;
pub use document::{Document, LineEnding, LineSource, SubscriptionId, TextChange};
pub use error::{DocumentError, NavigationError, OptionError};
pub use keymap::{HotkeyConfig, Key, KeyGesture, Keymap, Modifiers, NavigationCommand, SelectionMode};
pub use locator::inputs_adjacent;
pub use movement::CaretMovement;
pub use navigation::Navigator;
pub use options::{EditorOptions, SetDirective, parse_set};
pub use position::{Position, Range};
pub use selection::{EditorSession, LineSegment, RectangleSelection, Selection};
pub use snap::snap_column;
pub use text::{PlainTextNavigator, TextNavigator};
