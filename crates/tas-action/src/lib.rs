//! # tas-action: the action-line grammar of TAS scripts
//!
//! A TAS script is plain text. Most lines are **action lines**: a frame
//! count followed by the inputs held for that many frames.
//!
//! ```text
//!   15,R,J
//!    1,F,90,0.5
//! # anything else is a comment or command
//! ```
//!
//! - **[`input`]**: `Input` tokens, their letters, and the `InputSet` bitset
//! - **[`action_line`]**: `ActionLine` parsing, canonical rendering and the
//!   column layout the editor navigates by
//! - **[`error`]**: `ParseError`, the reason a line is not an action line
//!
//! This crate knows nothing about carets or documents. The editor crate
//! builds its navigation on the layout facts exposed here.

// Frame counts and token counts are tiny; usize/u32 conversions are exact.
#![allow(clippy::cast_possible_truncation)]

pub mod action_line;
pub mod error;
pub mod input;

pub use action_line::{ActionLine, DEFAULT_MAX_FRAMES_DIGITS, MAX_FRAMES_DIGITS_LIMIT, digits_of};
pub use error::ParseError;
pub use input::{Input, InputSet};
