//! Editor options.
//!
//! [`EditorOptions`] holds the few knobs navigation depends on. A host can
//! fill the struct directly, or load it from a settings string such as
//! `"mfd=5 norectsel"` with [`EditorOptions::apply_all`].
//!
//! # Settings syntax
//!
//! | Syntax           | Effect                  |
//! |------------------|-------------------------|
//! | `option`         | Enable boolean          |
//! | `nooption`       | Disable boolean         |
//! | `option=N`       | Assign numeric value    |
//!
//! # Option names
//!
//! | Full name              | Abbrev    | Type    | Default |
//! |------------------------|-----------|---------|---------|
//! | `maxframesdigits`      | `mfd`     | integer | 4       |
//! | `pagelines`            | `pl`      | integer | 20      |
//! | `rectangularselection` | `rectsel` | bool    | true    |
//!
//! `maxframesdigits` is the width of the right-aligned frame-count field of
//! every action line (1 to 9). `pagelines` is the PageUp/PageDown distance.
//! `rectangularselection` enables box selection.

use tas_action::{DEFAULT_MAX_FRAMES_DIGITS, MAX_FRAMES_DIGITS_LIMIT};

use crate::error::OptionError;
use crate::text::DEFAULT_PAGE_LINES;

/// One parsed setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetDirective {
    /// `option`: enable a boolean option.
    On(String),

    /// `nooption`: disable a boolean option.
    Off(String),

    /// `option=value`: assign a value.
    Assign(String, String),
}

/// Returns `true` if `name` is a known boolean option (full name or abbreviation).
#[must_use]
pub fn is_bool_option(name: &str) -> bool {
    matches!(name, "rectangularselection" | "rectsel")
}

/// Returns `true` if `name` is a known numeric option (full name or abbreviation).
#[must_use]
pub fn is_numeric_option(name: &str) -> bool {
    matches!(name, "maxframesdigits" | "mfd" | "pagelines" | "pl")
}

/// Parse a whitespace-separated settings string. An empty string yields
/// no directives.
#[must_use]
pub fn parse_set(args: &str) -> Vec<SetDirective> {
    args.split_whitespace().map(parse_set_arg).collect()
}

/// Parse a single setting.
#[must_use]
pub fn parse_set_arg(arg: &str) -> SetDirective {
    if let Some((name, value)) = arg.split_once('=') {
        return SetDirective::Assign(name.to_string(), value.to_string());
    }

    // Only strip "no" when the rest is a known boolean option.
    if let Some(name) = arg.strip_prefix("no").filter(|name| is_bool_option(name)) {
        return SetDirective::Off(name.to_string());
    }

    SetDirective::On(arg.to_string())
}

// ---------------------------------------------------------------------------
// EditorOptions
// ---------------------------------------------------------------------------

/// Options that shape navigation and selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorOptions {
    /// Width of the frame-count field on action lines.
    pub max_frames_digits: usize,
    /// Whether box selection is available.
    pub rectangular_selection: bool,
    /// Lines moved by PageUp/PageDown on ordinary text.
    pub page_lines: usize,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            max_frames_digits: DEFAULT_MAX_FRAMES_DIGITS,
            rectangular_selection: true,
            page_lines: DEFAULT_PAGE_LINES,
        }
    }
}

fn canonical_name(name: &str) -> Option<&'static str> {
    match name {
        "maxframesdigits" | "mfd" => Some("maxframesdigits"),
        "pagelines" | "pl" => Some("pagelines"),
        "rectangularselection" | "rectsel" => Some("rectangularselection"),
        _ => None,
    }
}

impl EditorOptions {
    /// Apply one directive.
    ///
    /// # Errors
    ///
    /// [`OptionError`] when the option is unknown, the directive does not
    /// fit the option's type, or an assigned value is out of range. The
    /// options are unchanged in that case.
    pub fn apply(&mut self, directive: &SetDirective) -> Result<(), OptionError> {
        match directive {
            SetDirective::On(name) => self.set_bool(name, true),
            SetDirective::Off(name) => self.set_bool(name, false),
            SetDirective::Assign(name, value) => {
                let canonical = known(name)?;
                if !is_numeric_option(name) {
                    return Err(OptionError::NotNumeric(name.clone()));
                }
                let invalid = || OptionError::InvalidValue {
                    name: canonical.to_string(),
                    value: value.clone(),
                };
                let parsed: usize = value.parse().map_err(|_| invalid())?;
                match canonical {
                    "maxframesdigits" if (1..=MAX_FRAMES_DIGITS_LIMIT).contains(&parsed) => {
                        self.max_frames_digits = parsed;
                    }
                    "pagelines" if parsed >= 1 => self.page_lines = parsed,
                    _ => return Err(invalid()),
                }
                tracing::debug!("option {} set to {}", canonical, parsed);
                Ok(())
            }
        }
    }

    /// Apply every setting of a settings string.
    ///
    /// # Errors
    ///
    /// Stops at the first directive that fails; earlier ones stay applied.
    pub fn apply_all(&mut self, args: &str) -> Result<(), OptionError> {
        parse_set(args)
            .iter()
            .try_for_each(|directive| self.apply(directive))
    }

    fn set_bool(&mut self, name: &str, value: bool) -> Result<(), OptionError> {
        let canonical = known(name)?;
        if !is_bool_option(name) {
            return Err(OptionError::NotBoolean(name.to_string()));
        }
        self.rectangular_selection = value;
        tracing::debug!("option {} set to {}", canonical, value);
        Ok(())
    }
}

fn known(name: &str) -> Result<&'static str, OptionError> {
    canonical_name(name).ok_or_else(|| OptionError::Unknown(name.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ── parse_set_arg ─────────────────────────────────────────────────────

    #[test]
    fn parse_boolean_on() {
        assert_eq!(
            parse_set_arg("rectsel"),
            SetDirective::On("rectsel".into())
        );
    }

    #[test]
    fn parse_boolean_off() {
        assert_eq!(
            parse_set_arg("norectsel"),
            SetDirective::Off("rectsel".into())
        );
        assert_eq!(
            parse_set_arg("norectangularselection"),
            SetDirective::Off("rectangularselection".into())
        );
    }

    #[test]
    fn parse_assign() {
        assert_eq!(
            parse_set_arg("maxframesdigits=5"),
            SetDirective::Assign("maxframesdigits".into(), "5".into())
        );
        assert_eq!(
            parse_set_arg("pl=40"),
            SetDirective::Assign("pl".into(), "40".into())
        );
    }

    #[test]
    fn parse_unknown_option() {
        assert_eq!(parse_set_arg("foobar"), SetDirective::On("foobar".into()));
        assert_eq!(parse_set_arg("nofoobar"), SetDirective::On("nofoobar".into()));
    }

    #[test]
    fn parse_empty_is_nothing() {
        assert!(parse_set("").is_empty());
        assert!(parse_set("  ").is_empty());
    }

    #[test]
    fn parse_multiple_args() {
        assert_eq!(
            parse_set("mfd=5 norectsel"),
            vec![
                SetDirective::Assign("mfd".into(), "5".into()),
                SetDirective::Off("rectsel".into()),
            ]
        );
    }

    // ── EditorOptions::apply ─────────────────────────────────────────────

    #[test]
    fn defaults() {
        let options = EditorOptions::default();
        assert_eq!(options.max_frames_digits, 4);
        assert!(options.rectangular_selection);
        assert_eq!(options.page_lines, 20);
    }

    #[test]
    fn assign_numeric() {
        let mut options = EditorOptions::default();
        assert_eq!(options.apply(&parse_set_arg("mfd=6")), Ok(()));
        assert_eq!(options.max_frames_digits, 6);
        assert_eq!(options.apply(&parse_set_arg("pagelines=35")), Ok(()));
        assert_eq!(options.page_lines, 35);
    }

    #[test]
    fn assign_out_of_range_is_rejected() {
        let mut options = EditorOptions::default();
        assert_eq!(
            options.apply(&parse_set_arg("mfd=12")),
            Err(OptionError::InvalidValue {
                name: "maxframesdigits".into(),
                value: "12".into()
            })
        );
        assert!(options.apply(&parse_set_arg("pl=0")).is_err());
        assert!(options.apply(&parse_set_arg("pl=many")).is_err());
        assert_eq!(options, EditorOptions::default());
    }

    #[test]
    fn boolean_on_off() {
        let mut options = EditorOptions::default();
        options.apply(&parse_set_arg("norectsel")).unwrap();
        assert!(!options.rectangular_selection);
        options.apply(&parse_set_arg("rectangularselection")).unwrap();
        assert!(options.rectangular_selection);
    }

    #[test]
    fn type_mismatches() {
        let mut options = EditorOptions::default();
        assert_eq!(
            options.apply(&parse_set_arg("mfd")),
            Err(OptionError::NotBoolean("mfd".into()))
        );
        assert_eq!(
            options.apply(&parse_set_arg("rectsel=1")),
            Err(OptionError::NotNumeric("rectsel".into()))
        );
    }

    #[test]
    fn unknown_option_is_rejected() {
        let mut options = EditorOptions::default();
        assert_eq!(
            options.apply(&parse_set_arg("foobar")),
            Err(OptionError::Unknown("foobar".into()))
        );
    }

    #[test]
    fn apply_all_stops_at_first_error() {
        let mut options = EditorOptions::default();
        assert_eq!(options.apply_all("mfd=5 pl=30"), Ok(()));
        assert_eq!((options.max_frames_digits, options.page_lines), (5, 30));

        let err = options.apply_all("norectsel mfd=0 pl=40");
        assert!(matches!(err, Err(OptionError::InvalidValue { .. })));
        assert!(!options.rectangular_selection);
        assert_eq!(options.page_lines, 30);
    }
}
