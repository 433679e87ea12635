//! Key events accepted by the calculator.

use super::Operator;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Label of the backspace key.
pub const BACKSPACE_LABEL: &str = "⌫";
/// Label of the sign-toggle key.
pub const TOGGLE_SIGN_LABEL: &str = "+/-";

/// A single key press on the calculator keypad.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyEvent {
    /// A digit key, `0` through `9`.
    ///
    /// Values above 9 are not keys: the state machine ignores them and
    /// their label is `"?"`.
    Digit(u8),
    DecimalPoint,
    Operator(Operator),
    Equals,
    /// `AC`: reset everything.
    ClearAll,
    /// `C`: clear the current entry only.
    ClearEntry,
    Backspace,
    ToggleSign,
    Percent,
}

/// A label that is not part of the keypad vocabulary.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown key `{0}`")]
pub struct UnknownKey(pub String);

impl KeyEvent {
    /// Every key on the keypad.
    pub fn all() -> impl Iterator<Item = KeyEvent> {
        (0..=9)
            .map(KeyEvent::Digit)
            .chain(Operator::ALL.into_iter().map(KeyEvent::Operator))
            .chain([
                KeyEvent::DecimalPoint,
                KeyEvent::Equals,
                KeyEvent::ClearAll,
                KeyEvent::ClearEntry,
                KeyEvent::Backspace,
                KeyEvent::ToggleSign,
                KeyEvent::Percent,
            ])
    }

    /// The keypad label for this key.
    pub fn label(&self) -> &'static str {
        const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

        match self {
            Self::Digit(d) => DIGITS.get(usize::from(*d)).copied().unwrap_or("?"),
            Self::DecimalPoint => ".",
            Self::Operator(op) => op.glyph(),
            Self::Equals => "=",
            Self::ClearAll => "AC",
            Self::ClearEntry => "C",
            Self::Backspace => BACKSPACE_LABEL,
            Self::ToggleSign => TOGGLE_SIGN_LABEL,
            Self::Percent => "%",
        }
    }

    /// Check if this key clears the calculator (either clear variant).
    pub fn is_clear(&self) -> bool {
        matches!(self, Self::ClearAll | Self::ClearEntry)
    }
}

impl FromStr for KeyEvent {
    type Err = UnknownKey;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        if let Some(op) = Operator::from_glyph(label) {
            return Ok(Self::Operator(op));
        }

        let key = match label {
            "." => Self::DecimalPoint,
            "=" => Self::Equals,
            "AC" => Self::ClearAll,
            "C" => Self::ClearEntry,
            BACKSPACE_LABEL => Self::Backspace,
            TOGGLE_SIGN_LABEL => Self::ToggleSign,
            "%" => Self::Percent,
            _ => {
                let mut chars = label.chars();
                match (chars.next().and_then(|c| c.to_digit(10)), chars.next()) {
                    (Some(d), None) => Self::Digit(d as u8),
                    _ => return Err(UnknownKey(label.to_string())),
                }
            }
        };

        Ok(key)
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
