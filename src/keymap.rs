//! Keyboard key names to keypad keys.
//!
//! The calculator only understands keypad labels. This translator maps the
//! names a physical keyboard produces (`Enter`, `Escape`, `*`, ...) onto
//! them. Users can add or replace bindings from the config file.

use crate::calculator::{KeyEvent, Operator, UnknownKey};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("binding for `{name}`: {source}")]
pub struct KeymapError {
    name: String,
    #[source]
    source: UnknownKey,
}

/// Lookup table from keyboard key names to keypad keys.
#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: HashMap<String, KeyEvent>,
}

impl Default for Keymap {
    fn default() -> Self {
        let mut bindings: HashMap<String, KeyEvent> = (0..=9)
            .map(|d| (d.to_string(), KeyEvent::Digit(d)))
            .collect();

        for (name, key) in [
            (".", KeyEvent::DecimalPoint),
            ("+", KeyEvent::Operator(Operator::Add)),
            ("-", KeyEvent::Operator(Operator::Subtract)),
            ("*", KeyEvent::Operator(Operator::Multiply)),
            ("/", KeyEvent::Operator(Operator::Divide)),
            ("Enter", KeyEvent::Equals),
            ("=", KeyEvent::Equals),
            ("Backspace", KeyEvent::Backspace),
            ("Escape", KeyEvent::ClearAll),
            ("%", KeyEvent::Percent),
        ] {
            bindings.insert(name.to_string(), key);
        }

        Self { bindings }
    }
}

impl Keymap {
    /// Default bindings with `overrides` (key name to keypad label) on top.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Result<Self, KeymapError> {
        let mut keymap = Self::default();

        for (name, label) in overrides {
            let key = label.parse::<KeyEvent>().map_err(|source| KeymapError {
                name: name.clone(),
                source,
            })?;
            keymap.bindings.insert(name.clone(), key);
        }

        Ok(keymap)
    }

    /// Translate a keyboard key name. Unbound names return `None`.
    pub fn translate(&self, name: &str) -> Option<KeyEvent> {
        self.bindings.get(name).copied()
    }

    /// Number of bound key names.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
