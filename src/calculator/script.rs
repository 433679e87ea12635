//! Key scripts: sequences of keypad labels written as text.
//!
//! A script may separate labels with whitespace (`"AC 1 2 + 3 ="`) or pack
//! them together (`"12+3="`). Multi-character labels (`AC`, `+/-`) are
//! matched before single characters, so `"AC"` is never read as `A`, `C`.

use super::key::{KeyEvent, UnknownKey};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// One keypad label at the start of the input.
    static ref LABEL: Regex = Regex::new(
        r"^(?:AC|\+/-|[0-9.+−×÷=%C⌫])"
    ).unwrap();
}

/// Split a key script into key events.
///
/// Returns the first unrecognised word as an [`UnknownKey`] error.
pub fn tokenize(script: &str) -> Result<Vec<KeyEvent>, UnknownKey> {
    let mut keys = Vec::new();
    let mut rest = script.trim_start();

    while !rest.is_empty() {
        let Some(found) = LABEL.find(rest) else {
            let word = rest.split_whitespace().next().unwrap_or(rest);
            return Err(UnknownKey(word.to_string()));
        };

        keys.push(found.as_str().parse()?);
        rest = rest[found.end()..].trim_start();
    }

    Ok(keys)
}
