//! Binary operators and their keypad glyphs.

use std::fmt;

/// One of the four binary operators on the keypad.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// All operators, in keypad order.
    pub const ALL: [Operator; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Map a keypad glyph to its operator.
    ///
    /// Only the four display glyphs are recognised. Note that subtract is
    /// U+2212 MINUS SIGN, not the ASCII hyphen; translating ASCII keys is
    /// the keymap's job.
    pub fn from_glyph(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Add),
            "−" => Some(Self::Subtract),
            "×" => Some(Self::Multiply),
            "÷" => Some(Self::Divide),
            _ => None,
        }
    }

    /// The glyph shown on the keypad and in the pending-operator indicator.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "−",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }

    /// Apply the operator to two already-parsed operands.
    pub(crate) fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Subtract => lhs - rhs,
            Self::Multiply => lhs * rhs,
            Self::Divide => lhs / rhs,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}
