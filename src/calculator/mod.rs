//! Pocket-calculator engine.
//!
//! This module provides:
//! - The key-event vocabulary and key-script tokenizer
//! - An immediate-execution state machine with repeat-equals
//! - Binary evaluation over text operands
//! - Bounded-width display formatting
//! - Copying the display to the clipboard

mod clipboard;
mod evaluation;
mod format;
mod key;
mod operator;
mod script;
mod state;

pub use clipboard::{ClipboardError, copy_to_clipboard};
pub use evaluation::{EvaluationError, evaluate, plain_decimal};
pub use format::{MAX_DISPLAY_LEN, format_entry, format_number};
pub use key::{BACKSPACE_LABEL, KeyEvent, TOGGLE_SIGN_LABEL, UnknownKey};
pub use operator::Operator;
pub use script::tokenize;
pub use state::{Calculator, CalculatorState, ERROR, Phase, Readout, Repeat};
