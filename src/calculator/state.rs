//! Immediate-execution state machine.
//!
//! The calculator behaves like a handheld one: every operator is applied to
//! the running result as soon as the next operator or `=` is pressed, so
//! `2 + 3 × 4 =` yields 20, not 14. Pressing `=` again replays the last
//! operation against the result.
//!
//! [`CalculatorState`] is an immutable value and [`CalculatorState::apply`]
//! is a pure transition. [`Calculator`] holds the current state for callers
//! that want a single mutable handle.

use super::evaluation::{EvaluationError, evaluate};
use super::format::format_entry;
use super::{KeyEvent, Operator};
use serde::Serialize;
use tracing::debug;

/// Buffer contents after a failed evaluation.
pub const ERROR: &str = "Error";

/// Operator and right operand of the last completed `=`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Repeat {
    pub operator: Operator,
    pub operand: String,
}

/// Coarse phase of the calculator, derived from its fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No operator pending.
    Idle,
    /// Operator set, the next digit starts a new operand.
    AwaitingOperand,
    /// Operator set and the right operand is being typed.
    Chaining,
    /// A failed evaluation; clear keys, backspace and new entry leave it.
    Error,
}

/// Complete calculator state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalculatorState {
    /// Raw entry as typed, or [`ERROR`].
    buffer: String,
    /// Left operand of the pending operation.
    accumulator: Option<String>,
    pending: Option<Operator>,
    /// The next digit starts a fresh buffer.
    awaiting_next: bool,
    repeat: Option<Repeat>,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            buffer: "0".to_string(),
            accumulator: None,
            pending: None,
            awaiting_next: false,
            repeat: None,
        }
    }
}

impl CalculatorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw entry buffer.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn accumulator(&self) -> Option<&str> {
        self.accumulator.as_deref()
    }

    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending
    }

    pub fn awaiting_next(&self) -> bool {
        self.awaiting_next
    }

    pub fn repeat(&self) -> Option<&Repeat> {
        self.repeat.as_ref()
    }

    /// Check if the calculator is showing an error.
    pub fn is_error(&self) -> bool {
        self.buffer == ERROR
    }

    pub fn phase(&self) -> Phase {
        if self.is_error() {
            Phase::Error
        } else if self.pending.is_none() {
            Phase::Idle
        } else if self.awaiting_next {
            Phase::AwaitingOperand
        } else {
            Phase::Chaining
        }
    }

    /// The formatted display string.
    pub fn display(&self) -> String {
        format_entry(&self.buffer)
    }

    /// Display and pending-operator glyph for the UI.
    pub fn readout(&self) -> Readout {
        Readout {
            display: self.display(),
            operator: self.pending.map(Operator::glyph),
        }
    }

    /// Return the state that results from pressing `key`.
    pub fn apply(&self, key: KeyEvent) -> CalculatorState {
        match key {
            KeyEvent::ClearAll => Self::default(),
            KeyEvent::ClearEntry => self.clear_entry(),
            KeyEvent::Backspace => self.backspace(),
            KeyEvent::Digit(d) => match char::from_digit(u32::from(d), 10) {
                Some(digit) => self.input_digit(digit),
                None => self.clone(),
            },
            KeyEvent::DecimalPoint => self.input_decimal_point(),
            KeyEvent::ToggleSign => self.toggle_sign(),
            KeyEvent::Percent => self.percent(),
            KeyEvent::Operator(op) => self.apply_operator(op),
            KeyEvent::Equals => self.equals(),
        }
    }

    fn clear_entry(&self) -> Self {
        Self {
            buffer: "0".to_string(),
            awaiting_next: false,
            ..self.clone()
        }
    }

    fn backspace(&self) -> Self {
        // Nothing typed yet for the next operand
        if self.awaiting_next {
            return self.clear_entry();
        }
        if self.is_error() {
            return self.with_buffer("0".to_string());
        }

        let buffer = if self.buffer.chars().count() <= 1 {
            "0".to_string()
        } else {
            let mut rest = self.buffer.clone();
            rest.pop();
            if rest == "-" { "0".to_string() } else { rest }
        };

        self.with_buffer(buffer)
    }

    fn input_digit(&self, digit: char) -> Self {
        if self.awaiting_next || self.is_error() {
            return Self {
                buffer: digit.to_string(),
                awaiting_next: false,
                ..self.clone()
            };
        }

        let buffer = match self.buffer.as_str() {
            "0" => digit.to_string(),
            "-0" => format!("-{}", digit),
            current => format!("{}{}", current, digit),
        };

        self.with_buffer(buffer)
    }

    fn input_decimal_point(&self) -> Self {
        if self.awaiting_next || self.is_error() {
            return Self {
                buffer: "0.".to_string(),
                awaiting_next: false,
                ..self.clone()
            };
        }

        if self.buffer.contains('.') {
            return self.clone();
        }

        self.with_buffer(format!("{}.", self.buffer))
    }

    fn toggle_sign(&self) -> Self {
        if self.is_error() {
            return self.clone();
        }
        if self.awaiting_next {
            return Self {
                buffer: "-0".to_string(),
                awaiting_next: false,
                ..self.clone()
            };
        }

        let buffer = match self.buffer.strip_prefix('-') {
            Some("") => "0".to_string(),
            Some(unsigned) => unsigned.to_string(),
            None if self.buffer == "0" => "-0".to_string(),
            None => format!("-{}", self.buffer),
        };

        self.with_buffer(buffer)
    }

    fn percent(&self) -> Self {
        if self.is_error() {
            return self.clone();
        }

        match evaluate(&self.buffer, Operator::Divide, "100") {
            Ok(value) => Self {
                buffer: value,
                awaiting_next: false,
                ..self.clone()
            },
            Err(err) => {
                debug!(error = %err, buffer = %self.buffer, "percent failed");
                // The pending operation survives, so C resumes it
                Self {
                    buffer: ERROR.to_string(),
                    awaiting_next: false,
                    ..self.clone()
                }
            }
        }
    }

    fn apply_operator(&self, next: Operator) -> Self {
        if self.is_error() {
            return self.clone();
        }

        // Consecutive operators collapse to the latest one
        if self.awaiting_next {
            return Self {
                pending: Some(next),
                ..self.clone()
            };
        }

        let (Some(accumulator), Some(pending)) = (&self.accumulator, self.pending) else {
            return Self {
                accumulator: Some(self.buffer.clone()),
                pending: Some(next),
                awaiting_next: true,
                repeat: None,
                ..self.clone()
            };
        };

        match evaluate(accumulator, pending, &self.buffer) {
            Ok(value) => Self {
                buffer: value.clone(),
                accumulator: Some(value),
                pending: Some(next),
                awaiting_next: true,
                repeat: None,
            },
            Err(err) => Self {
                repeat: None,
                ..self.fail(err)
            },
        }
    }

    fn equals(&self) -> Self {
        if self.is_error() {
            return self.clone();
        }

        if let Some(repeat) = &self.repeat
            && (self.pending.is_none() || self.awaiting_next)
        {
            let base = self.accumulator.as_deref().unwrap_or(&self.buffer);
            return match evaluate(base, repeat.operator, &repeat.operand) {
                Ok(value) => Self {
                    buffer: value.clone(),
                    accumulator: Some(value),
                    awaiting_next: true,
                    ..self.clone()
                },
                Err(err) => self.fail(err),
            };
        }

        let (Some(accumulator), Some(pending)) = (&self.accumulator, self.pending) else {
            return self.clone();
        };

        match evaluate(accumulator, pending, &self.buffer) {
            Ok(value) => Self {
                buffer: value.clone(),
                accumulator: Some(value),
                pending: None,
                awaiting_next: true,
                repeat: Some(Repeat {
                    operator: pending,
                    operand: self.buffer.clone(),
                }),
            },
            Err(err) => Self {
                repeat: None,
                ..self.fail(err)
            },
        }
    }

    fn with_buffer(&self, buffer: String) -> Self {
        Self {
            buffer,
            ..self.clone()
        }
    }

    /// Enter the error phase. Repeat memory is left to the caller.
    fn fail(&self, err: EvaluationError) -> Self {
        debug!(error = %err, buffer = %self.buffer, "evaluation failed");
        Self {
            buffer: ERROR.to_string(),
            accumulator: None,
            pending: None,
            awaiting_next: false,
            repeat: self.repeat.clone(),
        }
    }
}

/// What the UI shows after a key press.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Readout {
    /// Formatted display string.
    pub display: String,
    /// Glyph of the pending operator, if any.
    pub operator: Option<&'static str>,
}

/// Owning handle around [`CalculatorState`].
#[derive(Clone, Debug, Default)]
pub struct Calculator {
    state: CalculatorState,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Feed one key press and return the new readout.
    pub fn handle_key(&mut self, key: KeyEvent) -> Readout {
        self.state = self.state.apply(key);
        debug!(
            key = %key,
            buffer = %self.state.buffer,
            phase = ?self.state.phase(),
            "key handled"
        );
        self.state.readout()
    }

    /// Feed several key presses, returning the readout after the last one.
    pub fn handle_keys(&mut self, keys: impl IntoIterator<Item = KeyEvent>) -> Readout {
        for key in keys {
            self.handle_key(key);
        }
        self.state.readout()
    }
}
