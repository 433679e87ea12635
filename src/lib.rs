//! An immediate-execution pocket calculator.
//!
//! The [`calculator`] module is the engine: feed it key presses, read back
//! the display. [`keymap`] translates keyboard key names into key presses
//! and [`config`] loads user settings for the command-line front end.

pub mod calculator;
pub mod config;
pub mod keymap;

pub use calculator::{Calculator, CalculatorState, KeyEvent, Operator, Readout};
