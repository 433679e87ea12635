//! End-to-end key sequences through the public API.

use keycalc::calculator::{Calculator, KeyEvent, Readout, tokenize};
use keycalc::keymap::Keymap;

/// Run a key script and collect the display after every key.
fn displays(script: &str) -> Vec<String> {
    let mut calc = Calculator::new();
    tokenize(script)
        .unwrap()
        .into_iter()
        .map(|key| calc.handle_key(key).display)
        .collect()
}

fn last_display(script: &str) -> String {
    displays(script).pop().unwrap_or_else(|| "0".to_string())
}

#[test]
fn chaining_ignores_precedence() {
    assert_eq!(last_display("2 + 3 × 4 ="), "20");
    assert_eq!(last_display("1 0 − 4 ÷ 2 ="), "3");
}

#[test]
fn repeated_equals_replays_last_operation() {
    let shown = displays("2 + 3 = =");
    assert_eq!(shown[shown.len() - 2], "5");
    assert_eq!(shown[shown.len() - 1], "8");
    assert_eq!(last_display("2 × 3 = = ="), "54");
}

#[test]
fn divide_by_zero_locks_operations() {
    let mut calc = Calculator::new();
    let readout = calc.handle_keys(tokenize("5 ÷ 0 =").unwrap());
    assert_eq!(
        readout,
        Readout {
            display: "Error".to_string(),
            operator: None,
        }
    );

    for key in tokenize("+ = +/- % ×").unwrap() {
        assert_eq!(calc.handle_key(key).display, "Error");
    }

    assert_eq!(calc.handle_key(KeyEvent::ClearAll).display, "0");
    assert_eq!(calc.handle_keys(tokenize("6 × 7 =").unwrap()).display, "42");

    calc.handle_keys(tokenize("1 ÷ 0 =").unwrap());
    assert_eq!(calc.handle_key(KeyEvent::ClearEntry).display, "0");
    assert_eq!(calc.handle_keys(tokenize("3 + 4 =").unwrap()).display, "7");
}

#[test]
fn entry_keys_start_over_after_error() {
    assert_eq!(displays("5 ÷ 0 = 7").pop().unwrap(), "7");
    assert_eq!(displays("5 ÷ 0 = ⌫").pop().unwrap(), "0");
    assert_eq!(displays("5 ÷ 0 = .").pop().unwrap(), "0.");
    assert_eq!(last_display("5 ÷ 0 = 7 × 6 ="), "42");
}

#[test]
fn consecutive_operators_collapse() {
    assert_eq!(last_display("2 + × 3 ="), last_display("2 × 3 ="));
    assert_eq!(last_display("2 + × 3 ="), "6");
}

#[test]
fn sign_toggle_on_zero() {
    let mut calc = Calculator::new();
    assert_eq!(calc.handle_key(KeyEvent::ToggleSign).display, "0");
    assert_eq!(calc.state().buffer(), "-0");
    assert_eq!(calc.handle_key(KeyEvent::Digit(5)).display, "-5");
    assert_eq!(calc.state().buffer(), "-5");
}

#[test]
fn pending_operator_indicator() {
    let mut calc = Calculator::new();
    calc.handle_key(KeyEvent::Digit(8));
    assert_eq!(calc.handle_key("÷".parse().unwrap()).operator, Some("÷"));
    assert_eq!(calc.handle_key(KeyEvent::Digit(2)).operator, Some("÷"));
    assert_eq!(calc.handle_key(KeyEvent::Equals).operator, None);
}

#[test]
fn long_results_are_capped() {
    assert_eq!(last_display("1 ÷ 3 ="), "0.3333333333");
    assert_eq!(last_display("9 9 9 9 9 9 × 9 9 9 9 9 9 ="), "9.999980e+11");
    assert_eq!(last_display("1 ÷ 1 0 0 0 0 0 0 0 ="), "1.000000e-7");

    let shown = last_display("1 2 3 4 5 6 7 . 1 2 3 4 5 6 7 8 9 +");
    assert_eq!(shown, "1234567.12345678");
    assert_eq!(shown.len(), 16);
}

#[test]
fn decimal_entry_survives_display() {
    assert_eq!(displays("0 . 0"), vec!["0", "0.", "0"]);
    assert_eq!(displays("+/- ."), vec!["0", "-0."]);
    assert_eq!(last_display("1 . 0 5"), "1.05");
}

#[test]
fn keyboard_names_drive_the_calculator() {
    let keymap = Keymap::default();
    let mut calc = Calculator::new();

    let keys = ["1", "2", "*", "3", "Enter"]
        .into_iter()
        .filter_map(|name| keymap.translate(name));
    assert_eq!(calc.handle_keys(keys).display, "36");

    let keys = ["Escape", "9", "-", "1", "0", "="]
        .into_iter()
        .filter_map(|name| keymap.translate(name));
    assert_eq!(calc.handle_keys(keys).display, "-1");
}
