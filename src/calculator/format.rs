//! Display formatting for entries and results.
//!
//! The display is at most [`MAX_DISPLAY_LEN`] characters wide. Very large and
//! very small magnitudes switch to exponential notation, everything else is
//! shown in fixed notation with up to ten fractional digits.
//!
//! Rounding works on the exact decimal expansion of the `f64` and sends
//! ties away from zero, so `2^-11` shows as `0.0004882813`.

use super::state::ERROR;

/// Maximum number of characters shown on the display.
pub const MAX_DISPLAY_LEN: usize = 16;

/// Magnitudes at or above this are shown in exponential notation.
const EXPONENTIAL_ABOVE: f64 = 1e10;
/// Non-zero magnitudes below this are shown in exponential notation.
const EXPONENTIAL_BELOW: f64 = 1e-6;

const FIXED_DIGITS: usize = 10;
const EXPONENTIAL_DIGITS: usize = 6;

/// Enough digits to write any `f64` exactly, down to the smallest subnormal.
const EXACT_DIGITS: usize = 1100;

/// Format the raw entry buffer for display.
///
/// Entries the user is still typing keep their shape: a lone `"-"` and
/// anything ending in `"."` are shown as typed. `"-0"` is shown as `"0"`
/// although the buffer keeps the sign for the next digit.
pub fn format_entry(entry: &str) -> String {
    match entry {
        ERROR => ERROR.to_string(),
        "" => "0".to_string(),
        "-" => "-".to_string(),
        "-0" => "0".to_string(),
        _ if entry.ends_with('.') => entry.to_string(),
        _ => match entry.parse::<f64>() {
            Ok(value) => format_number(value),
            Err(_) => ERROR.to_string(),
        },
    }
}

/// Format a computed number for display.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return ERROR.to_string();
    }

    let magnitude = value.abs();
    if (magnitude != 0.0 && magnitude < EXPONENTIAL_BELOW) || magnitude >= EXPONENTIAL_ABOVE {
        // Already compact, never truncated
        return exponential(value);
    }

    let fixed = round_half_up(&format!("{:.*}", EXACT_DIGITS, magnitude), FIXED_DIGITS);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');

    // A negative zero has no sign here
    let signed = if value < 0.0 {
        format!("-{}", trimmed)
    } else {
        trimmed.to_string()
    };

    signed.chars().take(MAX_DISPLAY_LEN).collect()
}

/// Exponential notation with six fractional digits and a signed exponent,
/// e.g. `1.234568e+10` or `-1.000000e-7`.
fn exponential(value: f64) -> String {
    let exact = format!("{:.*e}", EXACT_DIGITS, value.abs());
    let (mantissa, exponent) = exact.split_once('e').unwrap_or((&exact, "0"));
    let mut exponent: i32 = exponent.parse().unwrap_or(0);

    let mut mantissa = round_half_up(mantissa, EXPONENTIAL_DIGITS);
    if mantissa.starts_with("10") {
        // 9.9999995 carried into a new leading digit
        mantissa = format!("1.{}", "0".repeat(EXPONENTIAL_DIGITS));
        exponent += 1;
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let exponent_sign = if exponent < 0 { '-' } else { '+' };
    format!("{}{}e{}{}", sign, mantissa, exponent_sign, exponent.abs())
}

/// Round an exact unsigned expansion like `"12.34567"` to `digits`
/// fractional digits, sending ties up.
fn round_half_up(exact: &str, digits: usize) -> String {
    let (int_part, frac) = exact.split_once('.').unwrap_or((exact, ""));
    let kept: String = frac
        .chars()
        .chain(std::iter::repeat('0'))
        .take(digits)
        .collect();
    let truncated = format!("{}.{}", int_part, kept);

    match frac.chars().nth(digits) {
        Some('5'..='9') => increment(&truncated),
        _ => truncated,
    }
}

/// Add one unit in the last place of an unsigned decimal string.
fn increment(number: &str) -> String {
    let mut bytes = number.as_bytes().to_vec();
    for i in (0..bytes.len()).rev() {
        match bytes[i] {
            b'.' => continue,
            b'9' => bytes[i] = b'0',
            _ => {
                bytes[i] += 1;
                return String::from_utf8_lossy(&bytes).into_owned();
            }
        }
    }
    format!("1{}", String::from_utf8_lossy(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels() {
        assert_eq!(format_entry("Error"), "Error");
        assert_eq!(format_entry(""), "0");
        assert_eq!(format_number(f64::NAN), "Error");
        assert_eq!(format_number(f64::INFINITY), "Error");
        assert_eq!(format_entry("garbage"), "Error");
    }

    #[test]
    fn test_in_progress_entries() {
        assert_eq!(format_entry("-"), "-");
        assert_eq!(format_entry("0."), "0.");
        assert_eq!(format_entry("-0."), "-0.");
        assert_eq!(format_entry("12."), "12.");
        assert_eq!(format_entry("-0"), "0");
    }

    #[test]
    fn test_fixed_notation() {
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_entry("0.50"), "0.5");
        assert_eq!(format_entry("0.30000000000000004"), "0.3");
        assert_eq!(format_number(1.0 / 3.0), "0.3333333333");
    }

    #[test]
    fn test_exponential_notation() {
        assert_eq!(format_number(0.0000001), "1.000000e-7");
        assert_eq!(format_number(12345678901.0), "1.234568e+10");
        assert_eq!(format_number(-12345678901.0), "-1.234568e+10");
        assert_eq!(format_number(1e10), "1.000000e+10");
        assert_eq!(format_entry("0.0000001"), "1.000000e-7");
    }

    #[test]
    fn test_threshold_boundaries() {
        assert_eq!(format_number(0.000001), "0.000001");
        assert_eq!(format_number(9999999999.0), "9999999999");
    }

    #[test]
    fn test_ties_round_away_from_zero() {
        // 2^-11 sits exactly between two ten-digit values
        assert_eq!(format_number(0.00048828125), "0.0004882813");
        assert_eq!(format_number(-0.00048828125), "-0.0004882813");
        assert_eq!(format_number(1.00048828125), "1.0004882813");
        assert_eq!(format_number(0.000732421875), "0.0007324219");

        assert_eq!(format_number(12345665000.0), "1.234567e+10");
        assert_eq!(format_number(99999995000.0), "1.000000e+11");
    }

    #[test]
    fn test_increment_carries() {
        assert_eq!(increment("0.0000000009"), "0.0000000010");
        assert_eq!(increment("9.999999"), "10.000000");
        assert_eq!(round_half_up("2.25", 1), "2.3");
        assert_eq!(round_half_up("2.2499", 1), "2.2");
    }

    #[test]
    fn test_length_cap() {
        let out = format_number(9999999999.123456);
        assert_eq!(out.len(), MAX_DISPLAY_LEN);
        assert!(out.starts_with("9999999999.1234"));

        let out = format_number(-1234567.1234567891);
        assert_eq!(out, "-1234567.1234567");
    }
}
