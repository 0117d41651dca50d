//! Conversions between value tags
//!
//! Every conversion is total: unparseable input silently becomes a zero
//! value instead of signalling an error, so `to_int("abc")` and
//! `to_int("0")` both yield Int 0.

use std::borrow::Cow;

use crate::config::FORMAT_BUFFER_SIZE;
use crate::validate::{expect_int, expect_string};
use crate::value::YafValue;

/// Significant digits used by `%g`.
const GENERAL_PRECISION: i32 = 6;

/// Render a float the way C's `%g` does.
pub fn format_general(value: f64) -> String {
    if value.is_nan() {
        let text = if value.is_sign_negative() { "-nan" } else { "nan" };
        return text.to_owned();
    }
    if value.is_infinite() {
        let text = if value < 0.0 { "-inf" } else { "inf" };
        return text.to_owned();
    }

    // Round to the target precision first; the exponent of the rounded value
    // decides between fixed and scientific notation.
    let scientific = format!("{:.*e}", (GENERAL_PRECISION - 1) as usize, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= GENERAL_PRECISION {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa),
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (GENERAL_PRECISION - 1 - exponent) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_owned()
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

/// Cap rendered numbers at the formatting buffer size.
fn bounded(mut text: String) -> Vec<u8> {
    text.truncate(FORMAT_BUFFER_SIZE - 1);
    text.into_bytes()
}

/// Text of a value as printed and as produced by `to_string`.
pub(crate) fn render_text(value: &YafValue) -> Cow<'_, [u8]> {
    match value {
        YafValue::Int(n) => Cow::Owned(bounded(n.to_string())),
        YafValue::Float(x) => Cow::Owned(bounded(format_general(*x))),
        YafValue::String(text) => Cow::Borrowed(text.as_bytes()),
        YafValue::Bool(true) => Cow::Borrowed(b"true"),
        YafValue::Bool(false) => Cow::Borrowed(b"false"),
        YafValue::Array(_) => Cow::Borrowed(b"unknown"),
    }
}

/// `isspace` in the C locale.
fn is_c_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

fn skip_space(text: &[u8]) -> &[u8] {
    let start = text.iter().position(|&b| !is_c_space(b)).unwrap_or(text.len());
    &text[start..]
}

fn count_digits(text: &[u8]) -> usize {
    text.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Parse a whole string as a decimal integer.
///
/// Leading whitespace and one sign are accepted; anything after the digits
/// rejects the input. Out-of-range values saturate.
pub fn parse_int_exact(text: &[u8]) -> Option<i64> {
    let text = skip_space(text);
    let (negative, digits) = match text.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, text),
    };
    if digits.is_empty() || count_digits(digits) != digits.len() {
        return None;
    }

    let mut acc: i64 = 0;
    for &digit in digits {
        let digit = i64::from(digit - b'0');
        acc = if negative {
            acc.saturating_mul(10).saturating_sub(digit)
        } else {
            acc.saturating_mul(10).saturating_add(digit)
        };
    }
    Some(acc)
}

/// Length of the longest prefix of `text` that reads as a float literal.
fn float_prefix_len(text: &[u8]) -> usize {
    let mut pos = usize::from(matches!(text.first(), Some(b'+' | b'-')));

    let rest = &text[pos..];
    for word in [&b"infinity"[..], b"inf", b"nan"] {
        if rest.len() >= word.len() && rest[..word.len()].eq_ignore_ascii_case(word) {
            return pos + word.len();
        }
    }

    let int_digits = count_digits(&text[pos..]);
    pos += int_digits;

    let mut frac_digits = 0;
    if text.get(pos) == Some(&b'.') {
        frac_digits = count_digits(&text[pos + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            pos += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return 0;
    }

    if matches!(text.get(pos), Some(b'e' | b'E')) {
        let mut exp = pos + 1;
        if matches!(text.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = count_digits(&text[exp..]);
        if exp_digits > 0 {
            pos = exp + exp_digits;
        }
    }

    pos
}

fn hex_digit(byte: u8) -> Option<u64> {
    char::from(byte).to_digit(16).map(u64::from)
}

/// Multiply by `2^exp` without overflowing the intermediate power.
fn scale_by_pow2(mut value: f64, mut exp: i64) -> f64 {
    const STEP: i32 = 1000;
    while exp > i64::from(STEP) && value.is_finite() && value != 0.0 {
        value *= 2f64.powi(STEP);
        exp -= i64::from(STEP);
    }
    while exp < -i64::from(STEP) && value != 0.0 {
        value *= 2f64.powi(-STEP);
        exp += i64::from(STEP);
    }
    value * 2f64.powi(exp as i32)
}

/// Hexadecimal float body after the `0x` prefix: hex digits with an
/// optional fraction, then an optional binary exponent `p[+-]digits`.
/// `None` when no hex digit follows the prefix.
fn parse_hex_float(text: &[u8]) -> Option<f64> {
    // Digits beyond what a u64 holds only shift the exponent
    const LIMIT: u64 = 1 << 59;

    let mut mantissa: u64 = 0;
    let mut exp: i64 = 0;
    let mut any_digit = false;
    let mut pos = 0;
    let mut in_fraction = false;

    while let Some(&byte) = text.get(pos) {
        if byte == b'.' && !in_fraction {
            in_fraction = true;
            pos += 1;
            continue;
        }
        let Some(digit) = hex_digit(byte) else {
            break;
        };
        any_digit = true;
        if mantissa < LIMIT {
            mantissa = mantissa * 16 + digit;
            if in_fraction {
                exp -= 4;
            }
        } else if !in_fraction {
            exp += 4;
        }
        pos += 1;
    }
    if !any_digit {
        return None;
    }

    if matches!(text.get(pos), Some(b'p' | b'P')) {
        let mut cursor = pos + 1;
        let negative = match text.get(cursor) {
            Some(b'-') => {
                cursor += 1;
                true
            }
            Some(b'+') => {
                cursor += 1;
                false
            }
            _ => false,
        };
        let digits = count_digits(&text[cursor..]);
        if digits > 0 {
            let mut binary: i64 = 0;
            for &digit in &text[cursor..cursor + digits] {
                binary = binary.saturating_mul(10).saturating_add(i64::from(digit - b'0'));
            }
            exp = exp.saturating_add(if negative { -binary } else { binary });
        }
    }

    Some(scale_by_pow2(mantissa as f64, exp.clamp(-5000, 5000)))
}

/// Parse the leading float of a string, `strtod` style; 0.0 when none.
///
/// Accepts decimal literals with an optional exponent, `0x` hexadecimal
/// floats with an optional `p` exponent, and `inf`/`infinity`/`nan`.
pub fn parse_float_prefix(text: &[u8]) -> f64 {
    let text = skip_space(text);

    let (negative, unsigned) = match text.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, text),
    };
    if let [b'0', b'x' | b'X', body @ ..] = unsigned {
        if let Some(value) = parse_hex_float(body) {
            return if negative { -value } else { value };
        }
    }

    let len = float_prefix_len(text);
    std::str::from_utf8(&text[..len])
        .ok()
        .and_then(|literal| literal.parse::<f64>().ok())
        .unwrap_or(0.0)
}

pub fn to_string(value: &YafValue) -> YafValue {
    YafValue::string(render_text(value))
}

pub fn to_int(value: &YafValue) -> YafValue {
    let n = match value {
        YafValue::Int(n) => *n,
        // `as` truncates toward zero and saturates; NaN becomes 0
        YafValue::Float(x) => *x as i64,
        YafValue::String(text) => parse_int_exact(text.as_bytes()).unwrap_or(0),
        YafValue::Bool(b) => i64::from(*b),
        YafValue::Array(_) => 0,
    };
    YafValue::int(n)
}

pub fn to_float(value: &YafValue) -> YafValue {
    let x = match value {
        YafValue::Int(n) => *n as f64,
        YafValue::Float(x) => *x,
        YafValue::String(text) => parse_float_prefix(text.as_bytes()),
        YafValue::Bool(b) => f64::from(u8::from(*b)),
        YafValue::Array(_) => 0.0,
    };
    YafValue::float(x)
}

/// Strict String -> Int conversion; terminates on a non-String operand.
pub fn string_to_int(value: &YafValue) -> YafValue {
    let text = expect_string(value, "string_to_int");
    YafValue::int(parse_int_exact(text.as_bytes()).unwrap_or(0))
}

/// Strict Int -> String conversion; terminates on a non-Int operand.
pub fn int_to_string(value: &YafValue) -> YafValue {
    let n = expect_int(value, "int_to_string");
    YafValue::string(bounded(n.to_string()))
}

/// Convert any value to its string representation
#[unsafe(no_mangle)]
pub extern "C" fn yaf_value_to_string(value: YafValue) -> YafValue {
    to_string(&value)
}

#[unsafe(no_mangle)]
pub extern "C" fn yaf_value_to_int(value: YafValue) -> YafValue {
    to_int(&value)
}

#[unsafe(no_mangle)]
pub extern "C" fn yaf_value_to_float(value: YafValue) -> YafValue {
    to_float(&value)
}

#[unsafe(no_mangle)]
pub extern "C" fn yaf_string_to_int(value: YafValue) -> YafValue {
    string_to_int(&value)
}

#[unsafe(no_mangle)]
pub extern "C" fn yaf_int_to_string(value: YafValue) -> YafValue {
    int_to_string(&value)
}
