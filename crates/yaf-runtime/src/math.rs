//! Arithmetic helpers for YAF values
//!
//! These helpers never fail: operand combinations without a numeric meaning
//! yield Int 0 instead of raising an error.

use crate::value::YafValue;

/// Widen an operand to float for mixed-tag arithmetic.
fn widen(value: &YafValue) -> f64 {
    match value {
        YafValue::Int(n) => *n as f64,
        YafValue::Float(x) => *x,
        YafValue::Bool(b) => f64::from(u8::from(*b)),
        YafValue::String(_) | YafValue::Array(_) => 0.0,
    }
}

pub fn abs(value: &YafValue) -> YafValue {
    match value {
        // i64::MIN has no positive counterpart; saturate instead of overflowing
        YafValue::Int(n) => YafValue::int(n.saturating_abs()),
        YafValue::Float(x) => YafValue::float(x.abs()),
        YafValue::String(_) | YafValue::Bool(_) | YafValue::Array(_) => YafValue::int(0),
    }
}

pub fn max(a: &YafValue, b: &YafValue) -> YafValue {
    match (a, b) {
        (YafValue::Int(x), YafValue::Int(y)) => YafValue::int((*x).max(*y)),
        (YafValue::Float(_), _) | (_, YafValue::Float(_)) => YafValue::float(widen(a).max(widen(b))),
        _ => YafValue::int(0),
    }
}

pub fn min(a: &YafValue, b: &YafValue) -> YafValue {
    match (a, b) {
        (YafValue::Int(x), YafValue::Int(y)) => YafValue::int((*x).min(*y)),
        (YafValue::Float(_), _) | (_, YafValue::Float(_)) => YafValue::float(widen(a).min(widen(b))),
        _ => YafValue::int(0),
    }
}

/// Floating-point exponentiation; the result is always Float.
pub fn pow(base: &YafValue, exponent: &YafValue) -> YafValue {
    YafValue::float(widen(base).powf(widen(exponent)))
}

#[unsafe(no_mangle)]
pub extern "C" fn yaf_math_abs(value: YafValue) -> YafValue {
    abs(&value)
}

#[unsafe(no_mangle)]
pub extern "C" fn yaf_math_max(a: YafValue, b: YafValue) -> YafValue {
    max(&a, &b)
}

#[unsafe(no_mangle)]
pub extern "C" fn yaf_math_min(a: YafValue, b: YafValue) -> YafValue {
    min(&a, &b)
}

#[unsafe(no_mangle)]
pub extern "C" fn yaf_math_pow(base: YafValue, exponent: YafValue) -> YafValue {
    pow(&base, &exponent)
}
