//! String operations for YAF values
//!
//! Strings are byte sequences: lengths count bytes and case mapping only
//! touches ASCII letters. Every operation returns a new owned value and
//! leaves its operands untouched.

use crate::validate::expect_string;
use crate::value::YafValue;

/// Byte length of a string value
pub fn length(value: &YafValue) -> YafValue {
    let text = expect_string(value, "string_length");
    YafValue::int(text.len() as i64)
}

pub fn upper(value: &YafValue) -> YafValue {
    let text = expect_string(value, "string_upper");
    YafValue::string(text.as_bytes().to_ascii_uppercase())
}

pub fn lower(value: &YafValue) -> YafValue {
    let text = expect_string(value, "string_lower");
    YafValue::string(text.as_bytes().to_ascii_lowercase())
}

/// Concatenate two values; non-string operands contribute nothing.
pub fn concat(left: &YafValue, right: &YafValue) -> YafValue {
    let left = left.as_bytes().unwrap_or_default();
    let right = right.as_bytes().unwrap_or_default();

    let mut joined = Vec::with_capacity(left.len() + right.len());
    joined.extend_from_slice(left);
    joined.extend_from_slice(right);
    YafValue::string(joined)
}

/// Get the length of a string value
#[unsafe(no_mangle)]
pub extern "C" fn yaf_string_length(value: YafValue) -> YafValue {
    length(&value)
}

#[unsafe(no_mangle)]
pub extern "C" fn yaf_string_upper(value: YafValue) -> YafValue {
    upper(&value)
}

#[unsafe(no_mangle)]
pub extern "C" fn yaf_string_lower(value: YafValue) -> YafValue {
    lower(&value)
}

/// Concatenate two string values
#[unsafe(no_mangle)]
pub extern "C" fn yaf_string_concat(left: YafValue, right: YafValue) -> YafValue {
    concat(&left, &right)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_counts_bytes() {
        let mut ascii = YafValue::string("hello");
        let mut accented = YafValue::string("café");
        assert_eq!(length(&ascii), YafValue::int(5));
        assert_eq!(length(&accented), YafValue::int(5));
        ascii.release();
        accented.release();
    }

    #[test]
    fn test_case_mapping_is_ascii_only() {
        let mut input = YafValue::string("Grüße, World!");
        let mut up = upper(&input);
        let mut down = lower(&input);
        assert_eq!(up.as_bytes(), Some("GRüßE, WORLD!".as_bytes()));
        assert_eq!(down.as_bytes(), Some("grüße, world!".as_bytes()));
        // The operand is not modified
        assert_eq!(input.as_bytes(), Some("Grüße, World!".as_bytes()));
        input.release();
        up.release();
        down.release();
    }

    #[test]
    fn test_case_mapping_is_idempotent() {
        for sample in ["", "abc", "MiXeD 123", "ÀçЖ z"] {
            let mut value = YafValue::string(sample);
            let mut once = upper(&value);
            let mut twice = upper(&once);
            assert_eq!(once, twice);
            let mut low_once = lower(&value);
            let mut low_twice = lower(&low_once);
            assert_eq!(low_once, low_twice);
            for v in [&mut value, &mut once, &mut twice, &mut low_once, &mut low_twice] {
                v.release();
            }
        }
    }

    #[test]
    fn test_concat() {
        let mut a = YafValue::string("foo");
        let mut b = YafValue::string("bar");
        let mut joined = concat(&a, &b);
        assert_eq!(joined.as_bytes(), Some(&b"foobar"[..]));
        a.release();
        b.release();
        joined.release();
    }

    #[test]
    fn test_concat_with_empty_is_identity() {
        let mut s = YafValue::string("keep");
        let mut empty = YafValue::string("");
        let mut right = concat(&s, &empty);
        let mut left = concat(&empty, &s);
        assert_eq!(right, s);
        assert_eq!(left, s);
        for v in [&mut s, &mut empty, &mut right, &mut left] {
            v.release();
        }
    }

    #[test]
    fn test_concat_tolerates_non_strings() {
        let mut s = YafValue::string("x");
        let mut with_int = concat(&s, &YafValue::int(5));
        let mut with_bool = concat(&YafValue::bool(true), &s);
        let mut neither = concat(&YafValue::float(1.0), &YafValue::int(2));
        assert_eq!(with_int.as_bytes(), Some(&b"x"[..]));
        assert_eq!(with_bool.as_bytes(), Some(&b"x"[..]));
        assert_eq!(neither.as_bytes(), Some(&b""[..]));
        for v in [&mut s, &mut with_int, &mut with_bool, &mut neither] {
            v.release();
        }
    }

    #[test]
    fn test_concat_reads_released_operand_as_empty() {
        let mut gone = YafValue::string("gone");
        gone.release();
        let mut s = YafValue::string("here");
        let mut joined = concat(&gone, &s);
        assert_eq!(joined.as_bytes(), Some(&b"here"[..]));
        s.release();
        joined.release();
    }
}
