//! Value construction and release for compiled YAF code
//!
//! This module provides the C-compatible constructors and the release hook
//! that generated code calls. Constructors return freshly owned values;
//! release frees the buffer of a String value and leaves the slot empty so a
//! second release is harmless.

use std::ffi::{CStr, c_char, c_int};

use crate::value::YafValue;

/// Create an Int value
#[unsafe(no_mangle)]
pub extern "C" fn yaf_make_int(value: i64) -> YafValue {
    YafValue::int(value)
}

/// Create a Float value
#[unsafe(no_mangle)]
pub extern "C" fn yaf_make_float(value: f64) -> YafValue {
    YafValue::float(value)
}

/// Create a String value owning a copy of a C string
///
/// A null pointer produces an empty string.
///
/// # Safety
///
/// `value` must be null or point to a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn yaf_make_string(value: *const c_char) -> YafValue {
    if value.is_null() {
        return YafValue::string(b"");
    }

    let text = unsafe { CStr::from_ptr(value) };
    YafValue::string(text.to_bytes())
}

/// Create a Bool value; any non-zero integer is true
#[unsafe(no_mangle)]
pub extern "C" fn yaf_make_bool(value: c_int) -> YafValue {
    YafValue::bool(value != 0)
}

/// The value returned by functions without a result (Int 0)
#[unsafe(no_mangle)]
pub extern "C" fn yaf_make_void() -> YafValue {
    YafValue::void()
}

/// Release the heap buffer owned by a String value
///
/// # Safety
///
/// `value` must be null or point to a valid `YafValue` that no other live
/// copy will read after this call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn yaf_free_value(value: *mut YafValue) {
    if let Some(value) = unsafe { value.as_mut() } {
        value.release();
    }
}
