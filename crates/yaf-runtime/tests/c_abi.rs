//! Tests for the exported C ABI, called the way generated code calls it

use yaf_runtime::{
    RuntimeConfig, ValueTag, YafValue, yaf_free_value, yaf_int_to_string, yaf_io_file_exists, yaf_io_read_file,
    yaf_io_write_file, yaf_make_bool, yaf_make_float, yaf_make_int, yaf_make_string,
    yaf_make_void, yaf_math_abs, yaf_math_max, yaf_math_min, yaf_math_pow, yaf_string_concat,
    yaf_string_length, yaf_string_lower, yaf_string_to_int, yaf_string_upper, yaf_value_to_float,
    yaf_runtime_init, yaf_time_now, yaf_time_now_millis, yaf_time_sleep, yaf_value_to_int,
    yaf_value_to_string,
};

/// Bitwise copy for passing a value into an exported function while the
/// test keeps ownership, as compiled code does.
fn pass(value: &YafValue) -> YafValue {
    unsafe { value.share() }
}

fn make_string(text: &std::ffi::CStr) -> YafValue {
    unsafe { yaf_make_string(text.as_ptr()) }
}

fn free(value: &mut YafValue) {
    unsafe { yaf_free_value(value) };
}

#[test]
fn test_string_pipeline() {
    let mut hola = make_string(c"Hola");
    let mut upper = yaf_string_upper(pass(&hola));
    let length = yaf_string_length(pass(&upper));
    let mut lower = yaf_string_lower(pass(&upper));

    assert_eq!(upper.as_bytes(), Some(&b"HOLA"[..]));
    assert_eq!(length, YafValue::Int(4));
    assert_eq!(lower.as_bytes(), Some(&b"hola"[..]));

    // Inputs are still owned and readable by the caller
    assert_eq!(hola.as_bytes(), Some(&b"Hola"[..]));

    free(&mut hola);
    free(&mut upper);
    free(&mut lower);
}

#[test]
fn test_concat_mixed_operands() {
    let mut left = make_string(c"n=");
    let mut joined = yaf_string_concat(pass(&left), yaf_make_int(3));
    assert_eq!(joined.as_bytes(), Some(&b"n="[..]));

    let mut number = yaf_value_to_string(yaf_make_int(3));
    let mut full = yaf_string_concat(pass(&left), pass(&number));
    assert_eq!(full.as_bytes(), Some(&b"n=3"[..]));

    for v in [&mut left, &mut joined, &mut number, &mut full] {
        free(v);
    }
}

#[test]
fn test_conversions() {
    let mut text = yaf_value_to_string(yaf_make_float(0.1));
    assert_eq!(text.as_bytes(), Some(&b"0.1"[..]));
    free(&mut text);

    let mut text = yaf_value_to_string(yaf_make_bool(1));
    assert_eq!(text.as_bytes(), Some(&b"true"[..]));
    free(&mut text);

    let mut digits = make_string(c" -17");
    assert_eq!(yaf_value_to_int(pass(&digits)), YafValue::Int(-17));
    assert_eq!(yaf_string_to_int(pass(&digits)), YafValue::Int(-17));
    assert_eq!(yaf_value_to_float(pass(&digits)), YafValue::Float(-17.0));
    free(&mut digits);

    let mut garbage = make_string(c"42abc");
    assert_eq!(yaf_value_to_int(pass(&garbage)), YafValue::Int(0));
    assert_eq!(yaf_string_to_int(pass(&garbage)), YafValue::Int(0));
    assert_eq!(yaf_value_to_float(pass(&garbage)), YafValue::Float(42.0));
    free(&mut garbage);

    let mut text = yaf_int_to_string(yaf_make_int(i64::MIN));
    assert_eq!(text.as_bytes(), Some(i64::MIN.to_string().as_bytes()));
    free(&mut text);

    assert_eq!(yaf_value_to_int(yaf_make_void()), YafValue::Int(0));
}

#[test]
fn test_math() {
    assert_eq!(yaf_math_abs(yaf_make_int(-9)), YafValue::Int(9));
    assert_eq!(yaf_math_max(yaf_make_int(1), yaf_make_int(2)), YafValue::Int(2));
    assert_eq!(yaf_math_min(yaf_make_int(1), yaf_make_float(0.5)), YafValue::Float(0.5));

    let power = yaf_math_pow(yaf_make_int(2), yaf_make_int(10));
    assert_eq!(power.tag(), ValueTag::Float);
    assert_eq!(power, YafValue::Float(1024.0));
}

#[test]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let target = dir.path().join("abi.txt");
    let target = std::ffi::CString::new(target.to_string_lossy().into_owned()).expect("no NUL");

    let mut path = make_string(&target);
    let mut content = make_string(c"written through the C ABI\n");

    assert_eq!(yaf_io_file_exists(pass(&path)), YafValue::Bool(false));
    assert_eq!(
        yaf_io_write_file(pass(&path), pass(&content)),
        YafValue::Bool(true)
    );
    assert_eq!(yaf_io_file_exists(pass(&path)), YafValue::Bool(true));

    let mut read_back = yaf_io_read_file(pass(&path));
    assert_eq!(read_back, content);

    for v in [&mut path, &mut content, &mut read_back] {
        free(v);
    }
}

#[test]
fn test_time_exports() {
    let secs = yaf_time_now().as_int().expect("Int seconds");
    let millis = yaf_time_now_millis().as_int().expect("Int milliseconds");
    // 2020-01-01T00:00:00Z
    assert!(secs > 1_577_836_800);
    assert!(millis / 1000 >= secs);

    assert_eq!(yaf_time_sleep(yaf_make_int(0)), YafValue::Bool(true));
    assert_eq!(yaf_time_sleep(yaf_make_float(0.25)), YafValue::Bool(true));
}

#[test]
fn test_runtime_init_is_repeatable() {
    yaf_runtime_init();
    yaf_runtime_init();
    // The subscriber from the first call stays installed
    assert!(!RuntimeConfig::default().init_logging());
}
