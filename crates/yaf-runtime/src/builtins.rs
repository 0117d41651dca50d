//! Built-in printing functions for YAF programs
//!
//! Values are written to C `stdout` using the same text as `to_string`.
//! Output is buffered like any other `printf` output and write errors are
//! ignored.

use std::io;

use crate::convert::render_text;
use crate::stdio::CStdout;
use crate::value::YafValue;

fn write_value(out: &mut impl io::Write, value: &YafValue, newline: bool) -> io::Result<()> {
    out.write_all(&render_text(value))?;
    if newline {
        out.write_all(b"\n")?;
    }
    Ok(())
}

/// Print a value followed by a newline
pub fn print_value(value: &YafValue) {
    let _ = write_value(&mut CStdout, value, true);
}

/// Print a value without a newline
pub fn print_value_no_newline(value: &YafValue) {
    let _ = write_value(&mut CStdout, value, false);
}

#[unsafe(no_mangle)]
pub extern "C" fn yaf_print_value(value: YafValue) {
    print_value(&value);
}

#[unsafe(no_mangle)]
pub extern "C" fn yaf_print_value_no_newline(value: YafValue) {
    print_value_no_newline(&value);
}
