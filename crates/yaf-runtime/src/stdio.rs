//! Console output through the C `stdout` stream
//!
//! Generated code writes to C `stdout` itself (the newline after `print`, for
//! one), so everything the runtime prints goes through the same `FILE` buffer
//! to keep program order. Rust's `std::io::stdout` has a buffer of its own
//! that C never flushes.

use std::ffi::{c_char, c_int};
use std::io;
use std::ptr;

/// Writer over C `stdout`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CStdout;

impl io::Write for CStdout {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let Some(&first) = buf.first() else {
            return Ok(0);
        };

        // `%s` stops at NUL, so a NUL byte is written on its own
        if first == 0 {
            // SAFETY: putchar only touches the stdout stream.
            let status = unsafe { libc::putchar(0) };
            return if status < 0 { Err(io::Error::last_os_error()) } else { Ok(1) };
        }

        let len = buf.len().min(c_int::MAX as usize);
        // SAFETY: the precision bounds the read to `len` bytes of `buf`.
        let printed = unsafe {
            libc::printf(
                c"%.*s".as_ptr(),
                len as c_int,
                buf.as_ptr().cast::<c_char>(),
            )
        };
        if printed < 0 {
            Err(io::Error::last_os_error())
        } else {
            Ok(printed as usize)
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        // fflush(NULL) flushes every open output stream, stdout included
        // SAFETY: a null stream is explicitly allowed by C.
        if unsafe { libc::fflush(ptr::null_mut()) } == 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }
}
