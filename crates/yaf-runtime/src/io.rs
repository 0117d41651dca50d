//! File and console I/O for YAF programs
//!
//! Environmental failures never surface as errors: a file that cannot be read
//! produces an empty string, a failed write produces `false`, and end of input
//! produces an empty line. The underlying `io::Error` is only logged.

use std::fs;
use std::io::{self, BufRead, Write as _};
use std::path::PathBuf;

use crate::config::INPUT_BUFFER_SIZE;
use crate::stdio::CStdout;
use crate::validate::expect_string;
use crate::value::YafValue;

#[cfg(unix)]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt as _;
    PathBuf::from(OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}

/// Read a whole file into a string value; empty on any failure.
pub fn read_file(path: &YafValue) -> YafValue {
    let path = path_from_bytes(expect_string(path, "read_file").as_bytes());
    match fs::read(&path) {
        Ok(contents) => YafValue::string(contents),
        Err(err) => {
            tracing::debug!(path = %path.display(), %err, "read_file failed");
            YafValue::string(b"")
        }
    }
}

/// Replace a file's contents; `true` on success.
pub fn write_file(path: &YafValue, content: &YafValue) -> YafValue {
    let path = path_from_bytes(expect_string(path, "write_file").as_bytes());
    let content = expect_string(content, "write_file");
    match fs::write(&path, content.as_bytes()) {
        Ok(()) => YafValue::bool(true),
        Err(err) => {
            tracing::debug!(path = %path.display(), %err, "write_file failed");
            YafValue::bool(false)
        }
    }
}

pub fn file_exists(path: &YafValue) -> YafValue {
    let path = path_from_bytes(expect_string(path, "file_exists").as_bytes());
    YafValue::bool(fs::metadata(path).is_ok())
}

/// Read one line of at most `limit` bytes from `reader`.
///
/// The line terminator (`\n`, or `\r\n`) is stripped. Bytes past `limit` are
/// consumed and discarded up to the end of the line. Returns `None` when the
/// reader is already at end of input.
pub fn read_bounded_line<R: BufRead>(reader: &mut R, limit: usize) -> io::Result<Option<Vec<u8>>> {
    let mut line = Vec::new();
    let mut seen = 0usize;
    let mut terminated = false;

    loop {
        let available = match reader.fill_buf() {
            Ok(available) => available,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        };
        if available.is_empty() {
            break;
        }

        let (chunk, used) = match available.iter().position(|&b| b == b'\n') {
            Some(newline) => {
                terminated = true;
                (&available[..newline], newline + 1)
            }
            None => (available, available.len()),
        };

        let room = limit.saturating_sub(line.len());
        line.extend_from_slice(&chunk[..chunk.len().min(room)]);
        seen += chunk.len();
        reader.consume(used);

        if terminated {
            break;
        }
    }

    if seen == 0 && !terminated {
        return Ok(None);
    }
    if seen > line.len() {
        tracing::debug!(length = seen, kept = line.len(), "input line truncated");
    } else if terminated && line.last() == Some(&b'\r') {
        line.pop();
    }
    Ok(Some(line))
}

/// Read one line from stdin.
pub fn input() -> YafValue {
    let mut stdin = io::stdin().lock();
    match read_bounded_line(&mut stdin, INPUT_BUFFER_SIZE - 1) {
        Ok(Some(line)) => YafValue::string(line),
        Ok(None) => YafValue::string(b""),
        Err(err) => {
            tracing::debug!(%err, "reading stdin failed");
            YafValue::string(b"")
        }
    }
}

/// Print `prompt` without a newline, then read one line from stdin.
pub fn input_with_prompt(prompt: &YafValue) -> YafValue {
    let prompt = expect_string(prompt, "input_prompt");
    let mut stdout = CStdout;
    if let Err(err) = stdout.write_all(prompt.as_bytes()).and_then(|()| stdout.flush()) {
        tracing::debug!(%err, "writing prompt failed");
    }
    input()
}

/// Read the entire contents of a file
#[unsafe(no_mangle)]
pub extern "C" fn yaf_io_read_file(path: YafValue) -> YafValue {
    read_file(&path)
}

/// Write a string to a file, truncating it first
#[unsafe(no_mangle)]
pub extern "C" fn yaf_io_write_file(path: YafValue, content: YafValue) -> YafValue {
    write_file(&path, &content)
}

#[unsafe(no_mangle)]
pub extern "C" fn yaf_io_file_exists(path: YafValue) -> YafValue {
    file_exists(&path)
}

/// Read a line of input from the console
#[unsafe(no_mangle)]
pub extern "C" fn yaf_io_input() -> YafValue {
    input()
}

/// Read input after printing a prompt
#[unsafe(no_mangle)]
pub extern "C" fn yaf_io_input_prompt(prompt: YafValue) -> YafValue {
    input_with_prompt(&prompt)
}
