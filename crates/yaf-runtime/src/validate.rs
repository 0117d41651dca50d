//! Runtime type assertions for typed primitives
//!
//! Generated code only reaches this layer after the type checker has proven
//! the program well-typed, so a tag mismatch here is a compiler defect. The
//! runtime reports it and terminates the process; there is no recoverable
//! error path.

use std::io::Write as _;
use std::sync::OnceLock;

use derive_more::{Display, Error};

use crate::config::FATAL_EXIT_CODE;
use crate::stdio::CStdout;
use crate::value::{ValueTag, YafString, YafValue};

/// A fatal condition raised by the runtime
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum RuntimeFault {
    #[display(
        "Runtime error in {operation}: expected type {} ({expected}), got {} ({actual})",
        expected.code(),
        actual.code()
    )]
    TypeMismatch {
        operation: &'static str,
        expected: ValueTag,
        actual: ValueTag,
    },
}

/// Hook invoked with the fault right before the process exits.
///
/// The handler must return normally; the runtime terminates afterwards.
pub type FatalHandler = fn(&RuntimeFault);

static FATAL_HANDLER: OnceLock<FatalHandler> = OnceLock::new();

/// Install the process-wide fatal handler. Returns `false` if one was
/// already installed.
pub fn set_fatal_handler(handler: FatalHandler) -> bool {
    FATAL_HANDLER.set(handler).is_ok()
}

/// Report `fault` and terminate the process with a non-zero status.
pub fn fatal(fault: RuntimeFault) -> ! {
    tracing::error!(%fault, "fatal runtime fault");

    if let Some(handler) = FATAL_HANDLER.get() {
        handler(&fault);
    }

    let _ = CStdout.flush();
    let _ = std::io::stdout().flush();
    eprintln!("{fault}");
    std::process::exit(FATAL_EXIT_CODE)
}

fn mismatch(operation: &'static str, expected: ValueTag, actual: ValueTag) -> ! {
    fatal(RuntimeFault::TypeMismatch {
        operation,
        expected,
        actual,
    })
}

/// Assert that `value` carries `expected`; terminates the process otherwise.
pub fn validate_type(value: &YafValue, expected: ValueTag, operation: &'static str) {
    let actual = value.tag();
    if actual != expected {
        mismatch(operation, expected, actual);
    }
}

/// Validate a String operand and borrow its text.
pub fn expect_string<'a>(value: &'a YafValue, operation: &'static str) -> &'a YafString {
    match value {
        YafValue::String(text) => text,
        other => mismatch(operation, ValueTag::String, other.tag()),
    }
}

/// Validate an Int operand and read it.
pub fn expect_int(value: &YafValue, operation: &'static str) -> i64 {
    match value {
        YafValue::Int(n) => *n,
        other => mismatch(operation, ValueTag::Int, other.tag()),
    }
}
