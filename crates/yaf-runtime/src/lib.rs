//! YAF runtime library.
//!
//! Provides the value representation and the primitive operations that
//! compiled YAF programs call through the C ABI:
//! - Value construction and release (`yaf_make_*`, `yaf_free_value`)
//! - Conversions (`yaf_value_to_*`, `yaf_string_to_int`, `yaf_int_to_string`)
//! - Math, string, file/console and time primitives
//! - Printing builtins and the reserved collector hooks (`yaf_gc_*`)
//!
//! Exported functions receive their arguments by value without taking
//! ownership of them and return a freshly owned value. Whoever owns a String
//! value calls `yaf_free_value` on it once it is no longer needed.
//!
//! Typed primitives validate their operands and terminate the process on a
//! tag mismatch (see [`validate`]); environmental failures are reported
//! through sentinel values instead.

pub mod builtins;
pub mod config;
pub mod convert;
pub mod gc;
pub mod io;
pub mod math;
pub mod memory;
pub mod stdio;
pub mod string_ops;
pub mod time;
pub mod validate;
pub mod value;


pub use builtins::{yaf_print_value, yaf_print_value_no_newline};
pub use config::RuntimeConfig;
pub use convert::{
    yaf_int_to_string, yaf_string_to_int, yaf_value_to_float, yaf_value_to_int,
    yaf_value_to_string,
};
pub use gc::{Collector, register_collector, yaf_gc_collect, yaf_gc_final_cleanup};
pub use io::{
    yaf_io_file_exists, yaf_io_input, yaf_io_input_prompt, yaf_io_read_file, yaf_io_write_file,
};
pub use math::{yaf_math_abs, yaf_math_max, yaf_math_min, yaf_math_pow};
pub use memory::{
    yaf_free_value, yaf_make_bool, yaf_make_float, yaf_make_int, yaf_make_string, yaf_make_void,
};
pub use string_ops::{yaf_string_concat, yaf_string_length, yaf_string_lower, yaf_string_upper};
pub use time::{yaf_time_now, yaf_time_now_millis, yaf_time_sleep};
pub use validate::{RuntimeFault, set_fatal_handler, validate_type};
pub use value::{ArrayRef, ValueTag, YafString, YafValue};

/// Initialize the YAF runtime.
///
/// Optional: reads [`RuntimeConfig`] from the environment and installs the
/// diagnostics subscriber. Every primitive works without it. Calling it more
/// than once is harmless.
#[unsafe(no_mangle)]
pub extern "C" fn yaf_runtime_init() {
    let config = RuntimeConfig::from_env();
    if config.init_logging() {
        tracing::debug!(filter = %config.log_filter, "runtime initialized");
    }
}
