//! Wall-clock time and sleeping

use std::thread;
use std::time::Duration;

use chrono::Utc;

use crate::value::YafValue;

/// Seconds since the Unix epoch
pub fn now() -> YafValue {
    YafValue::int(Utc::now().timestamp())
}

/// Milliseconds since the Unix epoch
pub fn now_millis() -> YafValue {
    YafValue::int(Utc::now().timestamp_micros() / 1000)
}

/// Block for a whole number of seconds.
///
/// Float durations are truncated, so anything below one second returns
/// immediately. Negative and non-numeric durations do not sleep.
pub fn sleep(seconds: &YafValue) -> YafValue {
    let whole = match seconds {
        YafValue::Int(n) => *n,
        YafValue::Float(x) => *x as i64,
        other => {
            tracing::debug!(tag = %other.tag(), "sleep called with a non-numeric duration");
            0
        }
    };

    match u64::try_from(whole) {
        Ok(secs) if secs > 0 => thread::sleep(Duration::from_secs(secs)),
        _ => {}
    }
    YafValue::bool(true)
}

#[unsafe(no_mangle)]
pub extern "C" fn yaf_time_now() -> YafValue {
    now()
}

#[unsafe(no_mangle)]
pub extern "C" fn yaf_time_now_millis() -> YafValue {
    now_millis()
}

#[unsafe(no_mangle)]
pub extern "C" fn yaf_time_sleep(seconds: YafValue) -> YafValue {
    sleep(&seconds)
}
