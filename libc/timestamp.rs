//! C entry points for the script engine's timestamp backend.
//!
//! The engine glue calls these instead of a platform timer. They are not libc
//! overrides, so they are exported under their own names and never enter the
//! symbol registry.

use crate::runtime::timestamp::{self, TimeStamp};

/// Start the timestamp backend.
#[unsafe(no_mangle)]
pub extern "C" fn tessera_timestamp_startup() {
    TimeStamp::startup();
}

/// Shut down the timestamp backend.
#[unsafe(no_mangle)]
pub extern "C" fn tessera_timestamp_shutdown() {
    TimeStamp::shutdown();
}

/// Current instant in ticks. Always zero.
#[unsafe(no_mangle)]
pub extern "C" fn tessera_timestamp_now(high_resolution: bool) -> u64 {
    TimeStamp::now(high_resolution).ticks()
}

/// Process uptime in microseconds. Always zero.
#[unsafe(no_mangle)]
pub extern "C" fn tessera_timestamp_process_uptime() -> u64 {
    TimeStamp::process_uptime()
}

#[unsafe(no_mangle)]
pub extern "C" fn tessera_duration_to_seconds(ticks: i64) -> f64 {
    timestamp::to_seconds(ticks)
}

#[unsafe(no_mangle)]
pub extern "C" fn tessera_duration_to_seconds_sig_digits(ticks: i64) -> f64 {
    timestamp::to_seconds_sig_digits(ticks)
}

/// Milliseconds to ticks, saturating at the `int64_t` range.
#[unsafe(no_mangle)]
pub extern "C" fn tessera_duration_ticks_from_milliseconds(milliseconds: f64) -> i64 {
    timestamp::ticks_from_milliseconds(milliseconds)
}

#[unsafe(no_mangle)]
pub extern "C" fn tessera_duration_resolution_in_ticks() -> i64 {
    timestamp::resolution_in_ticks()
}
