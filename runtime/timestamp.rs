//! Null timestamp backend for the embedded script engine.
//!
//! The engine expects a platform timestamp facility. The guest has no timing
//! backend, so every instant is zero and process uptime is zero. Duration
//! conversions still run the same fixed-point arithmetic a real backend would,
//! so engine code doing duration math takes its usual numeric path.
//!
//! Ticks are nanoseconds.

use std::ops::Sub;

const NS_PER_SEC: f64 = 1_000_000_000.0;
const NS_PER_MS: f64 = 1_000_000.0;

/// Timer resolution in ticks, matching the logical clock's resolution.
pub const RESOLUTION_TICKS: i64 = 1000;

/// Largest power of ten not exceeding [`RESOLUTION_TICKS`].
pub const RESOLUTION_SIG_DIGITS: i64 = 1000;

/// An engine instant. Always zero here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeStamp(u64);

impl TimeStamp {
    pub const ZERO: TimeStamp = TimeStamp(0);

    /// Backend startup. Nothing to set up.
    pub fn startup() {}

    /// Backend shutdown. Nothing to tear down.
    pub fn shutdown() {}

    /// The current instant, ignoring the resolution preference.
    pub fn now(_high_resolution: bool) -> TimeStamp {
        TimeStamp::ZERO
    }

    /// Microseconds since process start.
    pub fn process_uptime() -> u64 {
        0
    }

    pub fn ticks(self) -> u64 {
        self.0
    }
}

impl Sub for TimeStamp {
    type Output = TimeDuration;

    fn sub(self, rhs: TimeStamp) -> TimeDuration {
        TimeDuration(self.0.wrapping_sub(rhs.0) as i64)
    }
}

/// Signed distance between two instants, in ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeDuration(i64);

impl TimeDuration {
    pub fn from_ticks(ticks: i64) -> Self {
        Self(ticks)
    }

    pub fn from_milliseconds(ms: f64) -> Self {
        Self(ticks_from_milliseconds(ms))
    }

    pub fn ticks(self) -> i64 {
        self.0
    }

    pub fn to_seconds(self) -> f64 {
        to_seconds(self.0)
    }

    pub fn to_seconds_sig_digits(self) -> f64 {
        to_seconds_sig_digits(self.0)
    }
}

pub fn to_seconds(ticks: i64) -> f64 {
    ticks as f64 / NS_PER_SEC
}

/// Seconds with anything finer than the timer resolution chopped off.
pub fn to_seconds_sig_digits(ticks: i64) -> f64 {
    let value = RESOLUTION_TICKS * (ticks / RESOLUTION_TICKS);
    let value = RESOLUTION_SIG_DIGITS * (value / RESOLUTION_SIG_DIGITS);
    value as f64 / NS_PER_SEC
}

/// Convert milliseconds to ticks, clamping to the `i64` range.
///
/// NaN converts to zero.
pub fn ticks_from_milliseconds(ms: f64) -> i64 {
    let ticks = ms * NS_PER_MS;
    if ticks >= i64::MAX as f64 {
        i64::MAX
    } else if ticks <= i64::MIN as f64 {
        i64::MIN
    } else if ticks.is_nan() {
        0
    } else {
        ticks as i64
    }
}

pub fn resolution_in_ticks() -> i64 {
    RESOLUTION_TICKS
}
