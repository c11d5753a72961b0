//! Deterministic time functions.
//!
//! Every query that reaches the clock makes exactly one observation, including
//! `clock_gettime` calls for an unsupported clock. Only a null output pointer
//! is rejected before the clock is read.

#![allow(non_camel_case_types)]

use super::errno::set_errno;
use crate::runtime::clock::{self, ClockKind};
use crate::{Error, Result};
use macros::tessera_symbol;
use std::time::Duration;
use tracing::debug;

/// Time in seconds.
pub type time_t = std::os::raw::c_long;

/// Suseconds (microseconds) type.
pub type suseconds_t = std::os::raw::c_long;

/// Time value with seconds and microseconds.
#[repr(C)]
pub struct timeval {
    pub tv_sec: time_t,
    pub tv_usec: suseconds_t,
}

/// Time specification with seconds and nanoseconds.
#[repr(C)]
pub struct timespec {
    pub tv_sec: time_t,
    pub tv_nsec: std::os::raw::c_long,
}

/// Timezone (unused but required for gettimeofday signature).
#[repr(C)]
pub struct timezone {
    pub tz_minuteswest: std::os::raw::c_int,
    pub tz_dsttime: std::os::raw::c_int,
}

impl From<Duration> for timespec {
    fn from(d: Duration) -> Self {
        timespec {
            tv_sec: d.as_secs() as time_t,
            tv_nsec: d.subsec_nanos() as std::os::raw::c_long,
        }
    }
}

impl From<Duration> for timeval {
    fn from(d: Duration) -> Self {
        timeval {
            tv_sec: d.as_secs() as time_t,
            tv_usec: d.subsec_micros() as suseconds_t,
        }
    }
}

/// Report `err` through errno and return the C failure value.
fn fail(err: Error) -> std::os::raw::c_int {
    set_errno(err.errno());
    -1
}

fn clock_kind(clock_id: libc::clockid_t) -> Result<ClockKind> {
    ClockKind::try_from(clock_id).inspect_err(|_| debug!("unsupported clock id {}", clock_id))
}

/// Get time in seconds.
#[tessera_symbol]
pub unsafe fn time(tloc: *mut time_t) -> time_t {
    let secs = clock::global().now(ClockKind::Realtime).as_secs() as time_t;
    if !tloc.is_null() {
        // SAFETY: caller passes a writable time_t or null.
        unsafe { *tloc = secs };
    }
    secs
}

/// Get time of day.
#[tessera_symbol]
pub unsafe fn gettimeofday(tv: *mut timeval, tz: *mut timezone) -> std::os::raw::c_int {
    if !tv.is_null() {
        let now = clock::global().now(ClockKind::Realtime);
        // SAFETY: caller passes a writable timeval or null.
        unsafe { *tv = now.into() };
    }
    if !tz.is_null() {
        // SAFETY: caller passes a writable timezone or null.
        unsafe {
            (*tz).tz_minuteswest = 0;
            (*tz).tz_dsttime = 0;
        }
    }
    0 // Success
}

/// Get clock time.
#[tessera_symbol]
pub unsafe fn clock_gettime(clock_id: libc::clockid_t, tp: *mut timespec) -> std::os::raw::c_int {
    if tp.is_null() {
        return fail(Error::BadAddress);
    }
    let now = match clock::global().read(clock_id) {
        Ok(now) => now,
        Err(err) => {
            debug!("unsupported clock id {}", clock_id);
            return fail(err);
        }
    };
    // SAFETY: checked non-null; caller passes a writable timespec.
    unsafe { *tp = now.into() };
    0 // Success
}

/// Get clock resolution.
#[tessera_symbol]
pub unsafe fn clock_getres(clock_id: libc::clockid_t, res: *mut timespec) -> std::os::raw::c_int {
    if res.is_null() {
        return fail(Error::BadAddress);
    }
    let kind = match clock_kind(clock_id) {
        Ok(kind) => kind,
        Err(err) => return fail(err),
    };
    let resolution = clock::global().resolution(kind);
    // SAFETY: checked non-null; caller passes a writable timespec.
    unsafe { *res = resolution.into() };
    0 // Success
}
