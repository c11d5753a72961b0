//! Access to the calling thread's `errno`.

use std::ffi::c_int;

#[cfg(any(target_os = "linux", target_os = "android"))]
fn errno_location() -> *mut c_int {
    // SAFETY: always returns the current thread's errno slot.
    unsafe { libc::__errno_location() }
}

#[cfg(any(target_os = "macos", target_os = "ios"))]
fn errno_location() -> *mut c_int {
    // SAFETY: always returns the current thread's errno slot.
    unsafe { libc::__error() }
}

/// Set `errno` for the calling thread.
pub fn set_errno(value: c_int) {
    // SAFETY: the slot is valid and owned by this thread.
    unsafe { *errno_location() = value }
}

/// Read `errno` for the calling thread.
pub fn errno() -> c_int {
    // SAFETY: as above.
    unsafe { *errno_location() }
}
