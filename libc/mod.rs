//! Deterministic libc function implementations.
//!
//! This module provides the `extern "C"` entry points a guest links against
//! in place of the C library's. Each adapts a [`crate::runtime`] component to
//! the historical call contract of the function it replaces, including how
//! errors are reported.
//!
//! # Modules
//!
//! * [`time`] - `time`, `gettimeofday`, `clock_gettime`, `clock_getres`
//! * [`entropy`] - `getentropy`
//! * [`malloc`] - `posix_memalign`, `memalign`
//! * [`timestamp`] - Timestamp backend for the embedded script engine
//! * [`errno`] - Thread-local error indicator

pub mod entropy;
pub mod errno;
pub mod malloc;
pub mod time;
pub mod timestamp;
