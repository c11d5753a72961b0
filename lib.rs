//! Tessera - Deterministic libc overrides for sandboxed guests.
//!
//! Tessera replaces the libc entry points that leak host non-determinism into
//! a guest (wall-clock and monotonic time, OS entropy) with guest-local
//! implementations driven by a logical clock, and supplies the legacy
//! aligned-allocation entry points on top of `aligned_alloc`. Any code linked
//! into the guest, including an embedded script engine, calls these instead
//! of the operating system primitives.
//!
//! # Modules
//!
//! - [`runtime`] - Deterministic state: logical clock, entropy mixing, aligned
//!   allocation and the null engine timestamp
//! - [`libc`] - `extern "C"` entry points that adapt the runtime to libc call
//!   contracts
//! - [`symbols`] - Registry of the overrides by C symbol name
//!
//! # Error Handling
//!
//! Runtime operations return the consolidated [`Error`] type. Only the
//! [`libc`] adapters turn it into a return code or `errno`, whichever the
//! emulated entry point historically used.

pub mod libc;
pub mod runtime;
pub mod symbols;

use std::ffi::c_int;

/// Consolidated error type for all Tessera operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Unsupported clock, bad alignment, oversized request or null buffer.
    #[error("invalid argument")]
    InvalidArgument,

    #[error("out of memory")]
    OutOfMemory,

    /// A required output location was null.
    #[error("bad address")]
    BadAddress,
}

impl Error {
    /// The `errno` value reported for this error.
    pub fn errno(self) -> c_int {
        match self {
            Error::InvalidArgument => ::libc::EINVAL,
            Error::OutOfMemory => ::libc::ENOMEM,
            Error::BadAddress => ::libc::EFAULT,
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;

pub use runtime::alloc::Alignment;
pub use runtime::clock::{ClockBuilder, ClockKind, LogicalClock};
pub use runtime::entropy::EntropyPool;
pub use runtime::timestamp::TimeStamp;
