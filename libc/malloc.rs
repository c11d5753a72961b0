//! Legacy aligned-allocation entry points.
//!
//! Both are thin adapters over [`AlignedAllocator`]: one validation, one
//! delegation. They differ only in how failure reaches the caller.
//! `posix_memalign` returns the error code and leaves `errno` alone, while
//! `memalign` returns null and sets `errno`.

use super::errno::set_errno;
use crate::runtime::alloc::{AlignedAllocator, Alignment, SystemAllocator};
use crate::{Error, Result};
use macros::tessera_symbol;
use std::ffi::c_void;
use tracing::debug;

fn checked_alignment(alignment: usize) -> Result<Alignment> {
    Alignment::new(alignment).inspect_err(|_| debug!("rejected alignment {}", alignment))
}

/// `posix_memalign` against an arbitrary allocator.
///
/// # Safety
///
/// `memptr` must be null or valid for a pointer-sized write.
pub unsafe fn posix_memalign_in<A: AlignedAllocator>(
    allocator: &A,
    memptr: *mut *mut c_void,
    alignment: usize,
    size: usize,
) -> libc::c_int {
    let result = checked_alignment(alignment).and_then(|alignment| {
        if memptr.is_null() {
            return Err(Error::BadAddress);
        }
        allocator
            .allocate(alignment, size)
            .ok_or(Error::OutOfMemory)
    });
    match result {
        Ok(ptr) => {
            // SAFETY: checked non-null; caller guarantees it is writable.
            unsafe { *memptr = ptr.as_ptr() };
            0
        }
        Err(err) => err.errno(),
    }
}

/// `memalign` against an arbitrary allocator.
///
/// The size is rounded up to a multiple of the alignment before delegating.
pub fn memalign_in<A: AlignedAllocator>(allocator: &A, alignment: usize, size: usize) -> *mut c_void {
    let result = checked_alignment(alignment).and_then(|alignment| {
        let size = alignment.round_up(size)?;
        allocator
            .allocate(alignment, size)
            .ok_or(Error::OutOfMemory)
    });
    match result {
        Ok(ptr) => ptr.as_ptr(),
        Err(err) => {
            set_errno(err.errno());
            std::ptr::null_mut()
        }
    }
}

/// Allocate aligned memory, reporting failure as a return code.
#[tessera_symbol]
pub unsafe fn posix_memalign(
    memptr: *mut *mut libc::c_void,
    alignment: libc::size_t,
    size: libc::size_t,
) -> libc::c_int {
    // SAFETY: forwarded from the caller.
    unsafe { posix_memalign_in(&SystemAllocator, memptr, alignment, size) }
}

/// Allocate aligned memory, reporting failure through `errno`.
#[tessera_symbol]
pub fn memalign(alignment: libc::size_t, size: libc::size_t) -> *mut libc::c_void {
    memalign_in(&SystemAllocator, alignment, size)
}
