//! Canonical aligned allocation.
//!
//! Both legacy aligned-allocation entry points validate their alignment with
//! [`Alignment::new`] and then make a single call to an [`AlignedAllocator`].
//! How a failure is reported to C callers is left to the adapters in
//! `crate::libc::malloc`.

use crate::{Error, Result};
use std::ffi::c_void;
use std::ptr::NonNull;

/// An alignment that is a power of two and at least pointer-sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alignment(usize);

impl Alignment {
    pub fn new(alignment: usize) -> Result<Self> {
        if alignment < size_of::<*const c_void>() || !alignment.is_power_of_two() {
            return Err(Error::InvalidArgument);
        }
        Ok(Self(alignment))
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Round `size` up to the next multiple of the alignment.
    pub fn round_up(self, size: usize) -> Result<usize> {
        let mask = self.0 - 1;
        size.checked_add(mask)
            .map(|padded| padded & !mask)
            .ok_or(Error::OutOfMemory)
    }
}

/// The one primitive the aligned-allocation entry points delegate to.
pub trait AlignedAllocator {
    /// Allocate `size` bytes aligned to `alignment`, or `None` on exhaustion.
    fn allocate(&self, alignment: Alignment, size: usize) -> Option<NonNull<c_void>>;
}

unsafe extern "C" {
    fn aligned_alloc(alignment: libc::size_t, size: libc::size_t) -> *mut c_void;
}

/// Delegates to the C library's `aligned_alloc`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemAllocator;

impl AlignedAllocator for SystemAllocator {
    fn allocate(&self, alignment: Alignment, size: usize) -> Option<NonNull<c_void>> {
        // SAFETY: the alignment is a valid power of two; aligned_alloc has no
        // other preconditions and reports failure with null.
        NonNull::new(unsafe { aligned_alloc(alignment.get(), size) })
    }
}
