//! Registry of the libc overrides.
//!
//! Every function declared with `#[tessera_symbol]` adds one entry here, keyed
//! by the C name it replaces. A guest loader resolves names through [`lookup`]
//! before falling back to the host's libc; the `tessera` binary lists them.

use linkme::distributed_slice;

/// Address of an exported `extern "C"` override.
///
/// Only ever built from function items by the attribute macro, so it always
/// points at immutable code.
#[derive(Clone, Copy)]
pub struct FnPtr(pub *const ());

// SAFETY: the pointee is code, never written after load.
unsafe impl Sync for FnPtr {}

/// `(C name, override)` pairs, e.g. `("clock_gettime", tessera_clock_gettime)`.
///
/// Names carry no platform prefix. The slice is filled at link time and is in
/// no particular order.
#[distributed_slice]
pub static TESSERA_SYMBOLS: [(&str, FnPtr)] = [..];

/// Address of the override for `symbol_name`, if Tessera replaces it.
pub fn lookup(symbol_name: &str) -> Option<u64> {
    TESSERA_SYMBOLS
        .iter()
        .find(|(name, _)| *name == symbol_name)
        .map(|(_, ptr)| ptr.0 as u64)
}

/// Names of all registered overrides, sorted.
pub fn names() -> Vec<&'static str> {
    let mut names: Vec<_> = TESSERA_SYMBOLS.iter().map(|(name, _)| *name).collect();
    names.sort_unstable();
    names
}
