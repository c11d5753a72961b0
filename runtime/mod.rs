//! Deterministic state behind the libc overrides.
//!
//! Each submodule owns one process-scoped singleton and exposes it through a
//! `global()` accessor, while the underlying types can also be instantiated
//! directly so tests get isolated state.
//!
//! - [`clock`] - Logical time counter shared by all time queries
//! - [`entropy`] - Pseudo-random byte generation from a raw counter and an LCG
//! - [`alloc`] - Alignment validation and the canonical aligned allocator
//! - [`timestamp`] - Always-zero timestamp backend for the script engine
//!
//! None of these depend on each other or share state.

pub mod alloc;
pub mod clock;
pub mod entropy;
pub mod timestamp;
