//! Deterministic entropy generation.
//!
//! Entropy requests are served by mixing a raw counter reading with a
//! linear-congruential state that advances once per 8-byte chunk. Nothing here
//! touches an OS entropy source.
//!
//! The default mixer, [`RacyLcg`], updates its state with a separate load and
//! store. Concurrent callers can interleave those and lose or repeat steps, so
//! the sequence is only reproducible for callers that serialize their requests.
//! [`LockedLcg`] performs the update atomically and can be swapped in through
//! the [`Mixer`] trait.

use crate::{Error, Result};
use std::sync::atomic::{AtomicU64, Ordering};

/// Largest request a single fill accepts, in bytes.
pub const MAX_ENTROPY_LEN: usize = 256;

/// Initial mixing state.
pub const LCG_SEED: u64 = 0x123456789abcdef0;

const LCG_MULTIPLIER: u64 = 6364136223846793005;
const LCG_INCREMENT: u64 = 1442695040888963407;

fn lcg_step(state: u64) -> u64 {
    state
        .wrapping_mul(LCG_MULTIPLIER)
        .wrapping_add(LCG_INCREMENT)
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
static FALLBACK_TICKS: AtomicU64 = AtomicU64::new(0);

/// Something that yields a raw 64-bit reading per chunk.
pub trait RawEntropySource: Sync {
    fn read(&self) -> u64;
}

/// The hardware cycle counter.
///
/// Uses `rdtsc` on x86-64 and the virtual counter on AArch64. Other targets
/// fall back to a counter private to this module, so entropy requests never
/// move the logical clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct CycleCounter;

impl RawEntropySource for CycleCounter {
    #[cfg(target_arch = "x86_64")]
    fn read(&self) -> u64 {
        // SAFETY: rdtsc is unprivileged and available on every x86-64 CPU.
        unsafe { core::arch::x86_64::_rdtsc() }
    }

    #[cfg(target_arch = "aarch64")]
    fn read(&self) -> u64 {
        let ticks: u64;
        // SAFETY: cntvct_el0 is readable from EL0 on Linux and macOS.
        unsafe {
            core::arch::asm!("mrs {}, cntvct_el0", out(reg) ticks, options(nomem, nostack));
        }
        ticks
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    fn read(&self) -> u64 {
        FALLBACK_TICKS.fetch_add(1, Ordering::Relaxed)
    }
}

/// Evolving state combined with each raw reading.
pub trait Mixer: Sync {
    /// Advance the state by one step and return the new state.
    fn advance(&self) -> u64;
}

/// LCG state updated with a plain read-modify-write.
///
/// Concurrent `advance` calls may observe the same state and store the same
/// successor. The atomics only keep that race well-defined.
#[derive(Debug)]
pub struct RacyLcg {
    state: AtomicU64,
}

impl RacyLcg {
    pub const fn new(seed: u64) -> Self {
        Self {
            state: AtomicU64::new(seed),
        }
    }
}

impl Mixer for RacyLcg {
    fn advance(&self) -> u64 {
        let next = lcg_step(self.state.load(Ordering::Relaxed));
        self.state.store(next, Ordering::Relaxed);
        next
    }
}

/// LCG state updated with compare-and-swap; every step is taken exactly once.
#[derive(Debug)]
pub struct LockedLcg {
    state: AtomicU64,
}

impl LockedLcg {
    pub const fn new(seed: u64) -> Self {
        Self {
            state: AtomicU64::new(seed),
        }
    }
}

impl Mixer for LockedLcg {
    fn advance(&self) -> u64 {
        loop {
            let state = self.state.load(Ordering::Relaxed);
            let next = lcg_step(state);
            if self
                .state
                .compare_exchange_weak(state, next, Ordering::Relaxed, Ordering::Relaxed)
                .is_ok()
            {
                return next;
            }
        }
    }
}

/// A raw source paired with a mixer.
pub struct EntropyPool<S, M> {
    source: S,
    mixer: M,
}

impl<S: RawEntropySource, M: Mixer> EntropyPool<S, M> {
    pub const fn new(source: S, mixer: M) -> Self {
        Self { source, mixer }
    }

    /// Fill `buf` with pseudo-random bytes.
    ///
    /// Fails with [`Error::InvalidArgument`] without touching `buf` when it is
    /// longer than [`MAX_ENTROPY_LEN`].
    pub fn fill(&self, buf: &mut [u8]) -> Result<()> {
        if buf.len() > MAX_ENTROPY_LEN {
            return Err(Error::InvalidArgument);
        }
        for chunk in buf.chunks_mut(8) {
            let raw = self.source.read();
            let word = (raw ^ self.mixer.advance()).to_ne_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
        Ok(())
    }
}

/// The pool type backing `getentropy`.
pub type DefaultPool = EntropyPool<CycleCounter, RacyLcg>;

static POOL: DefaultPool = EntropyPool::new(CycleCounter, RacyLcg::new(LCG_SEED));

/// The process-wide entropy pool.
pub fn global() -> &'static DefaultPool {
    &POOL
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    struct Zero;

    impl RawEntropySource for Zero {
        fn read(&self) -> u64 {
            0
        }
    }

    fn lcg_bytes(n: usize) -> Vec<u8> {
        let mut state = LCG_SEED;
        let mut out = Vec::new();
        while out.len() < n {
            state = lcg_step(state);
            out.extend_from_slice(&state.to_ne_bytes());
        }
        out.truncate(n);
        out
    }

    #[test]
    fn zero_source_yields_the_lcg_stream() {
        let pool = EntropyPool::new(Zero, RacyLcg::new(LCG_SEED));
        let mut buf = [0u8; 20];
        pool.fill(&mut buf).unwrap();
        assert_eq!(buf.to_vec(), lcg_bytes(20));
    }

    #[test]
    fn partial_chunk_consumes_one_step() {
        let pool = EntropyPool::new(Zero, RacyLcg::new(LCG_SEED));
        let mut first = [0u8; 3];
        pool.fill(&mut first).unwrap();
        let mut second = [0u8; 8];
        pool.fill(&mut second).unwrap();
        assert_eq!(first.to_vec(), lcg_bytes(3));
        assert_eq!(second.to_vec(), lcg_bytes(16)[8..].to_vec());
    }

    #[test]
    fn every_length_up_to_the_cap_is_filled() {
        let pool = EntropyPool::new(Zero, LockedLcg::new(LCG_SEED));
        for len in 0..=MAX_ENTROPY_LEN {
            let mut buf = vec![0u8; len];
            assert_eq!(pool.fill(&mut buf), Ok(()));
        }
        let mut full = [0u8; MAX_ENTROPY_LEN];
        pool.fill(&mut full).unwrap();
        assert!(full.iter().any(|&b| b != 0));
    }

    #[test]
    fn oversized_request_writes_nothing() {
        let pool = EntropyPool::new(Zero, RacyLcg::new(LCG_SEED));
        let mut buf = [0xAAu8; MAX_ENTROPY_LEN + 1];
        assert_eq!(pool.fill(&mut buf), Err(Error::InvalidArgument));
        assert!(buf.iter().all(|&b| b == 0xAA));
    }

    #[test]
    fn locked_mixer_never_repeats_a_step_under_contention() {
        const THREADS: usize = 4;
        const STEPS: usize = 1000;

        let mixer = Arc::new(LockedLcg::new(LCG_SEED));
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let mixer = Arc::clone(&mixer);
                thread::spawn(move || (0..STEPS).map(|_| mixer.advance()).collect::<Vec<_>>())
            })
            .collect();
        let mut all: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), THREADS * STEPS);
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    #[test]
    fn fallback_counter_is_private_to_entropy() {
        let first = CycleCounter.read();
        let second = CycleCounter.read();
        assert!(second > first);
        // Logical clock readings start at the baseline.
        assert!(second < crate::runtime::clock::BASELINE_MICROS);
    }
}
