//! Deterministic logical clock for reproducible execution.
//!
//! This module provides a process-wide logical time counter that advances by a
//! fixed step on every observation rather than with wall-clock time. All time
//! queries in Tessera read this counter, so two runs that make the same calls
//! in the same order observe the same times.
//!
//! The counter is seeded lazily with a fixed baseline the first time any
//! thread observes it. Every observation is a single atomic fetch-and-add, which
//! totally orders observations across threads: no two calls ever see the same
//! raw value.

use crate::{Error, Result};
use std::sync::Once;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Counter value after seeding: one hour of logical microseconds.
pub const BASELINE_MICROS: u64 = 3600 * 1_000_000;

/// Logical microseconds consumed by every observation.
pub const INCREMENT_MICROS: u64 = 1000;

/// Seconds added to real-time readings (2021-01-01 00:00:00 UTC).
pub const REALTIME_EPOCH_SECS: u64 = 1_609_459_200;

/// Reported resolution of both supported clocks.
pub const RESOLUTION: Duration = Duration::from_nanos(1000);

/// Clock kinds the logical clock can answer for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockKind {
    /// Logical time offset by [`REALTIME_EPOCH_SECS`].
    Realtime,
    /// Logical time since the counter started at zero.
    Monotonic,
}

impl TryFrom<libc::clockid_t> for ClockKind {
    type Error = Error;

    fn try_from(clock_id: libc::clockid_t) -> Result<Self> {
        match clock_id {
            libc::CLOCK_REALTIME => Ok(ClockKind::Realtime),
            libc::CLOCK_MONOTONIC => Ok(ClockKind::Monotonic),
            _ => Err(Error::InvalidArgument),
        }
    }
}

impl ClockKind {
    /// Interpret a raw counter value as a reading of this clock.
    pub fn reading(self, micros: u64) -> Duration {
        let elapsed = Duration::from_micros(micros);
        match self {
            ClockKind::Realtime => Duration::from_secs(REALTIME_EPOCH_SECS) + elapsed,
            ClockKind::Monotonic => elapsed,
        }
    }
}

/// A logical time counter in microseconds.
///
/// The process shares one instance, [`global()`]; tests and embedders can
/// build isolated ones with [`ClockBuilder`].
pub struct LogicalClock {
    counter: AtomicU64,
    seeded: Once,
    baseline: u64,
    increment: u64,
}

impl LogicalClock {
    /// A clock seeded with [`BASELINE_MICROS`] advancing by [`INCREMENT_MICROS`].
    pub const fn new() -> Self {
        Self::with_params(BASELINE_MICROS, INCREMENT_MICROS)
    }

    const fn with_params(baseline: u64, increment: u64) -> Self {
        Self {
            counter: AtomicU64::new(0),
            seeded: Once::new(),
            baseline,
            increment,
        }
    }

    /// Seed the counter with the baseline unless some thread already has.
    ///
    /// Exactly one caller runs the seeding; everyone returning from here
    /// observes the seeded value.
    pub fn ensure_initialized(&self) {
        // Nothing in here may log: subscribers timestamp events by reading the
        // clock, and re-entering `call_once` deadlocks.
        self.seeded
            .call_once(|| self.counter.store(self.baseline, Ordering::Relaxed));
    }

    /// Advance the counter and return its value before the increment.
    pub fn observe(&self) -> u64 {
        self.ensure_initialized();
        self.counter.fetch_add(self.increment, Ordering::AcqRel)
    }

    /// Read the clock once.
    pub fn now(&self, kind: ClockKind) -> Duration {
        kind.reading(self.observe())
    }

    /// Read the clock once for a C clock id.
    ///
    /// The counter advances before the id is checked, so an unsupported id
    /// still consumes one observation.
    pub fn read(&self, clock_id: libc::clockid_t) -> Result<Duration> {
        let micros = self.observe();
        ClockKind::try_from(clock_id).map(|kind| kind.reading(micros))
    }

    /// Resolution of `kind`. Constant, does not advance the counter.
    pub fn resolution(&self, _kind: ClockKind) -> Duration {
        RESOLUTION
    }

    /// Step added by each observation.
    pub fn increment(&self) -> u64 {
        self.increment
    }
}

impl Default for LogicalClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`LogicalClock`] instances with non-default parameters.
pub struct ClockBuilder {
    baseline: u64,
    increment: u64,
}

impl Default for ClockBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockBuilder {
    pub fn new() -> Self {
        Self {
            baseline: BASELINE_MICROS,
            increment: INCREMENT_MICROS,
        }
    }

    /// Set the value the counter is seeded with.
    pub fn baseline(mut self, micros: u64) -> Self {
        self.baseline = micros;
        self
    }

    /// Set the step added per observation. Must be non-zero.
    pub fn increment(mut self, micros: u64) -> Self {
        self.increment = micros;
        self
    }

    pub fn build(self) -> Result<LogicalClock> {
        if self.increment == 0 {
            return Err(Error::InvalidArgument);
        }
        Ok(LogicalClock::with_params(self.baseline, self.increment))
    }
}

static CLOCK: LogicalClock = LogicalClock::new();

/// The process-wide logical clock.
pub fn global() -> &'static LogicalClock {
    &CLOCK
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn first_observation_is_the_baseline() {
        let clock = LogicalClock::new();
        assert_eq!(clock.observe(), BASELINE_MICROS);
        assert_eq!(clock.observe(), BASELINE_MICROS + INCREMENT_MICROS);
    }

    #[test]
    fn observations_advance_by_a_constant_step() {
        let clock = ClockBuilder::new().baseline(0).increment(7).build().unwrap();
        let values: Vec<u64> = (0..100).map(|_| clock.observe()).collect();
        for pair in values.windows(2) {
            assert_eq!(pair[1] - pair[0], 7);
        }
    }

    #[test]
    fn zero_increment_is_rejected() {
        assert_eq!(
            ClockBuilder::new().increment(0).build().err(),
            Some(Error::InvalidArgument)
        );
    }

    #[test]
    fn concurrent_seeding_happens_once() {
        const THREADS: usize = 8;
        const PER_THREAD: usize = 500;

        let clock = Arc::new(LogicalClock::new());
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let clock = Arc::clone(&clock);
                thread::spawn(move || (0..PER_THREAD).map(|_| clock.observe()).collect::<Vec<_>>())
            })
            .collect();

        let mut all: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        all.sort_unstable();

        // Unique values forming one contiguous run from the baseline means
        // the seed was applied once and nothing was lost or duplicated.
        let expected: Vec<u64> = (0..(THREADS * PER_THREAD) as u64)
            .map(|i| BASELINE_MICROS + i * INCREMENT_MICROS)
            .collect();
        assert_eq!(all, expected);
    }

    #[test]
    fn realtime_is_offset_by_the_epoch() {
        let clock = LogicalClock::new();
        let t = clock.now(ClockKind::Realtime);
        assert_eq!(t.as_secs(), REALTIME_EPOCH_SECS + 3600);
        assert_eq!(t.subsec_nanos(), 0);

        let t = clock.now(ClockKind::Realtime);
        assert_eq!(t.subsec_micros(), 1000);
    }

    #[test]
    fn monotonic_has_no_offset() {
        let clock = ClockBuilder::new().baseline(2_500_000).build().unwrap();
        let t = clock.now(ClockKind::Monotonic);
        assert_eq!(t.as_secs(), 2);
        assert_eq!(t.subsec_nanos(), 500_000_000);
    }

    #[test]
    fn unsupported_clock_still_advances() {
        let clock = LogicalClock::new();
        let before = clock.read(libc::CLOCK_MONOTONIC).unwrap();
        assert_eq!(clock.read(libc::CLOCK_PROCESS_CPUTIME_ID), Err(Error::InvalidArgument));
        let after = clock.read(libc::CLOCK_MONOTONIC).unwrap();
        assert_eq!(after - before, Duration::from_micros(2 * INCREMENT_MICROS));
    }

    #[test]
    fn read_matches_now() {
        let a = LogicalClock::new();
        let b = LogicalClock::new();
        assert_eq!(a.read(libc::CLOCK_REALTIME), Ok(b.now(ClockKind::Realtime)));
        assert_eq!(a.read(libc::CLOCK_MONOTONIC), Ok(b.now(ClockKind::Monotonic)));
    }

    #[test]
    fn clock_ids() {
        assert_eq!(ClockKind::try_from(libc::CLOCK_REALTIME), Ok(ClockKind::Realtime));
        assert_eq!(ClockKind::try_from(libc::CLOCK_MONOTONIC), Ok(ClockKind::Monotonic));
        assert_eq!(
            ClockKind::try_from(libc::CLOCK_PROCESS_CPUTIME_ID),
            Err(Error::InvalidArgument)
        );
    }

    #[test]
    fn resolution_does_not_advance() {
        let clock = LogicalClock::new();
        assert_eq!(clock.resolution(ClockKind::Realtime), Duration::from_nanos(1000));
        assert_eq!(clock.resolution(ClockKind::Monotonic), Duration::from_nanos(1000));
        assert_eq!(clock.observe(), BASELINE_MICROS);
    }
}
