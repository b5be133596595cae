//! Monotonic ULID generation.
//!
//! IDs minted within the same millisecond increment the random component of
//! the previous ID by a fixed step; a new millisecond draws fresh randomness.
//! Each thread owns its own generator, so generation never contends across
//! threads.
//!
//! Time comes from a [`MonotonicClock`], so wall-clock adjustments never
//! stall generation. If the state is still ahead of the clock anyway (e.g. a
//! generator resumed with [`MonoUlidGenerator::from_components`]), IDs keep
//! the last timestamp and increment.
//!
//! In rare cases where the generator saturates within the same millisecond
//! (monotonic overflow), it waits using the configured [`Backoff`] strategy.
//! These overflows typically resolve within ~1ms.
//!
//! # Example
//! ```rust
//! use kindid::{ulid_mono, Backoff};
//!
//! let a = ulid_mono(Backoff::Yield);
//! let b = ulid_mono(Backoff::Yield);
//! assert!(a < b);
//! ```

use crate::Ulid;
use core::{cell::Cell, cmp::Ordering};
use rand::{Rng, rng};
use std::{
    sync::LazyLock,
    time::{Instant, SystemTime, UNIX_EPOCH},
};
#[cfg(feature = "tracing")]
use tracing::instrument;

/// Increment used by the thread-local generator.
///
/// Steps over the low 16 bits so that IDs minted in the same millisecond stay
/// distinct and ordered after [`crate::KindId`] overwrites those bits with a
/// kind suffix.
pub const SUFFIX_STEP: u128 = 1 << 16;

/// A source of the current time in milliseconds since the Unix epoch.
///
/// Pluggable so tests can drive the generator with a mocked clock.
pub trait TimeSource<T> {
    /// Returns the current time in milliseconds since the Unix epoch.
    fn current_millis(&self) -> T;
}

/// A source of random integers.
pub trait RandSource<T> {
    /// Returns a random integer.
    fn rand(&self) -> T;
}

/// A [`TimeSource`] that never goes backward.
///
/// The wall clock is read once, at construction, to find the offset from the
/// Unix epoch. After that, time advances with [`Instant`], so NTP steps or a
/// resumed VM do not move it.
///
/// A wall clock before the Unix epoch gives an offset of `0`.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    start: Instant,
    epoch_offset: u128, // in milliseconds
}

static GLOBAL_MONOTONIC_CLOCK: LazyLock<MonotonicClock> = LazyLock::new(MonotonicClock::new);

impl MonotonicClock {
    /// Anchors a new clock to the current wall-clock time.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            epoch_offset: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |d| d.as_millis()),
        }
    }

    /// The process-wide clock. Every thread-local generator reads this one,
    /// so all threads share a single anchor.
    #[must_use]
    pub fn global() -> Self {
        *GLOBAL_MONOTONIC_CLOCK
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::global()
    }
}

impl TimeSource<u128> for MonotonicClock {
    fn current_millis(&self) -> u128 {
        self.epoch_offset + self.start.elapsed().as_millis()
    }
}

/// A [`RandSource`] that uses the thread-local RNG (`rand::rng()`).
///
/// This RNG is cryptographically secure and automatically reseeded
/// periodically. The type stores nothing, so it is freely shareable.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource<u128> for ThreadRandom {
    fn rand(&self) -> u128 {
        rng().random()
    }
}

/// Outcome of a single generation attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdGenStatus {
    /// A new ID is available.
    Ready { id: Ulid },
    /// Retry after roughly `yield_for` milliseconds.
    Pending { yield_for: u128 },
}

/// A single-threaded monotonic ULID generator.
///
/// Not `Sync`; use one per thread (see [`ulid_mono`]).
pub struct MonoUlidGenerator<T = MonotonicClock, R = ThreadRandom>
where
    T: TimeSource<u128>,
    R: RandSource<u128>,
{
    state: Cell<Ulid>,
    step: u128,
    time: T,
    rng: R,
}

impl<T, R> MonoUlidGenerator<T, R>
where
    T: TimeSource<u128>,
    R: RandSource<u128>,
{
    /// Creates a generator starting from the zero ULID.
    pub fn new(time: T, rng: R) -> Self {
        Self::from_components(0, 0, time, rng)
    }

    /// Creates a generator preloaded with explicit state, e.g. to resume after
    /// a restart.
    pub fn from_components(timestamp: u128, random: u128, time: T, rng: R) -> Self {
        Self {
            state: Cell::new(Ulid::from_components(timestamp, random)),
            step: 1,
            time,
            rng,
        }
    }

    /// Sets the amount added to the random part for each ID within one
    /// millisecond. Clamped to at least 1.
    #[must_use]
    pub fn with_step(mut self, step: u128) -> Self {
        self.step = step.clamp(1, Ulid::max_random());
        self
    }

    /// Attempts to produce the next ID.
    ///
    /// - same millisecond with room left: the random part grows by the step
    /// - newer millisecond: fresh randomness
    /// - clock behind the last ID: the last timestamp is kept and the random
    ///   part grows by the step
    /// - random part exhausted: `Pending` until the clock passes the last
    ///   timestamp
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id(&self) -> IdGenStatus {
        let now = self.time.current_millis() & Ulid::max_timestamp();
        let state = self.state.get();
        let current_ts = state.timestamp();

        match now.cmp(&current_ts) {
            Ordering::Greater => {
                let updated = Ulid::from_components(now, self.rng.rand());
                self.state.set(updated);
                IdGenStatus::Ready { id: updated }
            }
            Ordering::Equal | Ordering::Less => {
                if now < current_ts {
                    Self::cold_clock_behind(now, current_ts);
                }
                if state.has_random_room(self.step) {
                    let updated = state.increment_random(self.step);
                    self.state.set(updated);
                    IdGenStatus::Ready { id: updated }
                } else {
                    IdGenStatus::Pending {
                        yield_for: current_ts - now + 1,
                    }
                }
            }
        }
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(_now: u128, _current_ts: u128) {
        #[cfg(feature = "tracing")]
        tracing::trace!(
            now = _now,
            current_ts = _current_ts,
            "clock behind last issued id"
        );
    }
}

thread_local! {
    static MONO_ULID: MonoUlidGenerator =
        MonoUlidGenerator::new(MonotonicClock::global(), ThreadRandom).with_step(SUFFIX_STEP);
}

/// Backoff strategies for handling monotonic ULID overflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Backoff {
    /// Busy-waits in a tight loop.
    Spin,
    /// Yields to the OS scheduler.
    #[default]
    Yield,
    /// Sleeps for the requested delay in milliseconds.
    Sleep,
}

/// Generates a ULID from the thread-local generator using `strategy` to wait
/// out overflow.
pub fn ulid_mono(strategy: Backoff) -> Ulid {
    ulid_mono_with_backoff(|yield_for| match strategy {
        Backoff::Spin => core::hint::spin_loop(),
        Backoff::Yield => std::thread::yield_now(),
        Backoff::Sleep => std::thread::sleep(core::time::Duration::from_millis(
            u64::try_from(yield_for).unwrap_or(1),
        )),
    })
}

/// Generates a ULID from the thread-local generator, calling `f` with the
/// recommended wait in milliseconds whenever it must retry.
pub fn ulid_mono_with_backoff(f: impl Fn(u128)) -> Ulid {
    MONO_ULID.with(|g| {
        loop {
            match g.next_id() {
                IdGenStatus::Ready { id } => break id,
                IdGenStatus::Pending { yield_for } => f(yield_for),
            }
        }
    })
}
