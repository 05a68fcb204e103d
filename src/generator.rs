//! Sortable-identifier generator and related types.

use crate::Uuid;

pub mod with_rand08;

#[cfg(test)]
mod tests;

/// A trait that defines the minimum random number generator interface for [`V7Generator`].
pub trait RandSource {
    /// Returns the next random `u32`.
    fn next_u32(&mut self) -> u32;

    /// Returns the next random `u64`.
    fn next_u64(&mut self) -> u64;
}

/// A trait that supplies the generator's millisecond clock.
///
/// Injecting the clock keeps the generator's state transition deterministic
/// under test; production code uses [`StdSystemTime`].
pub trait TimeSource {
    /// Returns the current Unix timestamp in milliseconds.
    fn unix_ts_ms(&mut self) -> u64;

    /// Parks the caller briefly between clock polls while [`V7Generator::generate`]
    /// waits out an exhausted millisecond. The default implementation returns
    /// immediately, which suits test clocks that advance on their own.
    fn pause(&mut self) {}
}

/// A [`TimeSource`] backed by the system clock. Its trait implementation
/// requires the `std` feature.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct StdSystemTime;

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl TimeSource for StdSystemTime {
    fn unix_ts_ms(&mut self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("clock may have gone backwards")
            .as_millis() as u64
    }

    fn pause(&mut self) {
        std::thread::sleep(std::time::Duration::from_micros(100));
    }
}

/// Represents a sortable-identifier generator that guarantees the strictly
/// increasing order of identifiers produced by one instance.
///
/// Each generated value packs the current millisecond timestamp, 42 random
/// bits drawn once per millisecond, and a 32-bit counter occupying the low
/// bits of field B. Within one millisecond only the counter moves, so
/// successive outputs compare strictly increasing as 16-byte big-endian
/// values. When the clock reports an earlier millisecond than the previous
/// call saw, the generator keeps the previous timestamp rather than regress;
/// when the counter space of a millisecond runs out, [`generate`] waits for
/// the next millisecond instead of wrapping.
///
/// A generator instance must not be shared between callers without external
/// mutual exclusion. The following example guarantees process-wide
/// (cross-thread) monotonicity using Rust's standard synchronization
/// mechanism.
///
/// # Examples
///
/// ```rust
/// use rand::rngs::OsRng;
/// use std::{sync, thread};
/// use uuid47::V7Generator;
///
/// let g = sync::Arc::new(sync::Mutex::new(V7Generator::with_rand08(OsRng)));
/// thread::scope(|s| {
///     for i in 0..4 {
///         let g = sync::Arc::clone(&g);
///         s.spawn(move || {
///             for _ in 0..8 {
///                 println!("{} by thread {}", g.lock().unwrap().generate(), i);
///                 thread::yield_now();
///             }
///         });
///     }
/// });
/// ```
///
/// [`generate`]: V7Generator::generate
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct V7Generator<R, T = StdSystemTime> {
    last_ms: u64,
    counter: u32,

    /// The 42 random bits above the counter, redrawn each millisecond.
    high_random: u64,

    rng: R,
    time: T,
}

impl<R: RandSource> V7Generator<R, StdSystemTime> {
    /// Creates a generator instance that reads the system clock.
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub const fn new(rng: R) -> Self {
        Self::with_rand_and_time_sources(rng, StdSystemTime)
    }
}

impl<R: RandSource, T: TimeSource> V7Generator<R, T> {
    const MAX_HIGH_RANDOM: u64 = (1 << 42) - 1;

    /// Creates a generator instance with the specified random number and
    /// clock sources.
    pub const fn with_rand_and_time_sources(rng: R, time: T) -> Self {
        Self {
            last_ms: 0,
            counter: 0,
            high_random: 0,
            rng,
            time,
        }
    }

    /// Generates a new sortable identifier, stalling in short pauses if the
    /// counter space of the current millisecond is exhausted.
    ///
    /// # Panics
    ///
    /// Panics if the clock source reports a timestamp beyond the 48-bit
    /// range.
    pub fn generate(&mut self) -> Uuid {
        loop {
            let now_ms = self.time.unix_ts_ms();
            if let Some(value) = self.generate_core(now_ms) {
                return value;
            }
            // over four billion identifiers in one millisecond; wait out the tick
            self.time.pause();
        }
    }

    /// Advances the generator state for the `unix_ts_ms` passed and returns
    /// the new identifier, or returns `None` if the counter space of the
    /// current millisecond is exhausted.
    ///
    /// `None` asks the caller to poll the clock until it moves past the
    /// previous millisecond and try again; [`generate`] does exactly that.
    /// A `unix_ts_ms` smaller than the one previously seen never rolls the
    /// output backward: the previous timestamp is reused until the clock
    /// catches up.
    ///
    /// # Panics
    ///
    /// Panics if `unix_ts_ms` is not a 48-bit integer.
    ///
    /// [`generate`]: V7Generator::generate
    pub fn generate_core(&mut self, unix_ts_ms: u64) -> Option<Uuid> {
        if unix_ts_ms > self.last_ms {
            self.last_ms = unix_ts_ms;
            self.counter = 0;
            self.high_random = self.rng.next_u64() & Self::MAX_HIGH_RANDOM;
        } else {
            // the same millisecond as the previous call, or an earlier one
            // (clock rollback); reuse last_ms and take the next counter value
            self.counter = self.counter.checked_add(1)?;
        }

        Some(Uuid::from_fields_v7(
            self.last_ms,
            (self.high_random >> 30) as u16,
            ((self.high_random & 0x3fff_ffff) << 32) | self.counter as u64,
        ))
    }
}

/// Supports operations as an infinite iterator that produces a new sortable
/// identifier for each call of `next()`.
///
/// # Examples
///
/// ```rust
/// use uuid47::V7Generator;
///
/// V7Generator::with_rand08(rand::thread_rng())
///     .enumerate()
///     .skip(4)
///     .take(4)
///     .for_each(|(i, e)| println!("[{}] {}", i, e));
/// ```
impl<R: RandSource, T: TimeSource> Iterator for V7Generator<R, T> {
    type Item = Uuid;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<R: RandSource, T: TimeSource> core::iter::FusedIterator for V7Generator<R, T> {}
