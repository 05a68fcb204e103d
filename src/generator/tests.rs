use super::*;
use crate::Variant;

/// Deterministic splitmix-style random source.
struct TestRand(u64);

impl RandSource for TestRand {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9e3779b97f4a7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
        z ^ (z >> 31)
    }
}

/// Clock that never moves; for driving generate_core directly.
struct FrozenClock;

impl TimeSource for FrozenClock {
    fn unix_ts_ms(&mut self) -> u64 {
        unreachable!("generate_core takes the timestamp as an argument")
    }
}

/// Clock that only moves when the generator pauses.
struct SteppingClock {
    now_ms: u64,
    pauses: u32,
}

impl TimeSource for SteppingClock {
    fn unix_ts_ms(&mut self) -> u64 {
        self.now_ms
    }

    fn pause(&mut self) {
        self.pauses += 1;
        self.now_ms += 1;
    }
}

fn new_generator() -> V7Generator<TestRand, FrozenClock> {
    V7Generator::with_rand_and_time_sources(TestRand(42), FrozenClock)
}

/// Generates increasing identifiers even with decreasing or constant timestamp
#[test]
fn generates_increasing_identifiers_even_with_decreasing_or_constant_timestamp() {
    let ts = 0x0123_4567_89abu64;
    let mut g = new_generator();
    let mut prev = g.generate_core(ts).unwrap();
    assert_eq!(prev.unix_ts_ms(), ts);
    for i in 0..500u64 {
        let curr = g.generate_core(ts - i.min(4_000)).unwrap();
        assert!(prev < curr);
        assert!(prev.unix_ts_ms() <= curr.unix_ts_ms());
        prev = curr;
    }
    assert_eq!(prev.unix_ts_ms(), ts);
}

/// Clamps the timestamp when the clock rolls back
#[test]
fn clamps_the_timestamp_when_the_clock_rolls_back() {
    let mut g = new_generator();
    let a = g.generate_core(1_000).unwrap();
    let b = g.generate_core(990).unwrap();
    let c = g.generate_core(500).unwrap();
    assert_eq!(a.unix_ts_ms(), 1_000);
    assert_eq!(b.unix_ts_ms(), 1_000);
    assert_eq!(c.unix_ts_ms(), 1_000);
    assert!(a < b && b < c);

    let d = g.generate_core(1_001).unwrap();
    assert_eq!(d.unix_ts_ms(), 1_001);
    assert!(c < d);
}

/// Keeps the counter in the low bits of field B
#[test]
fn keeps_the_counter_in_the_low_bits_of_field_b() {
    let ts = 0x0123_4567_89abu64;
    let mut g = new_generator();
    let a = g.generate_core(ts).unwrap();
    let b = g.generate_core(ts).unwrap();

    assert_eq!(a.version(), 7);
    assert_eq!(a.variant(), Variant::Var10);
    assert_eq!(a.rand_b() & 0xffff_ffff, 0);
    assert_eq!(b.rand_b(), a.rand_b() + 1);
    assert_eq!(b.rand_a(), a.rand_a());
}

/// Refuses to wrap the counter within one millisecond
#[test]
fn refuses_to_wrap_the_counter_within_one_millisecond() {
    let ts = 0x0123_4567_89abu64;
    let mut g = new_generator();
    g.generate_core(ts).unwrap();

    g.counter = u32::MAX - 1;
    let last = g.generate_core(ts).unwrap();
    assert_eq!(last.rand_b() & 0xffff_ffff, u32::MAX as u64);

    assert!(g.generate_core(ts).is_none());
    assert!(g.generate_core(ts - 1).is_none());

    let rolled = g.generate_core(ts + 1).unwrap();
    assert_eq!(rolled.unix_ts_ms(), ts + 1);
    assert_eq!(rolled.rand_b() & 0xffff_ffff, 0);
    assert!(last < rolled);
}

/// Stalls until the clock advances when the millisecond is exhausted
#[test]
fn stalls_until_the_clock_advances_when_the_millisecond_is_exhausted() {
    let clock = SteppingClock {
        now_ms: 5_000,
        pauses: 0,
    };
    let mut g = V7Generator::with_rand_and_time_sources(TestRand(7), clock);

    let first = g.generate();
    assert_eq!(first.unix_ts_ms(), 5_000);
    assert_eq!(g.time.pauses, 0);

    g.counter = u32::MAX;
    let second = g.generate();
    assert_eq!(second.unix_ts_ms(), 5_001);
    assert_eq!(g.time.pauses, 1);
    assert_eq!(second.rand_b() & 0xffff_ffff, 0);
    assert!(first < second);
}

/// Generates a strictly increasing run under a jittery clock
#[test]
fn generates_a_strictly_increasing_run_under_a_jittery_clock() {
    /// Clock that creeps forward but occasionally reports a stale reading.
    struct JitteryClock {
        now_ms: u64,
        calls: u32,
    }

    impl TimeSource for JitteryClock {
        fn unix_ts_ms(&mut self) -> u64 {
            self.calls += 1;
            match self.calls % 4 {
                0 => self.now_ms += 1,
                3 => return self.now_ms.saturating_sub(10),
                _ => {}
            }
            self.now_ms
        }
    }

    let clock = JitteryClock {
        now_ms: 1_000,
        calls: 0,
    };
    let mut g = V7Generator::with_rand_and_time_sources(TestRand(99), clock);
    let mut prev = g.generate();
    for _ in 0..500 {
        let curr = g.generate();
        assert!(prev < curr);
        assert!(prev.unix_ts_ms() <= curr.unix_ts_ms());
        prev = curr;
    }
}
