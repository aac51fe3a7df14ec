//! Testability ports for injecting time and randomness.

use chrono::{Local, NaiveDateTime};

/// Source of "now" for date-window checks.
///
/// Event dates carry no zone, so the clock yields local wall time.
pub trait ClockPort: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Source of template choices.
pub trait RandomPort: Send + Sync {
    /// Pick an index in `0..len`. `len` is never zero.
    fn pick(&self, len: usize) -> usize;
}

/// System clock - uses real local time.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// System random - uses the thread-local generator.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn pick(&self, len: usize) -> usize {
        use rand::Rng;
        rand::thread_rng().gen_range(0..len)
    }
}

/// Fixed clock for tests and one-shot CLI queries.
pub struct FixedClock(pub NaiveDateTime);

impl ClockPort for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Fixed random: always picks the same index, wrapped into range.
pub struct FixedRandom(pub usize);

impl RandomPort for FixedRandom {
    fn pick(&self, len: usize) -> usize {
        self.0 % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_random_wraps_into_range() {
        assert_eq!(FixedRandom(1).pick(3), 1);
        assert_eq!(FixedRandom(4).pick(3), 1);
    }

    #[test]
    fn system_random_stays_in_range() {
        let random = SystemRandom::new();
        for _ in 0..100 {
            assert!(random.pick(3) < 3);
        }
    }
}
