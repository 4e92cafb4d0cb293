//! Clock and random implementations.

use crate::infrastructure::ports::{ClockPort, RandomPort};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// System clock - uses real time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// System random - uses real randomness.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRandom;

impl RandomPort for SystemRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        use rand::Rng;
        if min >= max {
            return min;
        }
        rand::thread_rng().gen_range(min..=max)
    }

    fn gen_uuid(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Random source that replays a fixed sequence, cycling when exhausted.
#[cfg(test)]
pub struct SequenceRandom {
    values: Vec<i32>,
    next: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl SequenceRandom {
    pub fn new(values: Vec<i32>) -> Self {
        Self {
            values,
            next: std::sync::atomic::AtomicUsize::new(0),
        }
    }
}

#[cfg(test)]
impl RandomPort for SequenceRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        let i = self
            .next
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        let value = self.values.get(i % self.values.len().max(1)).copied().unwrap_or(min);
        value.clamp(min, max)
    }

    fn gen_uuid(&self) -> Uuid {
        Uuid::nil()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_random_stays_in_range() {
        let random = SystemRandom;
        for _ in 0..200 {
            let value = random.gen_range(1, 6);
            assert!((1..=6).contains(&value));
        }
    }

    #[test]
    fn system_random_handles_single_value_range() {
        assert_eq!(SystemRandom.gen_range(4, 4), 4);
    }

    #[test]
    fn sequence_random_cycles() {
        let random = SequenceRandom::new(vec![2, 5]);
        assert_eq!(random.gen_range(1, 6), 2);
        assert_eq!(random.gen_range(1, 6), 5);
        assert_eq!(random.gen_range(1, 6), 2);
    }
}
