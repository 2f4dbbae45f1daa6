use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

/// Paces verification starts at a fixed interval shared by every worker.
///
/// Slots are handed out one `interval` apart. There is no burst capacity: a
/// caller arriving after its slot has passed is admitted immediately and the
/// next slot is scheduled from that moment, so idle time never accumulates
/// credit.
#[derive(Debug)]
pub struct RateLimiter {
    interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// `None` when `rate` is zero (unlimited).
    pub fn per_second(rate: u32) -> Option<Self> {
        if rate == 0 {
            return None;
        }
        Some(Self {
            interval: Duration::from_secs(1) / rate,
            next_slot: Mutex::new(None),
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Blocks until the caller's admission slot. The lock is only held while
    /// reserving the slot, never while sleeping.
    pub fn admit(&self) {
        let slot = {
            let mut next = self
                .next_slot
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let now = Instant::now();
            let slot = match *next {
                Some(reserved) if reserved > now => reserved,
                _ => now,
            };
            *next = Some(slot + self.interval);
            slot
        };

        let wait = slot.saturating_duration_since(Instant::now());
        if !wait.is_zero() {
            thread::sleep(wait);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rate_means_no_limiter() {
        assert!(RateLimiter::per_second(0).is_none());
    }

    #[test]
    fn interval_is_inverse_of_rate() {
        let limiter = RateLimiter::per_second(4).expect("limiter");
        assert_eq!(limiter.interval(), Duration::from_millis(250));
    }

    #[test]
    fn admissions_are_spaced_by_interval() {
        let limiter = RateLimiter::per_second(20).expect("limiter");
        let started = Instant::now();
        for _ in 0..5 {
            limiter.admit();
        }
        assert!(started.elapsed() >= Duration::from_millis(200));
    }

    #[test]
    fn late_caller_gets_no_burst_credit() {
        let limiter = RateLimiter::per_second(20).expect("limiter");
        limiter.admit();
        thread::sleep(Duration::from_millis(150));

        limiter.admit();
        let started = Instant::now();
        limiter.admit();
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn shared_limiter_paces_all_threads() {
        let limiter = RateLimiter::per_second(50).expect("limiter");
        let started = Instant::now();
        thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..3 {
                        limiter.admit();
                    }
                });
            }
        });
        // 12 admissions, 11 intervals of 20ms.
        assert!(started.elapsed() >= Duration::from_millis(220));
    }
}
