//! A sliding-window rate limiter for client-side action throttling.
//!
//! The limiter is an explicitly-scoped object with an injected clock: the
//! caller owns the instance and passes `now` on every check, so tests can
//! drive time deterministically and nothing is process-global.

use std::collections::HashMap;

use time::{Duration, OffsetDateTime};

/// Counts attempts per action name within a sliding time window.
#[derive(Debug)]
pub struct RateLimiter {
    max_attempts: usize,
    window: Duration,
    attempts: HashMap<String, Vec<OffsetDateTime>>,
}

impl RateLimiter {
    /// A limiter allowing `max_attempts` per action within `window`.
    pub fn new(max_attempts: usize, window: Duration) -> Self {
        Self {
            max_attempts,
            window,
            attempts: HashMap::new(),
        }
    }

    /// Whether another attempt at `action` is allowed at `now`.
    ///
    /// Attempts older than the window are forgotten. An allowed attempt is
    /// recorded; a denied one is not, so a burst does not extend its own
    /// lockout.
    pub fn check(&mut self, action: &str, now: OffsetDateTime) -> bool {
        let attempts = self.attempts.entry(action.to_string()).or_default();
        attempts.retain(|timestamp| now - *timestamp < self.window);

        if attempts.len() >= self.max_attempts {
            tracing::debug!(action, attempts = attempts.len(), "rate limit exceeded");
            return false;
        }

        attempts.push(now);
        true
    }

    /// Forget all recorded attempts.
    pub fn reset(&mut self) {
        self.attempts.clear();
    }
}

#[cfg(test)]
mod rate_limit_tests {
    use time::{Duration, macros::datetime};

    use super::RateLimiter;

    const START: time::OffsetDateTime = datetime!(2026 - 08 - 26 12:00 UTC);

    #[test]
    fn allows_up_to_max_attempts() {
        let mut limiter = RateLimiter::new(3, Duration::minutes(1));

        assert!(limiter.check("login", START));
        assert!(limiter.check("login", START + Duration::seconds(1)));
        assert!(limiter.check("login", START + Duration::seconds(2)));
        assert!(!limiter.check("login", START + Duration::seconds(3)));
    }

    #[test]
    fn window_expiry_frees_attempts() {
        let mut limiter = RateLimiter::new(2, Duration::minutes(1));

        assert!(limiter.check("login", START));
        assert!(limiter.check("login", START + Duration::seconds(30)));
        assert!(!limiter.check("login", START + Duration::seconds(45)));

        // The first attempt has slid out of the window by now.
        assert!(limiter.check("login", START + Duration::seconds(61)));
    }

    #[test]
    fn actions_are_limited_independently() {
        let mut limiter = RateLimiter::new(1, Duration::minutes(1));

        assert!(limiter.check("login", START));
        assert!(limiter.check("export", START));
        assert!(!limiter.check("login", START));
    }

    #[test]
    fn denied_attempts_do_not_extend_the_lockout() {
        let mut limiter = RateLimiter::new(1, Duration::minutes(1));

        assert!(limiter.check("login", START));

        // Hammering while locked out must not push the window forward.
        for seconds in 1..60 {
            assert!(!limiter.check("login", START + Duration::seconds(seconds)));
        }

        assert!(limiter.check("login", START + Duration::seconds(61)));
    }

    #[test]
    fn reset_clears_all_state() {
        let mut limiter = RateLimiter::new(1, Duration::minutes(1));

        assert!(limiter.check("login", START));
        limiter.reset();
        assert!(limiter.check("login", START));
    }
}
