//! Quota-based rate limiting using the governor crate.

use async_trait::async_trait;
use governor::{Quota, RateLimiter as Governor};
use nonzero_ext::nonzero;
use std::num::NonZeroU32;
use std::time::Duration;

use crate::traits::limiter::RateLimiter;

/// Spacing the JSearch free tier tolerates between searches.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(35);

type DirectLimiter = Governor<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Limits outgoing requests to a governor quota.
///
/// The default quota admits one request per [`DEFAULT_COOLDOWN`]. The first
/// request goes out immediately; each later one waits for the next cell.
pub struct QuotaRateLimiter {
    limiter: DirectLimiter,
}

impl Default for QuotaRateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN)
    }
}

impl QuotaRateLimiter {
    /// One request per `period`. A zero period disables limiting.
    pub fn new(period: Duration) -> Self {
        let quota = Quota::with_period(period).unwrap_or_else(|| Quota::per_second(NonZeroU32::MAX));
        Self::with_quota(quota)
    }

    /// Sustained rate of `requests_per_second` (minimum 1).
    pub fn per_second(requests_per_second: u32) -> Self {
        let rate = NonZeroU32::new(requests_per_second).unwrap_or(nonzero!(1u32));
        Self::with_quota(Quota::per_second(rate))
    }

    /// Create with a custom quota (bursts, per-minute rates).
    pub fn with_quota(quota: Quota) -> Self {
        Self {
            limiter: Governor::direct(quota),
        }
    }
}

#[async_trait]
impl RateLimiter for QuotaRateLimiter {
    async fn until_ready(&self) {
        self.limiter.until_ready().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_quota_spacing() {
        // 2 requests per second
        let limiter = QuotaRateLimiter::per_second(2);

        let start = Instant::now();
        for _ in 0..3 {
            limiter.until_ready().await;
        }
        let elapsed = start.elapsed();

        // First is immediate, 2nd and 3rd wait
        assert!(elapsed.as_millis() >= 500, "Rate limiting not working: {:?}", elapsed);
    }

    #[tokio::test]
    async fn test_first_request_is_immediate() {
        let limiter = QuotaRateLimiter::default();

        let start = Instant::now();
        limiter.until_ready().await;
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_zero_period_does_not_block() {
        let limiter = QuotaRateLimiter::new(Duration::ZERO);

        let start = Instant::now();
        for _ in 0..5 {
            limiter.until_ready().await;
        }
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
