//! Rate limiter implementations.
//!
//! - `QuotaRateLimiter` - governor-backed quota (the production default)
//! - `IntervalGate` - fixed spacing between requests on the tokio clock
//! - `Unlimited` - never waits

pub mod interval;
pub mod quota;

pub use interval::IntervalGate;
pub use quota::{QuotaRateLimiter, DEFAULT_COOLDOWN};

use async_trait::async_trait;

use crate::traits::limiter::RateLimiter;

/// A limiter that never waits. For tests and offline replays.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unlimited;

#[async_trait]
impl RateLimiter for Unlimited {
    async fn until_ready(&self) {}
}
