//! Fixed-interval gate on the tokio clock.

use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::traits::limiter::RateLimiter;

/// Lets one request through, then holds the gate shut for `interval`.
///
/// Runs on `tokio::time`, so tests can drive it with a paused clock.
pub struct IntervalGate {
    interval: Duration,
    next_open: Mutex<Option<Instant>>,
}

impl IntervalGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_open: Mutex::new(None),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

#[async_trait]
impl RateLimiter for IntervalGate {
    async fn until_ready(&self) {
        let mut next_open = self.next_open.lock().await;
        if let Some(at) = *next_open {
            tokio::time::sleep_until(at).await;
        }
        *next_open = Some(Instant::now() + self.interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_gate_spaces_requests() {
        let gate = IntervalGate::new(Duration::from_secs(35));
        let start = Instant::now();

        gate.until_ready().await;
        assert_eq!(start.elapsed(), Duration::ZERO);

        gate.until_ready().await;
        assert!(start.elapsed() >= Duration::from_secs(35));

        gate.until_ready().await;
        assert!(start.elapsed() >= Duration::from_secs(70));
    }

    #[tokio::test(start_paused = true)]
    async fn test_gate_does_not_wait_after_idle_period() {
        let gate = IntervalGate::new(Duration::from_secs(10));

        gate.until_ready().await;
        tokio::time::advance(Duration::from_secs(15)).await;

        let before = Instant::now();
        gate.until_ready().await;
        assert_eq!(before.elapsed(), Duration::ZERO);
    }
}
