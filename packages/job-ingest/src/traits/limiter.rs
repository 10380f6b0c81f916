//! Rate limiter abstraction.
//!
//! Fetchers wait on a limiter before every network request. The limiter
//! is decoupled from fetch logic so the cooldown policy can be tuned, shared
//! across query keys, and tested with virtual time.

use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Resolve once the next request is allowed to go out.
    async fn until_ready(&self);
}

#[async_trait]
impl<T: RateLimiter + ?Sized> RateLimiter for Arc<T> {
    async fn until_ready(&self) {
        (**self).until_ready().await
    }
}
