//! Testing utilities including mock implementations.
//!
//! These are useful for exercising fetchers and dataflows without making
//! real network calls.

use async_trait::async_trait;
use jsearch_client::{JSearchError, SearchResponse};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::traits::{api::ListingApi, limiter::RateLimiter};
use crate::types::query::{QueryKey, RawListing};

/// Build a [`RawListing`] from a `json!` object literal.
///
/// Non-object values produce an empty listing.
pub fn listing(value: Value) -> RawListing {
    match value {
        Value::Object(obj) => obj,
        _ => RawListing::new(),
    }
}

#[derive(Debug, Clone)]
enum MockReply {
    Response(SearchResponse),
    Timeout,
    Failure { status: u16, message: String },
}

/// Mock search API.
///
/// Answers each query key with a canned reply. Unknown keys get an `OK`
/// envelope with no listings. Clones share replies and call history.
#[derive(Default, Clone)]
pub struct MockListingApi {
    replies: Arc<RwLock<HashMap<QueryKey, MockReply>>>,
    calls: Arc<RwLock<Vec<QueryKey>>>,
}

impl MockListingApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_reply(self, key: impl Into<QueryKey>, reply: MockReply) -> Self {
        self.replies.write().unwrap().insert(key.into(), reply);
        self
    }

    /// Answer `key` with an `OK` envelope carrying `listings`.
    pub fn with_listings(self, key: impl Into<QueryKey>, listings: Vec<RawListing>) -> Self {
        self.with_reply(key, MockReply::Response(SearchResponse::ok(listings)))
    }

    /// Answer `key` with an arbitrary envelope.
    pub fn with_response(self, key: impl Into<QueryKey>, response: SearchResponse) -> Self {
        self.with_reply(key, MockReply::Response(response))
    }

    /// Make requests for `key` time out.
    pub fn with_timeout(self, key: impl Into<QueryKey>) -> Self {
        self.with_reply(key, MockReply::Timeout)
    }

    /// Make requests for `key` fail with an HTTP 403 carrying `message`.
    pub fn with_failure(self, key: impl Into<QueryKey>, message: impl Into<String>) -> Self {
        self.with_reply(
            key,
            MockReply::Failure {
                status: 403,
                message: message.into(),
            },
        )
    }

    /// Keys searched so far, in call order.
    pub fn calls(&self) -> Vec<QueryKey> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    pub fn call_count_for(&self, key: &str) -> usize {
        self.calls
            .read()
            .unwrap()
            .iter()
            .filter(|k| k.as_str() == key)
            .count()
    }

    pub fn reset_calls(&self) {
        self.calls.write().unwrap().clear();
    }
}

#[async_trait]
impl ListingApi for MockListingApi {
    async fn search(&self, key: &QueryKey) -> Result<SearchResponse, JSearchError> {
        self.calls.write().unwrap().push(key.clone());

        let reply = self.replies.read().unwrap().get(key).cloned();
        match reply {
            Some(MockReply::Response(resp)) => Ok(resp),
            Some(MockReply::Timeout) => Err(JSearchError::Timeout),
            Some(MockReply::Failure { status, message }) => Err(JSearchError::Api { status, message }),
            None => Ok(SearchResponse::ok(Vec::new())),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Rate limiter that never waits but counts how often it was consulted.
#[derive(Debug, Default, Clone)]
pub struct CountingLimiter {
    count: Arc<AtomicUsize>,
}

impl CountingLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RateLimiter for CountingLimiter {
    async fn until_ready(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}
