//! Search API abstraction.

use async_trait::async_trait;
use jsearch_client::{JSearchClient, JSearchError, SearchQuery, SearchResponse};
use std::sync::Arc;

use crate::types::query::QueryKey;

/// A job-search backend that answers one query with one page of listings.
#[async_trait]
pub trait ListingApi: Send + Sync {
    /// Run a search for `key`. A non-OK envelope is returned as `Ok`; only
    /// transport and HTTP-level failures are errors.
    async fn search(&self, key: &QueryKey) -> Result<SearchResponse, JSearchError>;

    /// Backend name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}

#[async_trait]
impl ListingApi for JSearchClient {
    async fn search(&self, key: &QueryKey) -> Result<SearchResponse, JSearchError> {
        JSearchClient::search(self, &SearchQuery::new(key.as_str())).await
    }

    fn name(&self) -> &str {
        "jsearch"
    }
}

#[async_trait]
impl<T: ListingApi + ?Sized> ListingApi for Arc<T> {
    async fn search(&self, key: &QueryKey) -> Result<SearchResponse, JSearchError> {
        (**self).search(key).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
