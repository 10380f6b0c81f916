//! Query cache abstraction.
//!
//! The cache is an explicit object owned by the fetcher. Swapping the
//! in-memory store for a bounded or persistent one does not touch fetch
//! logic.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::CacheResult;
use crate::types::query::{QueryKey, RawListing};

/// Maps a query key to the listings fetched for it.
///
/// A key maps to at most one entry. Entries are written only after a fully
/// successful fetch.
#[async_trait]
pub trait ListingCache: Send + Sync {
    /// Get the cached listings for a key.
    async fn get(&self, key: &QueryKey) -> CacheResult<Option<Vec<RawListing>>>;

    /// Store listings for a key, replacing any previous entry.
    async fn insert(&self, key: QueryKey, listings: Vec<RawListing>) -> CacheResult<()>;

    /// Check whether a key has an entry.
    async fn contains(&self, key: &QueryKey) -> CacheResult<bool> {
        Ok(self.get(key).await?.is_some())
    }

    /// Number of cached keys.
    async fn len(&self) -> CacheResult<usize>;

    async fn is_empty(&self) -> CacheResult<bool> {
        Ok(self.len().await? == 0)
    }
}

#[async_trait]
impl<T: ListingCache + ?Sized> ListingCache for Arc<T> {
    async fn get(&self, key: &QueryKey) -> CacheResult<Option<Vec<RawListing>>> {
        (**self).get(key).await
    }

    async fn insert(&self, key: QueryKey, listings: Vec<RawListing>) -> CacheResult<()> {
        (**self).insert(key, listings).await
    }

    async fn len(&self) -> CacheResult<usize> {
        (**self).len().await
    }
}
