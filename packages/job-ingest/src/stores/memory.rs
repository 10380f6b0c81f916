//! In-memory listing cache.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::error::CacheResult;
use crate::traits::cache::ListingCache;
use crate::types::query::{QueryKey, RawListing};

/// Unbounded in-memory cache.
///
/// Entries live until the cache is dropped; there is no eviction. Data is
/// lost on restart, so a restarted flow re-fetches from the API.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<QueryKey, Vec<RawListing>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all entries.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Cached keys, in no particular order.
    pub fn keys(&self) -> Vec<QueryKey> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ListingCache for MemoryCache {
    async fn get(&self, key: &QueryKey) -> CacheResult<Option<Vec<RawListing>>> {
        Ok(self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    async fn insert(&self, key: QueryKey, listings: Vec<RawListing>) -> CacheResult<()> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, listings);
        Ok(())
    }

    async fn len(&self) -> CacheResult<usize> {
        Ok(self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::listing;
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_and_get() {
        let cache = MemoryCache::new();
        let key = QueryKey::new("AI Engineer");
        let items = vec![listing(json!({"job_id": "1"})), listing(json!({"job_id": "2"}))];

        assert!(cache.get(&key).await.unwrap().is_none());
        cache.insert(key.clone(), items.clone()).await.unwrap();

        assert_eq!(cache.get(&key).await.unwrap(), Some(items));
        assert!(cache.contains(&key).await.unwrap());
        assert_eq!(cache.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_keys_are_isolated() {
        let cache = MemoryCache::new();
        let a = QueryKey::new("AI Engineer");
        let b = QueryKey::new("Data Engineer");

        cache.insert(a.clone(), vec![listing(json!({"job_id": "a"}))]).await.unwrap();
        cache.insert(b.clone(), vec![listing(json!({"job_id": "b"}))]).await.unwrap();

        assert_eq!(cache.get(&a).await.unwrap().unwrap()[0]["job_id"], "a");
        assert_eq!(cache.get(&b).await.unwrap().unwrap()[0]["job_id"], "b");
        assert_eq!(cache.len().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = MemoryCache::new();
        cache.insert(QueryKey::new("x"), vec![]).await.unwrap();
        cache.clear();
        assert!(cache.is_empty().await.unwrap());
        assert!(cache.keys().is_empty());
    }
}
