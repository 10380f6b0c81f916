//! Size-bounded listing cache with LRU eviction.

use async_trait::async_trait;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Mutex, PoisonError};

use crate::error::CacheResult;
use crate::traits::cache::ListingCache;
use crate::types::query::{QueryKey, RawListing};

/// Keeps at most `capacity` query keys, evicting the least recently used.
pub struct BoundedMemoryCache {
    entries: Mutex<LruCache<QueryKey, Vec<RawListing>>>,
}

impl BoundedMemoryCache {
    /// Create a cache holding up to `capacity` keys (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .cap()
            .get()
    }
}

#[async_trait]
impl ListingCache for BoundedMemoryCache {
    async fn get(&self, key: &QueryKey) -> CacheResult<Option<Vec<RawListing>>> {
        Ok(self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    async fn insert(&self, key: QueryKey, listings: Vec<RawListing>) -> CacheResult<()> {
        let evicted = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(key.clone(), listings);

        if let Some((old_key, _)) = evicted.filter(|(old_key, _)| *old_key != key) {
            tracing::debug!(query = %old_key, "Evicted cached listings");
        }
        Ok(())
    }

    async fn len(&self) -> CacheResult<usize> {
        Ok(self
            .entries
            .lock()
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
    async fn test_evicts_least_recently_used() {
        let cache = BoundedMemoryCache::new(2);
        let a = QueryKey::new("a");
        let b = QueryKey::new("b");
        let c = QueryKey::new("c");

        cache.insert(a.clone(), vec![listing(json!({"k": "a"}))]).await.unwrap();
        cache.insert(b.clone(), vec![listing(json!({"k": "b"}))]).await.unwrap();

        // Touch `a` so `b` becomes the eviction candidate.
        assert!(cache.get(&a).await.unwrap().is_some());
        cache.insert(c.clone(), vec![listing(json!({"k": "c"}))]).await.unwrap();

        assert_eq!(cache.len().await.unwrap(), 2);
        assert!(cache.get(&b).await.unwrap().is_none());
        assert!(cache.get(&a).await.unwrap().is_some());
        assert!(cache.get(&c).await.unwrap().is_some());
    }

    #[test]
    fn test_zero_capacity_clamps_to_one() {
        assert_eq!(BoundedMemoryCache::new(0).capacity(), 1);
    }
}
