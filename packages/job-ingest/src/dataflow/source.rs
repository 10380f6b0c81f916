//! Job-listing source: one partition per configured query key.

use async_trait::async_trait;
use std::sync::Arc;

use crate::fetcher::ListingFetcher;
use crate::traits::{
    api::ListingApi,
    cache::ListingCache,
    dataflow::{PartitionedSource, SourcePartition},
    limiter::RateLimiter,
};
use crate::types::query::{QueryKey, RawListing};

/// Exposes a fixed list of query keys as independent partitions.
///
/// All partitions share one fetcher, and with it one cache and one limiter.
pub struct ListingSource<A, C, R> {
    queries: Vec<QueryKey>,
    fetcher: Arc<ListingFetcher<A, C, R>>,
}

impl<A, C, R> ListingSource<A, C, R> {
    pub fn new(queries: Vec<QueryKey>, fetcher: Arc<ListingFetcher<A, C, R>>) -> Self {
        Self { queries, fetcher }
    }

    pub fn queries(&self) -> &[QueryKey] {
        &self.queries
    }
}

impl<A, C, R> PartitionedSource for ListingSource<A, C, R>
where
    A: ListingApi + 'static,
    C: ListingCache + 'static,
    R: RateLimiter + 'static,
{
    type Item = RawListing;
    type State = ();
    type Partition = ListingPartition<A, C, R>;

    fn list_parts(&self) -> Vec<String> {
        self.queries.iter().map(|q| q.to_string()).collect()
    }

    fn build_part(&self, step_id: &str, for_key: &str, _resume_state: Option<()>) -> Self::Partition {
        tracing::debug!(step_id, query = for_key, "Building listing partition");
        ListingPartition::new(QueryKey::new(for_key), Arc::clone(&self.fetcher))
    }
}

/// Partition bound to a single query key.
///
/// The first pull drains the fetcher for its key as one batch; every later
/// pull reports exhaustion. No resume state is kept, so a rebuilt partition
/// starts over and goes back through the fetcher (and its cache).
pub struct ListingPartition<A, C, R> {
    key: QueryKey,
    fetcher: Arc<ListingFetcher<A, C, R>>,
    drained: bool,
}

impl<A, C, R> ListingPartition<A, C, R> {
    pub fn new(key: QueryKey, fetcher: Arc<ListingFetcher<A, C, R>>) -> Self {
        Self {
            key,
            fetcher,
            drained: false,
        }
    }

    pub fn key(&self) -> &QueryKey {
        &self.key
    }
}

#[async_trait]
impl<A, C, R> SourcePartition for ListingPartition<A, C, R>
where
    A: ListingApi + 'static,
    C: ListingCache + 'static,
    R: RateLimiter + 'static,
{
    type Item = RawListing;
    type State = ();

    async fn next_batch(&mut self) -> Option<Vec<RawListing>> {
        if self.drained {
            return None;
        }
        self.drained = true;
        Some(self.fetcher.fetch(&self.key).await.into_items())
    }

    fn snapshot(&self) -> Option<()> {
        None
    }
}
