//! Cached listing fetcher.
//!
//! Resolves a query key to a finite sequence of listings: cached keys replay
//! their stored page verbatim, uncached keys cost one rate-limited API call.
//! Failures are logged and reported as [`FetchOutcome::Empty`]; nothing here
//! returns an error to the caller, and nothing is retried.

use futures::Stream;

use crate::error::FetchFailure;
use crate::traits::{api::ListingApi, cache::ListingCache, limiter::RateLimiter};
use crate::types::query::{QueryKey, RawListing};

/// Where a successful fetch got its listings from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Cache,
    Network,
}

/// Result of one fetch.
///
/// Distinguishes "the search found nothing" (`Listings` with no items) from
/// "the search failed" (`Empty`).
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Listings {
        items: Vec<RawListing>,
        origin: Origin,
    },
    Empty {
        reason: FetchFailure,
    },
}

impl FetchOutcome {
    pub fn items(&self) -> &[RawListing] {
        match self {
            FetchOutcome::Listings { items, .. } => items,
            FetchOutcome::Empty { .. } => &[],
        }
    }

    pub fn into_items(self) -> Vec<RawListing> {
        match self {
            FetchOutcome::Listings { items, .. } => items,
            FetchOutcome::Empty { .. } => Vec::new(),
        }
    }

    pub fn origin(&self) -> Option<Origin> {
        match self {
            FetchOutcome::Listings { origin, .. } => Some(*origin),
            FetchOutcome::Empty { .. } => None,
        }
    }

    pub fn failure(&self) -> Option<&FetchFailure> {
        match self {
            FetchOutcome::Listings { .. } => None,
            FetchOutcome::Empty { reason } => Some(reason),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.failure().is_some()
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

/// Fetches listings per query key through a cache and a rate limiter.
pub struct ListingFetcher<A, C, R> {
    api: A,
    cache: C,
    limiter: R,
}

impl<A, C, R> ListingFetcher<A, C, R>
where
    A: ListingApi,
    C: ListingCache,
    R: RateLimiter,
{
    pub fn new(api: A, cache: C, limiter: R) -> Self {
        Self {
            api,
            cache,
            limiter,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Fetch every listing for `key`.
    pub async fn fetch(&self, key: &QueryKey) -> FetchOutcome {
        if let Some(items) = self.cached(key).await {
            return FetchOutcome::Listings {
                items,
                origin: Origin::Cache,
            };
        }

        match self.request(key).await {
            Ok(items) => {
                self.store(key, items.clone()).await;
                FetchOutcome::Listings {
                    items,
                    origin: Origin::Network,
                }
            }
            Err(reason) => {
                log_failure(key, &reason);
                FetchOutcome::Empty { reason }
            }
        }
    }

    /// Lazily yield the listings for `key`.
    ///
    /// A fresh page is cached only once the consumer has pulled every item;
    /// dropping the stream early leaves the key uncached.
    pub fn stream<'a>(&'a self, key: &'a QueryKey) -> impl Stream<Item = RawListing> + 'a {
        async_stream::stream! {
            if let Some(items) = self.cached(key).await {
                for item in items {
                    yield item;
                }
            } else {
                match self.request(key).await {
                    Ok(items) => {
                        let mut fetched = Vec::with_capacity(items.len());
                        for item in items {
                            fetched.push(item.clone());
                            yield item;
                        }
                        self.store(key, fetched).await;
                    }
                    Err(reason) => log_failure(key, &reason),
                }
            }
        }
    }

    async fn cached(&self, key: &QueryKey) -> Option<Vec<RawListing>> {
        match self.cache.get(key).await {
            Ok(Some(items)) => {
                tracing::debug!(query = %key, count = items.len(), "Serving listings from cache");
                Some(items)
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(query = %key, error = %e, "Cache lookup failed, fetching from API");
                None
            }
        }
    }

    async fn store(&self, key: &QueryKey, items: Vec<RawListing>) {
        let count = items.len();
        match self.cache.insert(key.clone(), items).await {
            Ok(()) => tracing::debug!(query = %key, count, "Cached listings"),
            Err(e) => tracing::warn!(query = %key, error = %e, "Failed to cache listings"),
        }
    }

    /// One rate-limited search. Only an `OK` envelope counts as success.
    async fn request(&self, key: &QueryKey) -> Result<Vec<RawListing>, FetchFailure> {
        self.limiter.until_ready().await;

        tracing::info!(query = %key, api = self.api.name(), "Fetching job listings");
        let response = self.api.search(key).await?;

        if !response.is_ok() {
            return Err(FetchFailure::ApiStatus {
                message: response.error_message(),
                status: response.status,
            });
        }

        tracing::info!(query = %key, count = response.data.len(), "Fetched job listings");
        Ok(response.data)
    }
}

fn log_failure(key: &QueryKey, reason: &FetchFailure) {
    match reason {
        FetchFailure::Timeout => tracing::warn!(query = %key, "Request timed out"),
        FetchFailure::ApiStatus { message, .. } => {
            tracing::warn!(query = %key, "API error: {}", message)
        }
        FetchFailure::Request(e) => tracing::warn!(query = %key, "Request failed: {}", e),
    }
}
