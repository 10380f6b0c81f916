//! Job Listing Ingestion Library
//!
//! Fetches job listings from the JSearch API with per-query caching, feeds
//! them through a small partitioned-pull dataflow, and converts stored search
//! payloads into documents for downstream indexing.
//!
//! The two halves share no runtime state:
//!
//! - **Fetch**: [`ListingFetcher`] consults a [`ListingCache`], waits on a
//!   [`RateLimiter`], and calls a [`ListingApi`]. [`ListingSource`] exposes
//!   one partition per query key to a [`Dataflow`].
//! - **Convert**: [`JsonToDocuments`] reads `{"data": [...]}` payloads from
//!   files or buffers and emits one [`Document`] per listing.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use job_ingest::{
//!     Dataflow, InspectSink, ListingFetcher, ListingSource, MemoryCache, QuotaRateLimiter,
//! };
//! use jsearch_client::JSearchClient;
//!
//! let client = JSearchClient::new(api_key)?;
//! let fetcher = Arc::new(ListingFetcher::new(client, MemoryCache::new(), QuotaRateLimiter::default()));
//! let source = ListingSource::new(vec!["AI Engineer".into()], fetcher);
//!
//! Dataflow::new("linkedin_jobs").run(&source, &mut InspectSink::stdout()).await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Seams: search API, cache, rate limiter, dataflow contracts
//! - [`types`] - Query keys, raw listings, documents
//! - [`fetcher`] - Cached, rate-limited listing fetcher
//! - [`stores`] - Cache implementations
//! - [`limiters`] - Rate limiter implementations
//! - [`dataflow`] - Partitioned source, runner, sinks
//! - [`convert`] - JSON-to-document conversion and row normalization
//! - [`config`] - Environment configuration
//! - [`testing`] - Mock implementations for testing

pub mod config;
pub mod convert;
pub mod dataflow;
pub mod error;
pub mod fetcher;
pub mod limiters;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use config::Config;
pub use convert::{json_normalize, ByteStream, JsonSource, JsonToDocuments};
pub use dataflow::{
    CollectSink, Dataflow, InspectSink, ListingPartition, ListingSource, RunSummary, Sink,
};
pub use error::{
    CacheError, ConfigError, ConvertError, DataflowError, FetchFailure, NormalizeError,
};
pub use fetcher::{FetchOutcome, ListingFetcher, Origin};
pub use limiters::{IntervalGate, QuotaRateLimiter, Unlimited};
pub use stores::{BoundedMemoryCache, MemoryCache};
pub use traits::{
    api::ListingApi,
    cache::ListingCache,
    dataflow::{PartitionedSource, SourcePartition},
    limiter::RateLimiter,
};
pub use types::{
    document::{ConversionOutput, Document, SkippedSource},
    query::{QueryKey, RawListing},
};

// Re-export testing utilities
pub use testing::{CountingLimiter, MockListingApi};
