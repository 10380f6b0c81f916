//! Core trait abstractions for the ingestion library.
//!
//! These traits are the seams between fetch logic and its collaborators:
//! the search API, the query cache, the rate limiter, and the dataflow
//! runner.

pub mod api;
pub mod cache;
pub mod dataflow;
pub mod limiter;
