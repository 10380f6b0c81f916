//! Listing cache implementations.
//!
//! Available backends:
//! - `MemoryCache` - Unbounded in-memory cache, lives as long as the process
//! - `BoundedMemoryCache` - LRU-evicting in-memory cache with a fixed capacity

pub mod bounded;
pub mod memory;

pub use bounded::BoundedMemoryCache;
pub use memory::MemoryCache;
