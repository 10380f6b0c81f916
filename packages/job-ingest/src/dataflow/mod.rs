//! Minimal partitioned-pull dataflow.
//!
//! - `ListingSource` / `ListingPartition` - one partition per query key
//! - `Dataflow` - drives every partition into a sink, one at a time
//! - `InspectSink` / `CollectSink` - print or accumulate emitted items

pub mod runner;
pub mod sink;
pub mod source;

pub use runner::{Dataflow, RunSummary};
pub use sink::{CollectSink, InspectSink, Sink};
pub use source::{ListingPartition, ListingSource};

// Re-export the contracts for convenience
pub use crate::traits::dataflow::{PartitionedSource, SourcePartition};
