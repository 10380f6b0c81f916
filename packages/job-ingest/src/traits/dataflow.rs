//! Partitioned-pull source contract.
//!
//! A [`PartitionedSource`] enumerates a fixed list of partition keys and
//! builds one [`SourcePartition`] per key. The runner pulls batches from each
//! partition until it reports exhaustion.

use async_trait::async_trait;

/// One independently pulled slice of a source.
#[async_trait]
pub trait SourcePartition: Send {
    type Item: Send;
    type State: Send;

    /// Pull the next batch. `None` means the partition is exhausted.
    async fn next_batch(&mut self) -> Option<Vec<Self::Item>>;

    /// State needed to resume this partition after a restart.
    fn snapshot(&self) -> Option<Self::State>;
}

/// A source split into statically known partitions.
pub trait PartitionedSource: Send + Sync {
    type Item: Send;
    type State: Send;
    type Partition: SourcePartition<Item = Self::Item, State = Self::State>;

    /// Partition keys, in configured order.
    fn list_parts(&self) -> Vec<String>;

    /// Build the partition for `for_key`, optionally resuming from a snapshot.
    fn build_part(
        &self,
        step_id: &str,
        for_key: &str,
        resume_state: Option<Self::State>,
    ) -> Self::Partition;
}
