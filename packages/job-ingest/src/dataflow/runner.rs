//! Sequential dataflow runner.

use crate::error::DataflowError;
use crate::traits::dataflow::{PartitionedSource, SourcePartition};

use super::sink::Sink;

/// Counters for a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub partitions: usize,
    pub batches: usize,
    pub items: usize,
}

/// A named flow: one partitioned input feeding one inspection step.
///
/// Partitions run one after another on the calling task. Each partition is
/// built fresh (no resume state) and pulled until it reports exhaustion.
#[derive(Debug, Clone)]
pub struct Dataflow {
    flow_id: String,
    input_step: String,
    output_step: String,
}

impl Dataflow {
    pub fn new(flow_id: impl Into<String>) -> Self {
        Self {
            flow_id: flow_id.into(),
            input_step: "input".to_string(),
            output_step: "inspect".to_string(),
        }
    }

    pub fn with_input_step(mut self, step_id: impl Into<String>) -> Self {
        self.input_step = step_id.into();
        self
    }

    pub fn with_output_step(mut self, step_id: impl Into<String>) -> Self {
        self.output_step = step_id.into();
        self
    }

    pub fn flow_id(&self) -> &str {
        &self.flow_id
    }

    /// Fully qualified id of the output step, e.g. `linkedin_jobs.inspect`.
    pub fn output_step_id(&self) -> String {
        format!("{}.{}", self.flow_id, self.output_step)
    }

    pub async fn run<S, K>(&self, source: &S, sink: &mut K) -> Result<RunSummary, DataflowError>
    where
        S: PartitionedSource,
        K: Sink<S::Item>,
    {
        let input_step = format!("{}.{}", self.flow_id, self.input_step);
        let output_step = self.output_step_id();
        let mut summary = RunSummary::default();

        let parts = source.list_parts();
        tracing::info!(flow = %self.flow_id, partitions = parts.len(), "Starting dataflow");

        for key in parts {
            let mut partition = source.build_part(&input_step, &key, None);

            while let Some(batch) = partition.next_batch().await {
                summary.batches += 1;
                summary.items += batch.len();
                tracing::debug!(partition = %key, count = batch.len(), "Pulled batch");
                sink.write_batch(&output_step, batch)?;
            }

            summary.partitions += 1;
        }

        sink.flush()?;
        tracing::info!(
            flow = %self.flow_id,
            partitions = summary.partitions,
            items = summary.items,
            "Dataflow complete"
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataflow::{CollectSink, ListingSource};
    use crate::fetcher::ListingFetcher;
    use crate::limiters::Unlimited;
    use crate::stores::MemoryCache;
    use crate::testing::{listing, MockListingApi};
    use crate::types::query::QueryKey;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_run_drives_every_partition_in_order() {
        let api = MockListingApi::new()
            .with_listings("AI Engineer", vec![listing(json!({"job_id": "a1"})), listing(json!({"job_id": "a2"}))])
            .with_failure("Broken", "boom")
            .with_listings("ML Engineer", vec![listing(json!({"job_id": "m1"}))]);
        let fetcher = Arc::new(ListingFetcher::new(api.clone(), MemoryCache::new(), Unlimited));
        let source = ListingSource::new(
            vec!["AI Engineer".into(), "Broken".into(), "ML Engineer".into()],
            fetcher,
        );

        let mut sink = CollectSink::new();
        let summary = Dataflow::new("linkedin_jobs").run(&source, &mut sink).await.unwrap();

        assert_eq!(summary, RunSummary { partitions: 3, batches: 3, items: 3 });
        let ids: Vec<_> = sink.items().iter().map(|l| l["job_id"].clone()).collect();
        assert_eq!(ids, vec![json!("a1"), json!("a2"), json!("m1")]);
        assert_eq!(api.calls(), vec![QueryKey::new("AI Engineer"), QueryKey::new("Broken"), QueryKey::new("ML Engineer")]);
    }

    #[test]
    fn test_output_step_id() {
        let flow = Dataflow::new("linkedin_jobs").with_output_step("print");
        assert_eq!(flow.output_step_id(), "linkedin_jobs.print");
    }
}
