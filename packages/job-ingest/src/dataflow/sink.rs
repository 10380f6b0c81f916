//! Output sinks for dataflow runs.

use serde::Serialize;
use std::io::{self, Write};

use crate::error::DataflowError;

/// Receives every batch a dataflow emits.
pub trait Sink<T>: Send {
    fn write_batch(&mut self, step_id: &str, items: Vec<T>) -> Result<(), DataflowError>;

    fn flush(&mut self) -> Result<(), DataflowError> {
        Ok(())
    }
}

/// Prints each item as `"<step_id>: <item as JSON>"`, one per line.
pub struct InspectSink<W: Write + Send> {
    out: W,
}

impl InspectSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write + Send> InspectSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<T: Serialize, W: Write + Send> Sink<T> for InspectSink<W> {
    fn write_batch(&mut self, step_id: &str, items: Vec<T>) -> Result<(), DataflowError> {
        for item in &items {
            let rendered = serde_json::to_string(item)?;
            writeln!(self.out, "{}: {}", step_id, rendered)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DataflowError> {
        self.out.flush()?;
        Ok(())
    }
}

/// Accumulates every emitted item in arrival order.
#[derive(Debug)]
pub struct CollectSink<T> {
    items: Vec<T>,
    batches: usize,
}

impl<T> Default for CollectSink<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            batches: 0,
        }
    }
}

impl<T> CollectSink<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn batches(&self) -> usize {
        self.batches
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T: Send> Sink<T> for CollectSink<T> {
    fn write_batch(&mut self, _step_id: &str, items: Vec<T>) -> Result<(), DataflowError> {
        self.batches += 1;
        self.items.extend(items);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_inspect_sink_format() {
        let mut sink = InspectSink::new(Vec::new());
        sink.write_batch("linkedin_jobs.inspect", vec![json!({"job_id": "1"}), json!({"job_id": "2"})])
            .unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], r#"linkedin_jobs.inspect: {"job_id":"1"}"#);
    }

    #[test]
    fn test_collect_sink_counts_batches() {
        let mut sink = CollectSink::new();
        sink.write_batch("step", vec![1, 2]).unwrap();
        sink.write_batch("step", Vec::<i32>::new()).unwrap();

        assert_eq!(sink.items(), &[1, 2]);
        assert_eq!(sink.batches(), 2);
    }
}
