//! Converts stored search payloads into documents.
//!
//! Each source is expected to hold a search envelope with a `data` list.
//! Every item in that list becomes one [`Document`]: its job description is
//! the content and the whole item is the metadata.
//!
//! # Usage
//!
//! ```rust,ignore
//! use job_ingest::convert::{JsonSource, JsonToDocuments};
//!
//! let converter = JsonToDocuments::new().with_flatten_field("job_highlights");
//! let output = converter.run(&[JsonSource::from("ai_engineer.json")]);
//! for doc in &output.documents {
//!     println!("{}", doc.content.as_deref().unwrap_or("(no description)"));
//! }
//! ```

use serde_json::{Map, Value};

use crate::error::{ConvertError, ConvertResult};
use crate::types::document::{ConversionOutput, Document, SkippedSource};

use super::normalize::{json_normalize, DEFAULT_SEPARATOR};
use super::source::JsonSource;

/// Field used as document content.
pub const DEFAULT_CONTENT_FIELD: &str = "job_description";

/// Converter from `{"data": [...]}` JSON into one document per item.
///
/// A source that fails at any step is logged and skipped as a whole; the
/// remaining sources are still converted.
#[derive(Debug, Clone)]
pub struct JsonToDocuments {
    flatten_field: Option<String>,
    content_field: String,
    separator: String,
    progress: bool,
}

impl Default for JsonToDocuments {
    fn default() -> Self {
        Self {
            flatten_field: None,
            content_field: DEFAULT_CONTENT_FIELD.to_string(),
            separator: DEFAULT_SEPARATOR.to_string(),
            progress: true,
        }
    }
}

impl JsonToDocuments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace each item with the flattened value of `field` when present.
    pub fn with_flatten_field(mut self, field: impl Into<String>) -> Self {
        self.flatten_field = Some(field.into());
        self
    }

    pub fn with_content_field(mut self, field: impl Into<String>) -> Self {
        self.content_field = field.into();
        self
    }

    /// Key separator for flattened paths (default `.`).
    pub fn with_separator(mut self, sep: impl Into<String>) -> Self {
        self.separator = sep.into();
        self
    }

    /// Toggle per-source progress logging.
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn flatten_field(&self) -> Option<&str> {
        self.flatten_field.as_deref()
    }

    /// Convert every source, in order.
    pub fn run(&self, sources: &[JsonSource]) -> ConversionOutput {
        let mut output = ConversionOutput::default();
        let total = sources.len();

        for (i, source) in sources.iter().enumerate() {
            if self.progress {
                tracing::debug!(
                    current = i + 1,
                    total,
                    source = %source,
                    "Converting JSON files to Documents"
                );
            }

            match self.convert_source(source) {
                Ok(docs) => output.documents.extend(docs),
                Err(ConvertError::UnexpectedFormat) => {
                    tracing::warn!(
                        "The JSON structure of {} does not match the expected format.",
                        source
                    );
                    output.skipped.push(SkippedSource {
                        source: source.to_string(),
                        reason: ConvertError::UnexpectedFormat.to_string(),
                    });
                }
                Err(e) => {
                    tracing::warn!("Failed to process {}. Error: {}", source, e);
                    output.skipped.push(SkippedSource {
                        source: source.to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        if self.progress {
            tracing::info!(
                sources = total,
                skipped = output.skipped.len(),
                documents = output.documents.len(),
                "Converted JSON files to Documents"
            );
        }

        output
    }

    /// Convert one source. All-or-nothing: any failing item fails the source.
    pub fn convert_source(&self, source: &JsonSource) -> ConvertResult<Vec<Document>> {
        let text = source.read_text()?;
        let json: Value = serde_json::from_str(&text)?;

        let items = match json.get("data") {
            Some(Value::Array(items)) => items,
            _ => return Err(ConvertError::UnexpectedFormat),
        };

        items
            .iter()
            .enumerate()
            .map(|(index, item)| self.convert_item(index, item))
            .collect()
    }

    fn convert_item(&self, index: usize, item: &Value) -> ConvertResult<Document> {
        let obj = item
            .as_object()
            .ok_or(ConvertError::ItemNotObject { index })?;

        let record = match self.flatten_field.as_deref() {
            Some(field) if obj.contains_key(field) => self.flatten(field, index, &obj[field])?,
            _ => obj.clone(),
        };

        let content = extract_content(&record, &self.content_field);
        Ok(Document::new(content, record))
    }

    /// Row-normalize `value` and keep the first record.
    fn flatten(&self, field: &str, index: usize, value: &Value) -> ConvertResult<Map<String, Value>> {
        let mut records =
            json_normalize(value, &self.separator).map_err(|source| ConvertError::Normalize {
                field: field.to_string(),
                index,
                source,
            })?;

        if records.len() > 1 {
            tracing::warn!(
                field,
                index,
                rows = records.len(),
                "Flattened field produced multiple rows; keeping the first"
            );
        }

        if records.is_empty() {
            return Err(ConvertError::EmptyFlatten {
                field: field.to_string(),
                index,
            });
        }

        Ok(records.swap_remove(0))
    }
}

/// Strings are used verbatim, other non-null values are rendered as JSON,
/// missing or null fields give no content.
fn extract_content(record: &Map<String, Value>, field: &str) -> Option<String> {
    match record.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}
