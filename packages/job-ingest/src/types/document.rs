//! Normalized documents handed to the indexing pipeline.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

/// One normalized record: listing text as content, every field as metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// SHA-256 over content and metadata
    pub id: String,

    /// Primary text (the job description), absent when the item has none
    pub content: Option<String>,

    /// The exact item consumed, post-flatten when flattening applied
    pub meta: Map<String, Value>,
}

impl Document {
    pub fn new(content: Option<String>, meta: Map<String, Value>) -> Self {
        let id = Self::compute_id(content.as_deref(), &meta);
        Self { id, content, meta }
    }

    /// Stable content-addressed id. Identical content and metadata always
    /// hash to the same id.
    pub fn compute_id(content: Option<&str>, meta: &Map<String, Value>) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content.unwrap_or_default().as_bytes());
        hasher.update([0u8]);
        hasher.update(Value::Object(meta.clone()).to_string().as_bytes());
        format!("{:x}", hasher.finalize())
    }

    pub fn has_content(&self) -> bool {
        self.content
            .as_deref()
            .map(|c| !c.trim().is_empty())
            .unwrap_or(false)
    }
}

/// Sources that were dropped during a conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSource {
    pub source: String,
    pub reason: String,
}

/// Labeled conversion result, serialized as `{"documents": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionOutput {
    pub documents: Vec<Document>,

    #[serde(skip)]
    pub skipped: Vec<SkippedSource>,
}
