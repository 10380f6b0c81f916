//! JSON-to-document conversion.
//!
//! - `JsonToDocuments` - turns `{"data": [...]}` payloads into documents
//! - `JsonSource` / `ByteStream` - file paths or in-memory buffers
//! - `json_normalize` - flattens nested objects into dotted-key records

pub mod json;
pub mod normalize;
pub mod source;

pub use json::{JsonToDocuments, DEFAULT_CONTENT_FIELD};
pub use normalize::{json_normalize, DEFAULT_SEPARATOR};
pub use source::{ByteStream, JsonSource};
