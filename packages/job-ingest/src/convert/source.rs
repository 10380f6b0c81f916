//! Conversion inputs: file paths or in-memory buffers.

use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, ConvertResult};

/// Raw bytes with optional metadata, e.g. a payload kept from an API call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ByteStream {
    pub data: Vec<u8>,
    pub meta: Map<String, Value>,
    pub mime_type: Option<String>,
}

impl ByteStream {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            ..Default::default()
        }
    }

    pub fn from_string(text: impl Into<String>) -> Self {
        Self::new(text.into().into_bytes()).with_mime_type("application/json")
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }
}

/// One conversion input.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonSource {
    Path(PathBuf),
    Bytes(ByteStream),
}

impl JsonSource {
    /// Read the source as UTF-8 text. Files are never written to.
    pub fn read_text(&self) -> ConvertResult<String> {
        match self {
            JsonSource::Path(path) => {
                let bytes = std::fs::read(path).map_err(|source| ConvertError::Io {
                    path: path.clone(),
                    source,
                })?;
                Ok(String::from_utf8(bytes)?)
            }
            JsonSource::Bytes(stream) => Ok(String::from_utf8(stream.data.clone())?),
        }
    }
}

impl fmt::Display for JsonSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonSource::Path(path) => write!(f, "{}", path.display()),
            JsonSource::Bytes(stream) => match stream.meta.get("file_path").and_then(Value::as_str) {
                Some(name) => write!(f, "ByteStream({})", name),
                None => write!(f, "ByteStream({} bytes)", stream.data.len()),
            },
        }
    }
}

impl From<PathBuf> for JsonSource {
    fn from(path: PathBuf) -> Self {
        JsonSource::Path(path)
    }
}

impl From<&Path> for JsonSource {
    fn from(path: &Path) -> Self {
        JsonSource::Path(path.to_path_buf())
    }
}

impl From<&str> for JsonSource {
    fn from(path: &str) -> Self {
        JsonSource::Path(PathBuf::from(path))
    }
}

impl From<ByteStream> for JsonSource {
    fn from(stream: ByteStream) -> Self {
        JsonSource::Bytes(stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_decode_as_utf8() {
        let source = JsonSource::from(ByteStream::from_string(r#"{"data": []}"#));
        assert_eq!(source.read_text().unwrap(), r#"{"data": []}"#);
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let source = JsonSource::from(ByteStream::new(vec![0xff, 0xfe, 0x00]));
        assert!(matches!(source.read_text(), Err(ConvertError::Utf8(_))));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let source = JsonSource::from("/definitely/not/here.json");
        assert!(matches!(source.read_text(), Err(ConvertError::Io { .. })));
    }

    #[test]
    fn test_display() {
        assert_eq!(JsonSource::from("jobs.json").to_string(), "jobs.json");
        assert_eq!(
            JsonSource::from(ByteStream::new(b"{}".to_vec())).to_string(),
            "ByteStream(2 bytes)"
        );
        assert_eq!(
            JsonSource::from(ByteStream::new(b"{}".to_vec()).with_meta("file_path", "jobs.json")).to_string(),
            "ByteStream(jobs.json)"
        );
    }
}
