use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Status value the API reports for a successful search.
pub const STATUS_OK: &str = "OK";

/// Query parameters for `GET /search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    pub query: String,
    pub page: u32,
    pub num_pages: u32,
}

impl SearchQuery {
    /// A single-page search for `query`, starting at page 1.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
            num_pages: 1,
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn with_num_pages(mut self, num_pages: u32) -> Self {
        self.num_pages = num_pages;
        self
    }
}

/// Envelope returned by `GET /search`.
///
/// Listings are left untyped: the API schema is opaque and shifts without
/// notice, so callers get each item as a raw JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default)]
    pub data: Vec<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    /// RapidAPI gateway messages (quota, auth) arrive here instead of `error`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SearchResponse {
    /// A successful envelope carrying `data`.
    pub fn ok(data: Vec<Map<String, Value>>) -> Self {
        Self {
            status: STATUS_OK.to_string(),
            data,
            ..Default::default()
        }
    }

    /// A failed envelope with the given status and error text.
    pub fn error(status: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            error: Some(Value::String(error.into())),
            ..Default::default()
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Human-readable error reported by the API, or `"Unknown error"`.
    pub fn error_message(&self) -> String {
        match &self.error {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Object(obj)) => obj
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| Value::Object(obj.clone()).to_string()),
            Some(Value::Null) | None => self
                .message
                .clone()
                .unwrap_or_else(|| "Unknown error".to_string()),
            Some(other) => other.to_string(),
        }
    }
}
