use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Proxy-style result returned to the invoking platform: a status code and
/// a JSON-encoded body string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    pub status_code: u16,
    pub body: String,
}

impl FunctionResponse {
    pub fn new(status_code: u16, body: Value) -> Self {
        Self {
            status_code,
            body: body.to_string(),
        }
    }

    pub fn ok(body: Value) -> Self {
        Self::new(200, body)
    }

    pub fn client_error(message: impl Into<String>) -> Self {
        Self::new(400, json!({ "error": message.into() }))
    }

    pub fn server_error(message: impl Into<String>) -> Self {
        Self::new(500, json!({ "error": message.into() }))
    }
}

/// Body of a successful Metadata Reporter invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTypeReport {
    pub bucket: String,
    pub key: String,
    pub content_type: String,
}

/// Body of a successful forwarder invocation. Counts records handed to the
/// streaming client, delivered or not; partial rejections are logged, never
/// retried.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardReport {
    pub records_forwarded: usize,
}
