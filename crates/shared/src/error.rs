use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structured error payload some servers return instead of plain text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    /// First non-blank of `message` and `error`.
    pub fn message(&self) -> Option<&str> {
        [self.message.as_deref(), self.error.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|text| !text.is_empty())
    }

    /// Reads a structured error payload. Only a JSON object qualifies; any
    /// other JSON value or non-JSON text yields `None`.
    pub fn parse(body: &str) -> Option<Self> {
        match serde_json::from_str::<Value>(body).ok()? {
            Value::Object(fields) => serde_json::from_value(Value::Object(fields)).ok(),
            _ => None,
        }
    }
}

/// Human readable failure text for a non-success response.
///
/// Prefers a structured `message`/`error` field, then the raw body text, then
/// the status reason phrase.
pub fn describe_failure(status: u16, reason: Option<&str>, body: &str) -> String {
    let body = body.trim();
    if !body.is_empty() {
        match ErrorBody::parse(body) {
            Some(parsed) => {
                if let Some(message) = parsed.message() {
                    return message.to_string();
                }
            }
            None => return body.to_string(),
        }
    }

    match reason {
        Some(reason) if !reason.is_empty() => reason.to_string(),
        _ => format!("HTTP {status}"),
    }
}
