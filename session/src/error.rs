//! JSON error body exchanged between the API and its clients.

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::phase::{NETWORK_FAILURE_STATUS, UNAUTHORIZED_STATUS};

pub const UNKNOWN_ERROR: &str = "UnknownError";
pub const NETWORK_ERROR: &str = "NetworkError";
const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred.";
const NETWORK_MESSAGE: &str = "A network error occurred.";
const NO_DETAILS: &str = "No further details available";

/// Environment hints attached to report errors so clients can render the
/// right empty state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub in_docker: Option<bool>,
    pub events_present: Option<bool>,
}

/// `{ status, error, message, details }`, the only error shape clients see.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{error} ({status}): {message}")]
pub struct ApiError {
    pub status: u16,
    /// Short machine-readable identifier, e.g. `"FileNotFound"`.
    pub error: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ApiError {
    #[must_use]
    pub fn new(status: u16, error: &str, message: &str) -> Self {
        Self { status, error: error.to_owned(), message: message.to_owned(), details: None }
    }

    #[must_use]
    pub fn with_details<T: Serialize>(mut self, details: &T) -> Self {
        self.details = serde_json::to_value(details).ok();
        self
    }

    #[must_use]
    pub fn unauthorized() -> Self {
        Self::new(UNAUTHORIZED_STATUS, "Unauthorized", "A valid session or API token is required.")
    }

    /// Error for a request that never produced a response.
    #[must_use]
    pub fn network(message: &str) -> Self {
        let message = if message.is_empty() { NETWORK_MESSAGE } else { message };
        Self {
            status: NETWORK_FAILURE_STATUS,
            error: NETWORK_ERROR.to_owned(),
            message: message.to_owned(),
            details: Some(Value::String(message.to_owned())),
        }
    }

    fn unknown(status: u16, message: &str, details: Value) -> Self {
        Self {
            status,
            error: UNKNOWN_ERROR.to_owned(),
            message: message.to_owned(),
            details: Some(details),
        }
    }

    /// Normalize a non-success response into an `ApiError`.
    ///
    /// JSON bodies that already carry `status`, `error` and `message` pass
    /// through untouched. Any other body becomes an `UnknownError`, keeping
    /// whatever detail can be salvaged.
    #[must_use]
    pub fn from_response(status: u16, status_text: Option<&str>, content_type: &str, body: &str) -> Self {
        if content_type.contains("application/json") {
            return match serde_json::from_str::<Value>(body) {
                Ok(value) => Self::from_json_body(status, value),
                Err(_) => Self::unknown(status, UNEXPECTED_MESSAGE, Value::String(NO_DETAILS.to_owned())),
            };
        }
        let message = status_text
            .filter(|text| !text.is_empty())
            .unwrap_or(UNEXPECTED_MESSAGE);
        Self::unknown(status, message, Value::String(body.to_owned()))
    }

    fn from_json_body(status: u16, value: Value) -> Self {
        if let Ok(parsed) = serde_json::from_value::<Self>(value.clone()) {
            if parsed.status != 0 && !parsed.error.is_empty() && !parsed.message.is_empty() {
                return parsed;
            }
        }
        let details = value
            .get("details")
            .filter(|d| !is_falsy(d))
            .cloned()
            .unwrap_or_else(|| Value::String(NO_DETAILS.to_owned()));
        Self::unknown(status, UNEXPECTED_MESSAGE, details)
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status == UNAUTHORIZED_STATUS
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// Structured details, when the server attached [`ErrorDetails`].
    #[must_use]
    pub fn error_details(&self) -> Option<ErrorDetails> {
        let details = self.details.as_ref()?;
        if !details.is_object() {
            return None;
        }
        serde_json::from_value(details.clone()).ok()
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(_) | Value::Object(_) => false,
    }
}
