//! Response payloads and the fetch error model.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde_json::Value;
use session::{ApiError, ProbeOutcome};
use session::error::UNKNOWN_ERROR;

/// Body of a successful response, chosen by its content type.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
}

impl Payload {
    #[must_use]
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    #[must_use]
    pub fn into_json(self) -> Option<Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }
}

/// Why a request did not produce a payload.
///
/// `Network` means no response arrived at all. `Api` means the server
/// answered with a non-success status; only that variant can be a 401.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error(transparent)]
    Api(ApiError),
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl FetchError {
    pub(crate) fn network(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api(err) if err.is_unauthorized())
    }

    #[must_use]
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }

    /// Flatten into the wire error shape. Transport failures become the
    /// generic 500 `NetworkError`.
    #[must_use]
    pub fn into_api_error(self) -> ApiError {
        match self {
            Self::Api(err) => err,
            Self::Network(message) => ApiError::network(&message),
            Self::Decode(message) => ApiError::new(500, UNKNOWN_ERROR, &message),
        }
    }

    /// Classification used when this error answers a session probe.
    #[must_use]
    pub fn probe_outcome(&self) -> ProbeOutcome {
        match self {
            Self::Api(err) => ProbeOutcome::from_status(err.status),
            Self::Network(_) | Self::Decode(_) => ProbeOutcome::network_failure(),
        }
    }
}
