//! Uniform result shape returned by every gateway operation.
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Outcome of one gateway call, independent of the transport that served it.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationResult {
    Success(Value),
    Failure(String),
}

#[derive(Serialize)]
struct WireResult<'a> {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
}

impl OperationResult {
    /// Classify a backend payload. Objects with `"status": "error"` are
    /// backend faults; anything else is a success.
    #[must_use]
    pub fn from_payload(payload: Value) -> Self {
        let is_error = payload
            .get("status")
            .and_then(Value::as_str)
            .is_some_and(|status| status.eq_ignore_ascii_case("error"));
        if is_error {
            let message = payload
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("backend reported an error")
                .to_string();
            Self::Failure(message)
        } else {
            Self::Success(payload)
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    #[must_use]
    pub const fn payload(&self) -> Option<&Value> {
        match self {
            Self::Success(payload) => Some(payload),
            Self::Failure(_) => None,
        }
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success(payload) => payload.get("message").and_then(Value::as_str),
            Self::Failure(message) => Some(message),
        }
    }
}

impl Serialize for OperationResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let wire = match self {
            Self::Success(payload) => WireResult {
                status: "success",
                payload: Some(payload),
                message: None,
            },
            Self::Failure(message) => WireResult {
                status: "error",
                payload: None,
                message: Some(message),
            },
        };
        wire.serialize(serializer)
    }
}
