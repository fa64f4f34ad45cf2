/// Faults raised by transports before the gateway folds them into
/// [`crate::OperationResult::Failure`].
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The bridge (or the method being called) is not attached.
    #[error("transport unavailable: {0}")]
    TransportUnavailable(String),
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    /// The backend answered with a non-success HTTP status.
    #[error("backend returned HTTP {status}: {message}")]
    Status { status: u16, message: String },
    /// The response body was not valid JSON.
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
    /// The bridge call rejected or threw.
    #[error("bridge call failed: {0}")]
    Bridge(String),
    #[error("invalid progress value: {0}")]
    InvalidProgress(f64),
}

impl GatewayError {
    /// Coarse fault family used in logs.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::TransportUnavailable(_) => "transport_unavailable",
            Self::Network(_) | Self::Json(_) => "network_fault",
            Self::Status { .. } | Self::Bridge(_) => "backend_fault",
            Self::InvalidProgress(_) => "invalid_input",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::GatewayError;

    #[test]
    fn messages_are_readable() {
        let err = GatewayError::Status {
            status: 503,
            message: "maintenance".into(),
        };
        assert_eq!(err.to_string(), "backend returned HTTP 503: maintenance");
        assert_eq!(err.category(), "backend_fault");
    }

    #[test]
    fn json_errors_convert() {
        let parse = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = GatewayError::from(parse);
        assert!(err.to_string().starts_with("invalid JSON response"));
        assert_eq!(err.category(), "network_fault");
    }
}
