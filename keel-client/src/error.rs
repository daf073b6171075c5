//! Error types for the ECS client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the control plane
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}){}: {message}", code_suffix(.code))]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error type reported by the API (e.g. `ClusterNotFoundException`)
        code: Option<String>,
        /// Error message from the API
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// No usable credentials
    #[error("Credentials unavailable: {0}")]
    Credentials(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

fn code_suffix(code: &Option<String>) -> String {
    code.as_deref()
        .map(|c| format!(" {}", c))
        .unwrap_or_default()
}

impl ClientError {
    /// Create an API error from a status code and the raw response body
    ///
    /// The body is expected to be the JSON error envelope
    /// `{"__type": "...", "message": "..."}`; anything else is kept verbatim
    /// as the message.
    pub fn api_error(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let envelope: Option<serde_json::Value> = serde_json::from_str(&body).ok();

        let code = envelope
            .as_ref()
            .and_then(|v| v.get("__type"))
            .and_then(|v| v.as_str())
            .map(|t| t.rsplit('#').next().unwrap_or(t).to_string());

        let message = envelope
            .as_ref()
            .and_then(|v| v.get("message").or_else(|| v.get("Message")))
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or(body);

        Self::ApiError {
            status,
            code,
            message,
        }
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_parses_envelope() {
        let err = ClientError::api_error(
            400,
            r#"{"__type":"com.amazonaws.ecs#ClusterNotFoundException","message":"Cluster not found."}"#,
        );

        match &err {
            ClientError::ApiError {
                status,
                code,
                message,
            } => {
                assert_eq!(*status, 400);
                assert_eq!(code.as_deref(), Some("ClusterNotFoundException"));
                assert_eq!(message, "Cluster not found.");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(err.is_client_error());
        assert_eq!(
            err.to_string(),
            "API error (status 400) ClusterNotFoundException: Cluster not found."
        );
    }

    #[test]
    fn test_api_error_keeps_raw_body() {
        let err = ClientError::api_error(503, "Service Unavailable");
        assert!(err.is_server_error());
        assert_eq!(err.to_string(), "API error (status 503): Service Unavailable");
    }
}
