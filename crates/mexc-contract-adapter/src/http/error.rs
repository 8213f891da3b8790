/*
[INPUT]:  Error sources (transport, API envelope, HTTP status, signer input, serialization)
[OUTPUT]: Structured error types with context for callers
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the MEXC contract adapter
#[derive(Error, Debug)]
pub enum MexcError {
    /// HTTP transport failed before a response was received
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API envelope reported `success: false`
    #[error("API error: {message}")]
    Api { code: Option<i64>, message: String },

    /// Server answered with a non-2xx status
    #[error("HTTP status {status}: {body}")]
    Status {
        status: u16,
        body: String,
        headers: Vec<(String, String)>,
    },

    /// Parameters handed to the signer cannot be canonicalized
    #[error("Invalid signature input: {0}")]
    SignatureInput(String),

    /// API key or secret not configured
    #[error("API credentials not configured (set MEXC_API_KEY and MEXC_API_SECRET)")]
    MissingCredentials,

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl MexcError {
    /// Check if the error came from the exchange or the HTTP layer talking to it
    pub fn is_api_error(&self) -> bool {
        matches!(
            self,
            MexcError::Http(_) | MexcError::Api { .. } | MexcError::Status { .. }
        )
    }

    /// HTTP status attached to the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            MexcError::Status { status, .. } => Some(*status),
            MexcError::Http(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// Raw response body attached to the error, if any
    pub fn response_body(&self) -> Option<&str> {
        match self {
            MexcError::Status { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Response headers attached to the error, if any
    pub fn response_headers(&self) -> &[(String, String)] {
        match self {
            MexcError::Status { headers, .. } => headers,
            _ => &[],
        }
    }

    /// Create an API error from an envelope code and optional server message
    pub fn api_error(code: Option<i64>, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| "Unknown error".to_string());
        MexcError::Api { code, message }
    }

    /// Create a status error from a non-2xx response
    pub fn status_error(
        status: StatusCode,
        body: impl Into<String>,
        headers: Vec<(String, String)>,
    ) -> Self {
        MexcError::Status {
            status: status.as_u16(),
            body: body.into(),
            headers,
        }
    }
}

/// Result type alias for MEXC operations
pub type Result<T> = std::result::Result<T, MexcError>;
