//! Error types for hrdash.

use thiserror::Error;

/// Message the upstream API uses for endpoints a provider does not support.
pub const NOT_IMPLEMENTED_MESSAGE: &str = "Not Implemented";

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Failures talking to the sandbox aggregation API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection failed, timed out, or the request could not be sent
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response. `message` is the `message` field of the error body, if any.
    #[error("API error {status}: {}", message.as_deref().unwrap_or("no message"))]
    Status { status: u16, message: Option<String> },

    /// Response body did not match the expected shape
    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("no access token in sandbox response")]
    MissingToken,

    #[error("company response has no id")]
    MissingCompanyId,

    #[error("empty individual response")]
    EmptyResponse,
}

impl ApiError {
    /// True when the upstream reported the endpoint as unsupported for this provider.
    pub fn is_not_implemented(&self) -> bool {
        matches!(
            self,
            Self::Status { message: Some(m), .. } if m == NOT_IMPLEMENTED_MESSAGE
        )
    }
}

/// Structural problems in a provider's department list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DepartmentError {
    /// The named department is its own ancestor.
    #[error("department '{name}' is its own ancestor")]
    Cycle { name: String },
}
