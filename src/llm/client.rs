use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while talking to the model backend
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Model backend credential not set (expected in ${0})")]
    MissingCredential(String),

    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    NetworkError(reqwest::Error),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::Timeout
        } else {
            GatewayError::NetworkError(err)
        }
    }
}

/// Request/response model backend
///
/// Implementations send one prompt and return the model's text unmodified.
/// They do not retry.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError>;
}
