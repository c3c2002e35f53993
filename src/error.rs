use std::io;
use thiserror::Error;

// Import module-level errors for AppError
use crate::action::ValidationFailure;
use crate::config::ConfigError;
use crate::dispatcher::DispatchError;
use crate::exec::GateError;
use crate::llm::GatewayError;

/// Top-level application error that wraps all module-specific errors
///
/// Each module keeps its own error type; they all convert into AppError via
/// `From` so the binary can use `?` throughout.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Model output error: {0}")]
    OutputFormat(#[from] ValidationFailure),

    #[error("{0}")]
    Gate(#[from] GateError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<DispatchError> for AppError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::Gateway(e) => AppError::Gateway(e),
            DispatchError::OutputFormat(e) => AppError::OutputFormat(e),
            DispatchError::Gate(e) => AppError::Gate(e),
        }
    }
}

/// Result type for application-level operations
pub type AppResult<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_errors_keep_their_kind() {
        let err: AppError = DispatchError::Gateway(GatewayError::Timeout).into();
        assert!(matches!(err, AppError::Gateway(GatewayError::Timeout)));

        let err: AppError = DispatchError::OutputFormat(ValidationFailure::NotJson {
            raw_text: "prose".to_string(),
        })
        .into();
        assert!(matches!(err, AppError::OutputFormat(_)));
    }

    #[test]
    fn test_display_includes_source() {
        let err = AppError::from(ConfigError::InvalidValue("bad".to_string()));
        assert_eq!(err.to_string(), "Configuration error: Invalid config value: bad");

        let err = AppError::from(GatewayError::MissingCredential("HF_API_TOKEN".to_string()));
        assert!(err.to_string().contains("$HF_API_TOKEN"));
    }
}
