//! Session-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, SessionId, ValidationError};

/// Errors surfaced by the session and event services.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Session was not found.
    #[error("Session not found: {0}")]
    NotFound(String),

    /// Client-caused input error; never reaches storage. `code` is one of
    /// the validation codes.
    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed {
        code: ErrorCode,
        field: String,
        message: String,
    },

    /// A storage call exceeded its deadline.
    #[error("Storage operation timed out after {0}s")]
    Timeout(u64),

    /// Storage or other infrastructure failure.
    #[error("Error: {0}")]
    Infrastructure(String),
}

impl SessionError {
    pub fn not_found(id: &SessionId) -> Self {
        SessionError::NotFound(id.to_string())
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SessionError::ValidationFailed {
            code: ErrorCode::ValidationFailed,
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        SessionError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::NotFound(_) => ErrorCode::SessionNotFound,
            SessionError::ValidationFailed { code, .. } => *code,
            SessionError::Timeout(_) => ErrorCode::Timeout,
            SessionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<ValidationError> for SessionError {
    fn from(err: ValidationError) -> Self {
        let field = err.field().to_string();
        let message = match &err {
            ValidationError::InvalidFormat { reason, .. } => reason.clone(),
            other => other.to_string(),
        };
        SessionError::ValidationFailed {
            code: err.code(),
            field,
            message,
        }
    }
}

impl From<DomainError> for SessionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::SessionNotFound => SessionError::NotFound(
                err.details
                    .get("session_id")
                    .cloned()
                    .unwrap_or_else(|| err.message.clone()),
            ),
            code if code.is_validation() => SessionError::ValidationFailed {
                code,
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::Timeout => SessionError::Timeout(
                err.details
                    .get("timeout_secs")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_default(),
            ),
            _ => SessionError::Infrastructure(err.to_string()),
        }
    }
}
