//! Unified error types for the intake service.
//!
//! Stable error codes surfaced in API responses:
//! - VALID_001: malformed payload
//! - VALID_002: required fields missing or invalid
//! - RATE_001: rate limit exceeded
//! - CONFLICT_001: uniqueness conflict (duplicate slug)
//! - DB_001: store failure

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the intake service.
#[derive(Debug, Error)]
pub enum Error {
    /// Request rejected by the admission gate. Always recoverable by
    /// waiting out the window.
    #[error("too many requests, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// Payload could not be parsed or a field value is malformed.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// Required fields missing or invalid for the declared form kind.
    /// Carries every violated field, not just the first.
    #[error("validation failed: {}", fields.join(", "))]
    ValidationFailed { fields: Vec<String> },

    /// Uniqueness conflict reported by the store.
    #[error("{field} '{value}' already exists")]
    Conflict { field: String, value: String },

    #[error("{0} not found")]
    NotFound(String),

    /// Store failure, passed through uninterpreted.
    #[error("store error: {0}")]
    Store(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn rate_limited(retry_after_secs: u64) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn invalid_payload(msg: impl Into<String>) -> Self {
        Self::InvalidPayload(msg.into())
    }

    pub fn validation(fields: Vec<String>) -> Self {
        Self::ValidationFailed { fields }
    }

    pub fn conflict(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Conflict {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the HTTP status code for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::RateLimited { .. } => 429,
            Self::InvalidPayload(_) => 400,
            Self::ValidationFailed { .. } => 400,
            Self::Conflict { .. } => 409,
            Self::NotFound(_) => 404,
            Self::Store(_) => 500,
            Self::Serialization(_) => 400,
            Self::Internal(_) => 500,
        }
    }

    /// Get the stable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::RateLimited { .. } => "RATE_001",
            Self::InvalidPayload(_) => "VALID_001",
            Self::ValidationFailed { .. } => "VALID_002",
            Self::Conflict { .. } => "CONFLICT_001",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Store(_) => "DB_001",
            Self::Serialization(_) => "VALID_001",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Retry hint in seconds, present only on rate limit rejections.
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Self::RateLimited { retry_after_secs } => Some(*retry_after_secs),
            _ => None,
        }
    }
}
