//! Standardized API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Success response for a contact submission.
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
    pub id: Uuid,
}

impl SubmitResponse {
    pub fn created(id: Uuid, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            id,
        }
    }
}

/// Envelope for single-object and statistics responses.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Envelope for paginated listings.
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub pagination: store::Pagination,
}

impl<T> From<store::Page<T>> for ListResponse<T> {
    fn from(page: store::Page<T>) -> Self {
        Self {
            success: true,
            data: page.data,
            pagination: page.pagination,
        }
    }
}

/// Envelope for the public portfolio listing, which also carries the
/// distinct filter values.
#[derive(Debug, Serialize)]
pub struct PortfolioListResponse {
    pub success: bool,
    pub data: Vec<intake_core::PortfolioItem>,
    pub pagination: store::Pagination,
    pub filters: store::PortfolioFilters,
}

impl From<store::PortfolioListing> for PortfolioListResponse {
    fn from(listing: store::PortfolioListing) -> Self {
        Self {
            success: true,
            data: listing.page.data,
            pagination: listing.page.pagination,
            filters: listing.filters,
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub store_connected: bool,
    pub submissions_received: u64,
    pub rate_limited: u64,
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
    /// Seconds to wait, present only on 429s.
    #[serde(rename = "retryAfter", skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            details: None,
            retry_after: None,
        }
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = Some(details);
        self
    }
}

/// API error with stable codes and HTTP mapping.
pub struct ApiError {
    pub status: StatusCode,
    pub response: ErrorResponse,
}

impl ApiError {
    pub fn with_code(status: StatusCode, code: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            status,
            response: ErrorResponse::new(msg, code),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::with_code(StatusCode::BAD_REQUEST, "VALID_001", msg)
    }

    pub fn validation(fields: Vec<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            response: ErrorResponse::new("Validation failed", "VALID_002").with_details(fields),
        }
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::with_code(StatusCode::UNAUTHORIZED, "AUTH_001", msg)
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::with_code(StatusCode::NOT_FOUND, "NOT_FOUND", msg)
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::with_code(StatusCode::CONFLICT, "CONFLICT_001", msg)
    }

    pub fn rate_limited(retry_after_secs: u64) -> Self {
        let mut response = ErrorResponse::new(
            "Too many requests. Please try again later.",
            "RATE_001",
        );
        response.retry_after = Some(retry_after_secs);
        Self {
            status: StatusCode::TOO_MANY_REQUESTS,
            response,
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_code(StatusCode::INTERNAL_SERVER_ERROR, "DB_001", msg)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let retry_after = self.response.retry_after;
        let mut response = (self.status, Json(self.response)).into_response();

        // Add Retry-After header for rate limit responses
        if let Some(retry_after) = retry_after {
            if let Ok(value) = retry_after.to_string().parse() {
                response.headers_mut().insert("Retry-After", value);
            }
        }

        response
    }
}

impl From<intake_core::Error> for ApiError {
    fn from(err: intake_core::Error) -> Self {
        match err {
            intake_core::Error::RateLimited { retry_after_secs } => {
                ApiError::rate_limited(retry_after_secs)
            }
            intake_core::Error::ValidationFailed { fields } => ApiError::validation(fields),
            intake_core::Error::InvalidPayload(msg) => ApiError::bad_request(msg),
            intake_core::Error::Conflict { field, value } => {
                ApiError::conflict(format!("{} '{}' already exists", field, value))
            }
            intake_core::Error::NotFound(what) => {
                ApiError::not_found(format!("{} not found", what))
            }
            intake_core::Error::Serialization(e) => ApiError::bad_request(e.to_string()),
            other => ApiError::internal(other.to_string()),
        }
    }
}
