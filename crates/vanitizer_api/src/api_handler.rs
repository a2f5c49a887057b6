//! Shared API types and utilities
//!
//! Query and response types used across the endpoints, plus the error
//! response every failing handler renders.

use axum::{http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vanitizer_core::{ClassifyError, PredicateResult};

/// Query parameters for email-based endpoints
#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    /// Email address to screen (e.g., "asdf@koan.co")
    pub email: String,
}

/// Query parameters for domain-based endpoints
#[derive(Debug, Deserialize)]
pub struct DomainQuery {
    /// Domain to probe (e.g., "koan.co")
    pub domain: String,
}

/// Static-list classification of one address
#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub disposable: PredicateResult,
    pub free: PredicateResult,
    pub work: PredicateResult,
}

/// Registrable domain of one address
#[derive(Debug, Serialize)]
pub struct SubLevelDomainResponse {
    pub domain: String,
}

/// Error response structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    pub request_id: String,
    pub timestamp: String,
}

/// Result type for API handlers
pub type ApiResult<T> = Result<Json<T>, ApiError>;

/// API error types
#[derive(Debug)]
pub enum ApiError {
    InvalidInput(String),
    Classify(ClassifyError),
}

impl From<ClassifyError> for ApiError {
    fn from(err: ClassifyError) -> Self {
        ApiError::Classify(err)
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_code, message) = match self {
            ApiError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, "INVALID_INPUT".to_string(), msg),
            ApiError::Classify(err) => (
                StatusCode::BAD_REQUEST,
                err.code().to_string(),
                err.to_string(),
            ),
        };

        let error_response = ErrorResponse {
            error: message,
            error_code,
            request_id: new_request_id(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, Json(error_response)).into_response()
    }
}

pub fn new_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// Reject empty or oversized input before it reaches the core
pub fn check_input(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::InvalidInput(format!("{field} cannot be empty")));
    }
    if value.len() > MAX_INPUT_LENGTH {
        return Err(ApiError::InvalidInput(format!(
            "{field} too long (max {MAX_INPUT_LENGTH} characters)"
        )));
    }
    Ok(())
}

/// Longest accepted email address (RFC 5321 path limit)
pub const MAX_INPUT_LENGTH: usize = 254;
