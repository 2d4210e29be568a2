//! Server error types.

use allocation::AllocationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use resource_store::StoreError;
use serde_json::json;

/// Machine-readable error codes carried in every error response body.
pub mod error_codes {
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    pub const RESOURCE_NOT_FOUND: &str = "RESOURCE_NOT_FOUND";
    pub const AUTHENTICATION_REQUIRED: &str = "AUTHENTICATION_REQUIRED";
    pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
    pub const PERMISSION_DENIED: &str = "PERMISSION_DENIED";
    pub const ALREADY_EXISTS: &str = "ALREADY_EXISTS";
    pub const POLICY_DENIED: &str = "POLICY_DENIED";
    pub const ALLOCATION_CONFLICT: &str = "ALLOCATION_CONFLICT";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Invalid request parameters.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Authentication required.
    #[error("Authentication required")]
    AuthenticationRequired,

    /// Login failed. Deliberately does not say whether the email or the
    /// password was wrong.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Permission denied.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Advisory assignment check refused the request.
    #[error("{0}")]
    PolicyDenied(String),

    /// Store error.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Authentication error.
    #[error("Auth error: {0}")]
    Auth(#[from] auth::AuthError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AllocationError> for ServerError {
    fn from(err: AllocationError) -> Self {
        match err {
            AllocationError::Store(inner) => ServerError::Store(inner),
            other => ServerError::NotFound(other.to_string()),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            ServerError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, error_codes::INVALID_REQUEST, msg.clone())
            }
            ServerError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, error_codes::RESOURCE_NOT_FOUND, msg.clone())
            }
            ServerError::AuthenticationRequired => {
                (StatusCode::UNAUTHORIZED, error_codes::AUTHENTICATION_REQUIRED, "Authentication required".to_string())
            }
            ServerError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, error_codes::INVALID_CREDENTIALS, "Invalid credentials".to_string())
            }
            ServerError::PermissionDenied(msg) => {
                (StatusCode::FORBIDDEN, error_codes::PERMISSION_DENIED, msg.clone())
            }
            ServerError::PolicyDenied(msg) => {
                (StatusCode::BAD_REQUEST, error_codes::POLICY_DENIED, msg.clone())
            }
            ServerError::Store(e) => match e {
                StoreError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, error_codes::RESOURCE_NOT_FOUND, e.to_string())
                }
                StoreError::AlreadyExists { .. } => {
                    (StatusCode::BAD_REQUEST, error_codes::ALREADY_EXISTS, e.to_string())
                }
                StoreError::Validation(_) => {
                    (StatusCode::BAD_REQUEST, error_codes::INVALID_REQUEST, e.to_string())
                }
                StoreError::Conflict(_) => {
                    (StatusCode::CONFLICT, error_codes::ALLOCATION_CONFLICT, e.to_string())
                }
            },
            ServerError::Auth(e) => {
                (StatusCode::UNAUTHORIZED, error_codes::AUTHENTICATION_REQUIRED, e.to_string())
            }
            ServerError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR, msg.clone())
            }
        };

        let body = json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        });

        (status, Json(body)).into_response()
    }
}

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
