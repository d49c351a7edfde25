pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mongodb::bson::oid::Error as ObjectIdError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Standard error response structure.
///
/// ```json
/// {
///   "code": 1004,
///   "error": "NOT_FOUND",
///   "message": "Product 65f1c0a2e4b0a1b2c3d4e5f6 not found"
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Optional structured details (e.g. per-field validation errors)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_string(),
            message: message.into(),
            details: None,
        }
    }
}

/// Boundary error type: every domain error is converted into one of these,
/// and this is the only place where error kinds are mapped to HTTP statuses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Invalid ObjectId: {0}")]
    InvalidObjectId(#[from] ObjectIdError),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    /// Status, code, client message and optional details for this error.
    ///
    /// Server-side failures never leak their internal message to the client.
    fn parts(&self) -> (StatusCode, ErrorCode, String, Option<serde_json::Value>) {
        match self {
            AppError::JsonExtractorRejection(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ErrorCode::PayloadTooLarge,
                ErrorCode::PayloadTooLarge.default_message().to_string(),
                None,
            ),
            AppError::JsonExtractorRejection(e) => (
                StatusCode::BAD_REQUEST,
                ErrorCode::JsonExtraction,
                e.body_text(),
                None,
            ),
            AppError::ValidationError(e) => (
                StatusCode::BAD_REQUEST,
                ErrorCode::ValidationError,
                ErrorCode::ValidationError.default_message().to_string(),
                serde_json::to_value(e).ok(),
            ),
            AppError::InvalidObjectId(e) => (
                StatusCode::BAD_REQUEST,
                ErrorCode::InvalidObjectId,
                e.to_string(),
                None,
            ),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadRequest, msg.clone(), None)
            }
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized, msg.clone(), None)
            }
            AppError::Forbidden(msg) => {
                (StatusCode::FORBIDDEN, ErrorCode::Forbidden, msg.clone(), None)
            }
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, ErrorCode::NotFound, msg.clone(), None)
            }
            AppError::AlreadyExists(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorCode::AlreadyExists,
                msg.clone(),
                None,
            ),
            AppError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::DatabaseError,
                ErrorCode::DatabaseError.default_message().to_string(),
                None,
            ),
            AppError::InternalServerError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalError,
                ErrorCode::InternalError.default_message().to_string(),
                None,
            ),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.parts().0
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = self.parts();

        if status.is_server_error() {
            tracing::error!(error_code = code.code(), error = %self, "Request failed");
        } else {
            tracing::info!(error_code = code.code(), status = status.as_u16(), error = %self, "Request rejected");
        }

        let body = Json(ErrorResponse {
            details,
            ..ErrorResponse::new(code, message)
        });

        (status, body).into_response()
    }
}

/// Build an error response directly from a status and code.
pub fn error_response(status: StatusCode, message: impl Into<String>, code: ErrorCode) -> Response {
    (status, Json(ErrorResponse::new(code, message))).into_response()
}
