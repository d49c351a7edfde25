use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use mongodb::bson::oid::ObjectId;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product {0} not found")]
    NotFound(ObjectId),

    #[error("Invalid product: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid value {value:?} for filter '{key}'")]
    InvalidFilter { key: String, value: String },

    #[error("Database error: {0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => AppError::NotFound(format!("Product {} not found", id)),
            ProductError::Validation(errors) => AppError::ValidationError(errors),
            e @ ProductError::InvalidFilter { .. } => AppError::BadRequest(e.to_string()),
            ProductError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for ProductError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        ProductError::Database(format!("Failed to encode product: {}", err))
    }
}
