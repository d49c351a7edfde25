use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::DatabaseError;
use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;
use validator::ValidationErrors;

/// MongoDB server code for a unique index violation
const DUPLICATE_KEY: i32 = 11000;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User {0} already exists")]
    AlreadyExists(String),

    #[error("Credentials invalid")]
    InvalidCredentials,

    #[error("Invalid credentials payload: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Token signing failed: {0}")]
    Token(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    /// Map a write error, recognising a unique-index violation on `username`
    pub fn from_write(err: mongodb::error::Error, username: &str) -> Self {
        match err.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY => {
                UserError::AlreadyExists(username.to_string())
            }
            _ => err.into(),
        }
    }
}

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::AlreadyExists(_) => AppError::AlreadyExists("User already exists".into()),
            e @ UserError::InvalidCredentials => AppError::Unauthorized(e.to_string()),
            UserError::Validation(errors) => AppError::ValidationError(errors),
            e @ (UserError::PasswordHash(_) | UserError::Token(_)) => {
                AppError::InternalServerError(e.to_string())
            }
            UserError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        UserError::Database(err.to_string())
    }
}

impl From<DatabaseError> for UserError {
    fn from(err: DatabaseError) -> Self {
        UserError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (UserError::AlreadyExists("a@b.com".into()), StatusCode::BAD_REQUEST),
            (UserError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (UserError::PasswordHash("bad salt".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (UserError::Token("bad key".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (UserError::Database("down".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status(), status);
        }
    }

    #[test]
    fn test_non_duplicate_write_error_is_database_error() {
        let err = mongodb::error::Error::from(std::io::Error::other("socket closed"));
        assert!(matches!(
            UserError::from_write(err, "a@b.com"),
            UserError::Database(_)
        ));
    }
}
