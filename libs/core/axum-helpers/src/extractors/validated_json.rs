//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// Malformed bodies reject as `JSON_EXTRACTION`, oversized bodies as
/// `PAYLOAD_TOO_LARGE`, and failed field rules as `VALIDATION_ERROR` with
/// per-field details.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::post;
/// use axum_helpers::extractors::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct Credentials {
///     #[validate(email)]
///     username: String,
///     #[validate(length(min = 8, max = 30))]
///     password: String,
/// }
///
/// async fn register(ValidatedJson(payload): ValidatedJson<Credentials>) -> String {
///     payload.username
/// }
///
/// let app: Router = Router::new().route("/users", post(register));
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}
