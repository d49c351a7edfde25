//! ObjectId path parameter extractor.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use mongodb::bson::oid::ObjectId;

/// Extractor for a single 24-hex-digit ObjectId path parameter.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::get;
/// use axum_helpers::extractors::ObjectIdPath;
///
/// async fn get_product(ObjectIdPath(id): ObjectIdPath) -> String {
///     id.to_hex()
/// }
///
/// let app: Router = Router::new().route("/products/{id}", get(get_product));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ObjectIdPath(pub ObjectId);

impl<S> FromRequestParts<S> for ObjectIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        let oid = ObjectId::parse_str(&id)?;
        Ok(ObjectIdPath(oid))
    }
}
