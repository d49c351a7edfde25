//! Custom extractors for Axum handlers.
//!
//! Both extractors reject with [`AppError`](crate::errors::AppError) so failures
//! render the same error body as every other handler error.

pub mod object_id_path;
pub mod validated_json;

pub use object_id_path::ObjectIdPath;
pub use validated_json::ValidatedJson;
