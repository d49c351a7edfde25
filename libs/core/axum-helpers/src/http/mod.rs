//! HTTP middleware module.
//!
//! - CORS configuration
//! - Security headers
//! - Correlation ids (`X-Request-Id`)
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::http::{create_cors_layer, security_headers};
//!
//! let mut app = Router::new().layer(axum::middleware::from_fn(security_headers));
//! if let Some(cors) = create_cors_layer(&config.cors_allowed_origins)? {
//!     app = app.layer(cors);
//! }
//! ```

pub mod cors;
pub mod request_id;
pub mod security;

pub use cors::create_cors_layer;
pub use request_id::{REQUEST_ID_HEADER, propagate_request_id_layer, set_request_id_layer};
pub use security::security_headers;
