//! Token-based authentication and authorization.
//!
//! - [`JwtAuth`] issues and verifies HS256 tokens carrying [`JwtClaims`]
//! - [`jwt_auth_middleware`] rejects requests without a valid bearer token (401)
//! - [`require_authorized`] additionally rejects tokens whose `authorized` claim is not set (403)
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, middleware, routing::delete};
//! use axum_helpers::auth::{JwtAuth, JwtConfig, jwt_auth_middleware, require_authorized};
//! use core_config::FromEnv;
//!
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//!
//! // Layers run outermost-last, so the token is checked before the claim.
//! let routes = Router::new().route(
//!     "/products/{id}",
//!     delete(handler)
//!         .route_layer(middleware::from_fn(require_authorized))
//!         .route_layer(middleware::from_fn_with_state(auth, jwt_auth_middleware)),
//! );
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;

pub use config::JwtConfig;
pub use jwt::{ACCESS_TOKEN_TTL, AUTH_TOKEN_HEADER, JwtAuth, JwtClaims, bearer_value};
pub use middleware::{jwt_auth_middleware, require_authorized};
