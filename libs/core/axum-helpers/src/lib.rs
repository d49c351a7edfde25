//! # Axum Helpers
//!
//! Shared HTTP plumbing for the catalog services.
//!
//! ## Modules
//!
//! - **[`auth`]**: HS256 token issuing/verification and the bearer-token middleware
//! - **[`server`]**: Router assembly, health checks, graceful shutdown
//! - **[`http`]**: CORS, security headers, correlation ids
//! - **[`errors`]**: `AppError` and the structured error body
//! - **[`extractors`]**: `ValidatedJson`, `ObjectIdPath`
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::server::ServerConfig;
//! use std::time::Duration;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let config = ServerConfig::default();
//!     let router = create_router::<ApiDoc>(Router::new(), &config)?;
//!     create_production_app(router, &config, Duration::from_secs(30), async {}).await
//! }
//! ```

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{
    ACCESS_TOKEN_TTL, AUTH_TOKEN_HEADER, JwtAuth, JwtClaims, JwtConfig, bearer_value,
    jwt_auth_middleware, require_authorized,
};

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};

pub use http::{REQUEST_ID_HEADER, create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{ObjectIdPath, ValidatedJson};
