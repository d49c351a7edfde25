//! Catalog API
//!
//! Product catalog CRUD plus user registration and token auth, backed by MongoDB.

pub mod api;
pub mod config;
pub mod openapi;
pub mod state;

use axum::Router;

pub use config::Config;
pub use state::AppState;

/// All routes with documentation, fallback and cross-cutting layers applied.
///
/// Trailing-slash trimming happens in `create_production_app`, outside this router.
pub fn build_app(state: &AppState) -> std::io::Result<Router> {
    axum_helpers::create_router::<openapi::ApiDoc>(api::routes(state), &state.config.server)
}
