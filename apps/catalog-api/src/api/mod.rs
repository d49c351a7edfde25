//! HTTP routes, all mounted at the root

pub mod health;
pub mod products;
pub mod users;

use axum::Router;
use axum_helpers::health_router;

use crate::state::AppState;

pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(products::router(state))
        .merge(users::router(state))
        .merge(health_router(state.config.app))
        .merge(health::router(state.clone()))
}
