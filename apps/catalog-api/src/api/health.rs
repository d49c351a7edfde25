//! Readiness endpoint

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use serde_json::Value;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Readiness check: pings MongoDB
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Dependencies reachable",
            example = json!({ "status": "ready", "mongodb": "connected" })),
        (status = 503, description = "MongoDB unreachable",
            example = json!({ "status": "not ready", "mongodb": "disconnected" }))
    )
)]
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let mongodb: HealthCheckFuture<'_> = Box::pin(async {
        if database::mongodb::check_health(&state.mongo_client).await {
            Ok(())
        } else {
            Err("ping failed".to_string())
        }
    });

    run_health_checks(vec![("mongodb", mongodb)]).await
}
