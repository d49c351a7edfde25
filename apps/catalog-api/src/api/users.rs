use axum::Router;
use domain_users::{MongoUserRepository, UserResult, UserService, handlers};

use crate::state::AppState;

fn repository(state: &AppState) -> MongoUserRepository {
    MongoUserRepository::new(&state.db, &state.config.users_collection)
}

pub fn router(state: &AppState) -> Router {
    let service = UserService::new(repository(state), state.hasher.clone(), state.jwt.clone());
    handlers::router(service)
}

/// Create the unique `username` index
pub async fn init_indexes(state: &AppState) -> UserResult<()> {
    repository(state).init_indexes().await
}
