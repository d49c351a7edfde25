use axum::Router;
use domain_products::{MongoProductRepository, ProductService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoProductRepository::new(&state.db, &state.config.products_collection);
    handlers::router(ProductService::new(repository), state.jwt.clone())
}
