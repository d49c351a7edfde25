//! HTTP handlers for Products API

use axum::{
    extract::{DefaultBodyLimit, Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestObjectIdResponse, BadRequestValidationResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, PayloadTooLargeResponse,
        UnauthorizedResponse,
    },
    jwt_auth_middleware, require_authorized, JwtAuth, ObjectIdPath, ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{CreateProduct, ProductBatch, ProductFilter, ProductResponse, UpdateProduct};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// Body cap for write routes
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_products,
        get_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(ProductResponse, CreateProduct, UpdateProduct),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestObjectIdResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            PayloadTooLargeResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router.
///
/// Reads are open. Create and update need a valid bearer token; delete also
/// needs the token's `authorized` claim.
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>, auth: JwtAuth) -> Router {
    let shared_service = Arc::new(service);
    let authenticated = || middleware::from_fn_with_state(auth.clone(), jwt_auth_middleware);

    Router::new()
        .route(
            "/products",
            get(list_products).merge(
                post(create_products)
                    .route_layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
                    .route_layer(authenticated()),
            ),
        )
        .route(
            "/products/{id}",
            get(get_product)
                .merge(
                    put(update_product)
                        .route_layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
                        .route_layer(authenticated()),
                )
                .merge(
                    axum::routing::delete(delete_product)
                        .route_layer(middleware::from_fn(require_authorized))
                        .route_layer(authenticated()),
                ),
        )
        .with_state(shared_service)
}

/// List products, filtering by equality on any query parameter
#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    params(
        ("product_name" = Option<String>, Query, description = "Exact product name"),
        ("vendor" = Option<String>, Query, description = "Exact vendor"),
        ("price" = Option<i64>, Query, description = "Exact price in minor units"),
        ("is_essential" = Option<bool>, Query, description = "Essential flag"),
        ("_id" = Option<String>, Query, description = "Product ObjectId")
    ),
    responses(
        (status = 200, description = "Matching products", body = Vec<ProductResponse>),
        (status = 400, description = "Query value does not match the field type"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(params): Query<Vec<(String, String)>>,
) -> ProductResult<Json<Vec<ProductResponse>>> {
    let filter = ProductFilter::from_query(params)?;
    let products = service.list_products(filter).await?;
    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

/// Create a batch of products
#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    request_body = Vec<CreateProduct>,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Ids of the created products", body = Vec<String>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 413, response = PayloadTooLargeResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(batch): ValidatedJson<ProductBatch>,
) -> ProductResult<impl IntoResponse> {
    let ids = service.create_products(batch).await?;
    let ids: Vec<String> = ids.iter().map(|id| id.to_hex()).collect();
    Ok((StatusCode::CREATED, Json(ids)))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ObjectId")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> ProductResult<Json<ProductResponse>> {
    let product = service.get_product(id).await?;
    Ok(Json(product.into()))
}

/// Partially update a product
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ObjectId")
    ),
    request_body = UpdateProduct,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Merged product", body = ProductResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 413, response = PayloadTooLargeResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
    ValidatedJson(update): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<ProductResponse>> {
    let product = service.update_product(id, update).await?;
    Ok(Json(product.into()))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ObjectId")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Number of deleted products", body = u64),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> ProductResult<Json<u64>> {
    let deleted = service.delete_product(id).await?;
    Ok(Json(deleted))
}
