use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use crate::http::{
    REQUEST_ID_HEADER, create_cors_layer, propagate_request_id_layer, security_headers,
    set_request_id_layer,
};
use axum::{Router, ServiceExt, extract::Request, middleware};
use core_config::server::ServerConfig;
use std::future::{Future, IntoFuture};
use std::io;
use std::time::Duration;
use tower::Layer;
use tower_http::compression::CompressionLayer;
use tower_http::normalize_path::NormalizePathLayer;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;

/// Creates the application router with documentation and cross-cutting layers.
///
/// - OpenAPI documentation (Swagger UI, ReDoc, RapiDoc, Scalar)
/// - API routes merged at the root
/// - Request tracing with a span per request carrying the `X-Request-Id`
/// - Correlation id generation and propagation
/// - Security headers, optional CORS, response compression
/// - JSON 404 fallback
///
/// Domain routers apply their own state before being passed in.
///
/// # Errors
/// Returns an error if a configured CORS origin is not a valid header value.
pub fn create_router<T>(apis: Router, server_config: &ServerConfig) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    use utoipa_rapidoc::RapiDoc;
    use utoipa_redoc::{Redoc, Servable as RedocServable};
    use utoipa_scalar::{Scalar, Servable as ScalarServable};
    use utoipa_swagger_ui::SwaggerUi;

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request| {
            let request_id = request
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("-");
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id,
            )
        })
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let mut router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .merge(apis)
        .fallback(not_found)
        .layer(trace_layer)
        .layer(propagate_request_id_layer())
        .layer(set_request_id_layer())
        .layer(middleware::from_fn(security_headers));

    match create_cors_layer(&server_config.cors_allowed_origins)? {
        Some(cors) => {
            info!(origins = ?server_config.cors_allowed_origins, "CORS enabled");
            router = router.layer(cors);
        }
        None => info!("CORS_ALLOWED_ORIGIN not set, CORS disabled"),
    }

    Ok(router.layer(CompressionLayer::new()))
}

/// Serves `router` until SIGINT/SIGTERM, then drains and runs `cleanup`.
///
/// Trailing slashes are trimmed before routing. After the signal, in-flight
/// requests get `shutdown_timeout` to finish; `cleanup` then gets the same
/// budget before it is abandoned.
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (coordinator, mut server_rx) = ShutdownCoordinator::new();
    let mut drain_rx = coordinator.subscribe();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let signal_handle = {
        let coordinator = coordinator.clone();
        tokio::spawn(async move { coordinator.wait_for_signal().await })
    };

    let app = NormalizePathLayer::trim_trailing_slash().layer(router);
    let server = axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(async move {
            let _ = server_rx.recv().await;
        })
        .into_future();

    let drain_deadline = async move {
        let _ = drain_rx.recv().await;
        tokio::time::sleep(shutdown_timeout).await;
    };

    let serve_result = tokio::select! {
        result = server => result.inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        }),
        _ = drain_deadline => {
            warn!(?shutdown_timeout, "In-flight requests did not drain in time, forcing shutdown");
            Ok(())
        }
    };

    signal_handle.abort();

    info!(?shutdown_timeout, "Starting cleanup tasks");
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed successfully"),
        Err(_) => warn!(?shutdown_timeout, "Cleanup exceeded timeout, forcing shutdown"),
    }

    serve_result
}
