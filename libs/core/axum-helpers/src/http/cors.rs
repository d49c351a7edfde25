use crate::auth::AUTH_TOKEN_HEADER;
use crate::http::REQUEST_ID_HEADER;
use axum::http::{HeaderName, HeaderValue, Method, header};
use std::io;
use std::time::Duration;
use tower_http::cors::CorsLayer;

/// Creates a CORS layer for the configured origins.
///
/// Returns `Ok(None)` when no origin is configured, in which case no CORS
/// headers are emitted at all. The token header is both accepted and exposed
/// so browser clients can read the token issued on register/login.
pub fn create_cors_layer(allowed_origins: &[String]) -> io::Result<Option<CorsLayer>> {
    if allowed_origins.is_empty() {
        return Ok(None);
    }

    let origins = allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("invalid CORS origin {origin:?}: {e}"),
                )
            })
        })
        .collect::<io::Result<Vec<_>>>()?;

    let token_header = HeaderName::from_static(AUTH_TOKEN_HEADER);
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

    let layer = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            token_header.clone(),
            request_id_header.clone(),
        ])
        .expose_headers([token_header, request_id_header])
        .max_age(Duration::from_secs(3600));

    Ok(Some(layer))
}
