use super::jwt::{AUTH_TOKEN_HEADER, JwtAuth, JwtClaims};
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};

/// Bearer token from `X-auth-token`, falling back to `Authorization`
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    [AUTH_TOKEN_HEADER, header::AUTHORIZATION.as_str()]
        .into_iter()
        .filter_map(|name| headers.get(name))
        .filter_map(|value| value.to_str().ok())
        .find_map(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Rejects requests without a valid, unexpired bearer token.
///
/// On success the decoded [`JwtClaims`] are inserted into the request extensions.
pub async fn jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(request.headers())
        .ok_or_else(|| AppError::Unauthorized("No token provided".to_string()))?;

    let claims = auth.verify_token(token).map_err(|e| {
        tracing::debug!(error = %e, "JWT verification failed");
        AppError::Unauthorized("Invalid token".to_string())
    })?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Requires the `authorized` claim. Must run inside [`jwt_auth_middleware`].
pub async fn require_authorized(request: Request, next: Next) -> Result<Response, AppError> {
    let claims = request
        .extensions()
        .get::<JwtClaims>()
        .ok_or_else(|| AppError::Unauthorized("No token provided".to_string()))?;

    if !claims.authorized {
        tracing::debug!(user_id = %claims.user_id, "Token lacks the authorized claim");
        return Err(AppError::Forbidden("Not authorized".to_string()));
    }

    Ok(next.run(request).await)
}
