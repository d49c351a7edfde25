//! HTTP handlers for registration and authentication

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use axum_helpers::{
    AUTH_TOKEN_HEADER, ValidatedJson, bearer_value,
    errors::responses::{
        AlreadyExistsResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{AuthResponse, CredentialsRequest};
use crate::repository::UserRepository;
use crate::service::UserService;

#[derive(OpenApi)]
#[openapi(
    paths(register, authenticate),
    components(
        schemas(CredentialsRequest, AuthResponse),
        responses(
            BadRequestValidationResponse,
            AlreadyExistsResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Users", description = "Registration and token issuance")
    )
)]
pub struct ApiDoc;

pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/users", post(register))
        .route("/auth", post(authenticate))
        .with_state(shared_service)
}

/// Register a user and return its id; the token comes back in `X-auth-token`
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "User created", body = String,
            headers(("x-auth-token" = String, description = "Bearer token"))),
        (status = 400, response = AlreadyExistsResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<CredentialsRequest>,
) -> UserResult<impl IntoResponse> {
    let (id, token) = service.register(input).await?;
    Ok((
        StatusCode::CREATED,
        [(AUTH_TOKEN_HEADER, bearer_value(&token))],
        Json(id.to_hex()),
    ))
}

/// Check credentials and issue a fresh token in `X-auth-token`
#[utoipa::path(
    post,
    path = "/auth",
    tag = "Users",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = AuthResponse,
            headers(("x-auth-token" = String, description = "Bearer token"))),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn authenticate<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<CredentialsRequest>,
) -> UserResult<impl IntoResponse> {
    let (response, token) = service.authenticate(input).await?;
    Ok(([(AUTH_TOKEN_HEADER, bearer_value(&token))], Json(response)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use crate::repository::MockUserRepository;
    use crate::service::tests::{hasher, jwt};
    use axum::{
        body::Body,
        http::{Request, header},
        response::Response,
    };
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app(repo: MockUserRepository) -> Router {
        router(UserService::new(repo, hasher(), jwt()))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn token_header(response: &Response) -> String {
        response
            .headers()
            .get(AUTH_TOKEN_HEADER)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string()
    }

    const CREDENTIALS: &str = r#"{"username":"a@b.com","password":"password1"}"#;

    #[tokio::test]
    async fn test_register_returns_id_and_token() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_insert().returning(|u| Ok(u.id));

        let response = app(repo).oneshot(post_json("/users", CREDENTIALS)).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let token = token_header(&response);
        let token = token.strip_prefix("Bearer ").unwrap();
        assert_eq!(jwt().verify_token(token).unwrap().user_id, "a@b.com");

        let id = json_body(response).await;
        assert_eq!(id.as_str().unwrap().len(), 24);
    }

    #[tokio::test]
    async fn test_register_duplicate_is_bad_request() {
        let existing = User::new("a@b.com".into(), "hash".into());
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(move |_| Ok(Some(existing.clone())));

        let response = app(repo).oneshot(post_json("/users", CREDENTIALS)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "ALREADY_EXISTS");
        assert_eq!(body["message"], "User already exists");
    }

    #[tokio::test]
    async fn test_register_invalid_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().never();

        let response = app(repo)
            .oneshot(post_json(
                "/users",
                r#"{"username":"not-an-email","password":"password1"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_authenticate_returns_username_only() {
        let stored = User::new("a@b.com".into(), hasher().hash("password1").unwrap());
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(move |_| Ok(Some(stored.clone())));

        let response = app(repo).oneshot(post_json("/auth", CREDENTIALS)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(token_header(&response).starts_with("Bearer "));
        assert_eq!(
            json_body(response).await,
            serde_json::json!({ "username": "a@b.com" })
        );
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password_is_unauthorized() {
        let stored = User::new("a@b.com".into(), hasher().hash("password2").unwrap());
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(move |_| Ok(Some(stored.clone())));

        let response = app(repo).oneshot(post_json("/auth", CREDENTIALS)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get(AUTH_TOKEN_HEADER).is_none());
        assert_eq!(json_body(response).await["message"], "Credentials invalid");
    }
}
