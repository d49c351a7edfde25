//! End-to-end tests against a disposable MongoDB. Run with `cargo test -- --ignored`.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use axum_helpers::{AUTH_TOKEN_HEADER, JwtConfig};
use catalog_api::{AppState, Config, api, build_app, config::Environment};
use core_config::{app_info, server::ServerConfig};
use database::mongodb::MongoConfig;
use domain_users::PasswordConfig;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::{
    TestDataBuilder, TestMongo,
    assertions::{assert_object_id, assert_some},
};
use tower::ServiceExt;

struct TestApp {
    _mongo: TestMongo,
    router: Router,
}

impl TestApp {
    async fn new(test_name: &str) -> Self {
        let mongo = TestMongo::new().await;
        let builder = TestDataBuilder::from_test_name(test_name);

        let config = Config {
            app: app_info!(),
            environment: Environment::Development,
            server: ServerConfig::default(),
            mongodb: MongoConfig::new(mongo.connection_string(), builder.name("db", "catalog")),
            jwt: JwtConfig::new("end-to-end-test-secret-0123456789abcdef").unwrap(),
            password: PasswordConfig {
                memory_kib: 1024,
                iterations: 1,
                parallelism: 1,
            },
            products_collection: "products".into(),
            users_collection: "users".into(),
        };

        let state = AppState::new(config, mongo.client()).unwrap();
        api::users::init_indexes(&state).await.unwrap();
        let router = build_app(&state).unwrap();

        Self {
            _mongo: mongo,
            router,
        }
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Register a user and return the `X-auth-token` header value
    async fn register(&self, username: &str, password: &str) -> String {
        let response = self
            .send(json_request(
                "POST",
                "/users",
                None,
                json!({ "username": username, "password": password }),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        header_value(&response, AUTH_TOKEN_HEADER)
    }
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTH_TOKEN_HEADER, token);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn header_value(response: &Response, name: &str) -> String {
    response
        .headers()
        .get(name)
        .unwrap_or_else(|| panic!("missing {name} header"))
        .to_str()
        .unwrap()
        .to_string()
}

async fn json_body(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn product(name: &str, price: i64) -> Value {
    json!({
        "product_name": name,
        "price": price,
        "currency": "USD",
        "quantity": 10,
        "discount": 0,
        "vendor": "acme",
        "accessories": ["cable"],
        "is_essential": false
    })
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_register_then_authenticate() {
    let app = TestApp::new("test_register_then_authenticate").await;

    let response = app
        .send(json_request(
            "POST",
            "/users",
            None,
            json!({ "username": "a@b.com", "password": "password1" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(header_value(&response, AUTH_TOKEN_HEADER).starts_with("Bearer "));
    let id = json_body(response).await;
    assert_object_id(id.as_str().unwrap(), "registered user id");

    let response = app
        .send(json_request(
            "POST",
            "/auth",
            None,
            json!({ "username": "a@b.com", "password": "password1" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(header_value(&response, AUTH_TOKEN_HEADER).starts_with("Bearer "));
    assert_eq!(json_body(response).await, json!({ "username": "a@b.com" }));

    let response = app
        .send(json_request(
            "POST",
            "/auth",
            None,
            json!({ "username": "a@b.com", "password": "password2" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_duplicate_registration_is_rejected() {
    let app = TestApp::new("test_duplicate_registration_is_rejected").await;
    app.register("dup@b.com", "password1").await;

    let response = app
        .send(json_request(
            "POST",
            "/users",
            None,
            json!({ "username": "dup@b.com", "password": "password9" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "ALREADY_EXISTS");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_product_lifecycle() {
    let app = TestApp::new("test_product_lifecycle").await;
    let token = app.register("seller@b.com", "password1").await;

    let response = app
        .send(json_request(
            "POST",
            "/products",
            Some(&token),
            json!([product("laptop", 30000), product("tivi", 4000)]),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let ids = json_body(response).await;
    let ids: Vec<String> = assert_some(ids.as_array(), "created ids")
        .iter()
        .map(|id| assert_some(id.as_str(), "created id").to_string())
        .collect();
    assert_eq!(ids.len(), 2);
    let laptop_id = ids[0].clone();

    for (name, id) in [("laptop", &ids[0]), ("tivi", &ids[1])] {
        assert_object_id(id, name);
        let response = app.send(get(&format!("/products?product_name={name}"))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let found = json_body(response).await;
        let found = assert_some(found.as_array(), "product list");
        assert_eq!(found.len(), 1, "exactly one {name}");
        assert_eq!(found[0]["_id"], id.as_str());
        assert_eq!(found[0]["product_name"], name);
    }

    let response = app.send(get("/products?price=4000")).await;
    assert_eq!(json_body(response).await[0]["product_name"], "tivi");

    let uri = format!("/products/{laptop_id}");
    let response = app
        .send(json_request("PUT", &uri, Some(&token), json!({ "quantity": 3 })))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let merged = json_body(response).await;
    assert_eq!(merged["quantity"], 3);
    assert_eq!(merged["price"], 30000);
    assert_eq!(merged["vendor"], "acme");

    let response = app.send(get(&uri)).await;
    assert_eq!(json_body(response).await["quantity"], 3);

    let response = app
        .send(json_request("DELETE", &uri, Some(&token), Value::Null))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, 1);

    let response = app
        .send(json_request("DELETE", &uri, Some(&token), Value::Null))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.send(get(&uri)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_writes_require_token() {
    let app = TestApp::new("test_writes_require_token").await;

    let response = app
        .send(json_request("POST", "/products", None, json!([product("x", 1)])))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .send(json_request(
            "POST",
            "/products",
            Some("Bearer not.a.token"),
            json!([product("x", 1)]),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.send(get("/products")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!([]));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_readiness_reports_mongodb() {
    let app = TestApp::new("test_readiness_reports_mongodb").await;

    let response = app.send(get("/ready")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["mongodb"], "connected");

    let response = app.send(get("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
}
