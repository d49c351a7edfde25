//! Users Domain
//!
//! Registration and credential checks backed by MongoDB. Passwords are stored
//! as Argon2id PHC strings; successful calls return a signed token in the
//! `X-auth-token` response header.
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_users::{handlers, MongoUserRepository, PasswordConfig, PasswordHasher, UserService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("catalog");
//!
//! let repository = MongoUserRepository::new(&db, "users");
//! repository.init_indexes().await?;
//!
//! let hasher = PasswordHasher::new(&PasswordConfig::default())?;
//! let auth = JwtAuth::new(&JwtConfig::new("a-signing-secret-of-at-least-32-chars")?);
//! let router = handlers::router(UserService::new(repository, hasher, auth));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod password;
pub mod repository;
pub mod service;

pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{AuthResponse, CredentialsRequest, User};
pub use mongodb::MongoUserRepository;
pub use password::{PasswordConfig, PasswordHasher};
pub use repository::UserRepository;
pub use service::UserService;
