//! Shared application state, built once at startup and cloned into routers.

use axum_helpers::JwtAuth;
use domain_users::PasswordHasher;
use mongodb::{Client, Database};

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Shares its connection pool across clones
    pub mongo_client: Client,
    pub db: Database,
    pub jwt: JwtAuth,
    pub hasher: PasswordHasher,
}

impl AppState {
    /// Fails when the password cost parameters are rejected by Argon2
    pub fn new(config: Config, mongo_client: Client) -> eyre::Result<Self> {
        let db = mongo_client.database(config.mongodb.database());
        let jwt = JwtAuth::new(&config.jwt);
        let hasher = PasswordHasher::new(&config.password)?;

        Ok(Self {
            config,
            mongo_client,
            db,
            jwt,
            hasher,
        })
    }
}
