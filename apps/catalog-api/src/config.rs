use axum_helpers::JwtConfig;
use core_config::{AppInfo, FromEnv, app_info, env_or_default, server::ServerConfig};
use database::mongodb::MongoConfig;
use domain_users::PasswordConfig;

pub use core_config::Environment;

/// Everything the service reads from the environment, loaded once at startup
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub mongodb: MongoConfig,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
    pub products_collection: String,
    pub users_collection: String,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let app = app_info!();
        let mongodb = MongoConfig::from_env()?.with_app_name(app.name);

        Ok(Self {
            app,
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?,
            mongodb,
            jwt: JwtConfig::from_env()?,
            password: PasswordConfig::from_env()?,
            products_collection: env_or_default("PRODUCTS_COLLECTION", "products"),
            users_collection: env_or_default("USERS_COLLECTION", "users"),
        })
    }
}
