//! MongoDB connector, startup retry and index helpers
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::mongodb::{MongoConfig, connect_from_config_with_retry};
//!
//! let config = MongoConfig::from_env()?;
//! let client = connect_from_config_with_retry(&config, None).await?;
//! let db = client.database(config.database());
//! ```

pub mod common;
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult};
