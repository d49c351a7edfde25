//! MongoDB connection management

mod config;
mod connector;
mod health;
mod indexes;

pub use config::MongoConfig;
pub use connector::{connect_from_config, connect_from_config_with_retry};
pub use health::check_health;
pub use indexes::ensure_unique_index;

pub use mongodb::{Client, Collection, Database};
