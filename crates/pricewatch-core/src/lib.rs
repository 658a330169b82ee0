pub mod app_config;
pub mod config;
pub mod product;
pub mod stores;

use thiserror::Error;

pub use app_config::{AppConfig, DEFAULT_USER_AGENTS};
pub use config::{load_app_config, load_app_config_from_env};
pub use product::{PriceDirection, ProductChange, ProductInfo};
pub use stores::{StoreInfo, GENERIC_STORE_ID};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
