pub mod app_config;
pub mod config;
pub mod identifier;
pub mod offer;
pub mod summary;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use identifier::{collect_product_ids, parse_product_ids, ProductId};
pub use offer::{ClassificationStatus, ClassifiedRecord, MerchantInfo, Party};
pub use summary::{format_read_time, BatchSummary};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
