pub mod app_config;
pub mod cart;
pub mod config;
pub mod notify;
pub mod products;
pub mod selections;

pub use app_config::{AppConfig, Environment};
pub use cart::{CartLineItem, CartTotals};
pub use config::{load_app_config, load_app_config_from_env};
pub use notify::{Notifier, SubscriptionId};
pub use products::{Mode, ModeFlags, ProductInfo, ProductRecord};
pub use selections::{FilterField, FilterSelections, InterfaceTypeMatching, SetsRange};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
