use std::path::PathBuf;

use rust_decimal::Decimal;

use crate::selections::InterfaceTypeMatching;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// JSON file standing in for the browser's local storage.
    pub storage_path: PathBuf,
    /// Key the serialized cart lives under inside the storage.
    pub cart_key: String,
    /// Tax rate applied on the checkout summary, e.g. `0.1415`.
    pub tax_rate: Decimal,
    pub checkout_path: String,
    pub browse_path: String,
    pub interface_type_matching: InterfaceTypeMatching,
}
