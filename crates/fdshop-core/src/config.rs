use crate::app_config::{AppConfig, Environment};
use crate::selections::InterfaceTypeMatching;
use crate::ConfigError;

/// Storage key the page scripts have always used for the cart.
pub const DEFAULT_CART_KEY: &str = "webflow_shopping_cart";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use rust_decimal::Decimal;
    use std::path::PathBuf;
    use std::str::FromStr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let env = parse_environment(&or_default("FDSHOP_ENV", "development"))?;
    let log_level = or_default("FDSHOP_LOG_LEVEL", "info");
    let storage_path = PathBuf::from(or_default("FDSHOP_STORAGE_PATH", "./.fdshop/storage.json"));
    let cart_key = or_default("FDSHOP_CART_KEY", DEFAULT_CART_KEY);

    let raw_tax = or_default("FDSHOP_TAX_RATE", "0.1415");
    let tax_rate = Decimal::from_str(raw_tax.trim()).map_err(|e| ConfigError::InvalidEnvVar {
        var: "FDSHOP_TAX_RATE".to_string(),
        reason: e.to_string(),
    })?;
    if tax_rate.is_sign_negative() {
        return Err(ConfigError::InvalidEnvVar {
            var: "FDSHOP_TAX_RATE".to_string(),
            reason: format!("tax rate must not be negative, got {tax_rate}"),
        });
    }

    let checkout_path = or_default("FDSHOP_CHECKOUT_PATH", "/submit-test-set-card");
    let browse_path = or_default("FDSHOP_BROWSE_PATH", "/merchant-test-cards");
    let interface_type_matching =
        parse_interface_type_matching(&or_default("FDSHOP_INTERFACE_TYPE_MATCHING", "any-of"))?;

    Ok(AppConfig {
        env,
        log_level,
        storage_path,
        cart_key,
        tax_rate,
        checkout_path,
        browse_path,
        interface_type_matching,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "FDSHOP_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

fn parse_interface_type_matching(s: &str) -> Result<InterfaceTypeMatching, ConfigError> {
    match s {
        "any-of" => Ok(InterfaceTypeMatching::AnyOf),
        "joined" => Ok(InterfaceTypeMatching::Joined),
        other => Err(ConfigError::InvalidEnvVar {
            var: "FDSHOP_INTERFACE_TYPE_MATCHING".to_string(),
            reason: format!("expected 'any-of' or 'joined', got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
