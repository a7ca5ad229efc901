use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

pub(crate) const DEFAULT_BASE_URL: &str = "https://www.apple.com.cn/shop/fulfillment-messages";
pub(crate) const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can feed a `HashMap` lookup
/// instead of calling `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_timeout = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        let secs = raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if secs == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "timeout must be at least 1 second".to_string(),
            });
        }
        Ok(secs)
    };

    let base_url = or_default("PICKUP_BASE_URL", DEFAULT_BASE_URL);
    let request_timeout_secs = parse_timeout("PICKUP_REQUEST_TIMEOUT_SECS", "10")?;
    let connect_timeout_secs = parse_timeout("PICKUP_CONNECT_TIMEOUT_SECS", "10")?;
    let user_agent = or_default("PICKUP_USER_AGENT", DEFAULT_USER_AGENT);
    let log_level = or_default("PICKUP_LOG_LEVEL", "warn");
    let catalog_path = lookup("PICKUP_CATALOG_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    Ok(AppConfig {
        base_url,
        request_timeout_secs,
        connect_timeout_secs,
        user_agent,
        log_level,
        catalog_path,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
