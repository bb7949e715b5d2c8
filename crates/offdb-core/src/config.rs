use std::str::FromStr;

use crate::app_config::AppConfig;
use crate::ConfigError;

pub(crate) const DEFAULT_OFF_BASE_URL: &str = "https://world.openfoodfacts.org";

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
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let present = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let or_default =
        |var: &str, default: &str| -> String { present(var).unwrap_or_else(|| default.to_string()) };

    let database_url = present("DATABASE_URL").or_else(|| present("POSTGRES_URL"));
    let off_user_agent = present("OFF_USER_AGENT");

    let off_base_url = or_default("OFFDB_OFF_BASE_URL", DEFAULT_OFF_BASE_URL);
    let log_level = or_default("OFFDB_LOG_LEVEL", "info");

    let request_timeout_secs = parse_or(&present, "OFFDB_REQUEST_TIMEOUT_SECS", 30_u64)?;
    let page_size = parse_or(&present, "OFFDB_PAGE_SIZE", 20_usize)?;
    let db_max_connections = parse_or(&present, "OFFDB_DB_MAX_CONNECTIONS", 5_u32)?;
    let db_min_connections = parse_or(&present, "OFFDB_DB_MIN_CONNECTIONS", 1_u32)?;
    let db_acquire_timeout_secs = parse_or(&present, "OFFDB_DB_ACQUIRE_TIMEOUT_SECS", 10_u64)?;

    if page_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "OFFDB_PAGE_SIZE".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        database_url,
        off_user_agent,
        off_base_url,
        request_timeout_secs,
        page_size,
        log_level,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
    })
}

fn parse_or<T, P>(present: &P, var: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    P: Fn(&str) -> Option<String>,
{
    match present(var) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
