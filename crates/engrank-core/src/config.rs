use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_PROVIDER_BASE_URL: &str = "https://linkedin-api8.p.rapidapi.com";

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
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;
    use std::str::FromStr;

    fn parse_as<T>(var: &str, raw: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        raw.parse::<T>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    }

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let env = parse_environment(&or_default("ENGRANK_ENV", "development"))?;
    let bind_addr: SocketAddr =
        parse_as("ENGRANK_BIND_ADDR", &or_default("ENGRANK_BIND_ADDR", "0.0.0.0:3000"))?;
    let log_level = or_default("ENGRANK_LOG_LEVEL", "info");
    let scoring_path = PathBuf::from(or_default(
        "ENGRANK_SCORING_PATH",
        "./config/scoring.json",
    ));

    // An empty key is treated the same as an unset one.
    let rapidapi_key = lookup("RAPIDAPI_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());

    let provider_base_url = or_default("ENGRANK_PROVIDER_BASE_URL", DEFAULT_PROVIDER_BASE_URL);

    let request_timeout_secs = parse_as(
        "ENGRANK_REQUEST_TIMEOUT_SECS",
        &or_default("ENGRANK_REQUEST_TIMEOUT_SECS", "30"),
    )?;
    let inter_request_delay_ms = parse_as(
        "ENGRANK_INTER_REQUEST_DELAY_MS",
        &or_default("ENGRANK_INTER_REQUEST_DELAY_MS", "0"),
    )?;
    let max_retries = parse_as(
        "ENGRANK_MAX_RETRIES",
        &or_default("ENGRANK_MAX_RETRIES", "2"),
    )?;
    let retry_backoff_base_ms = parse_as(
        "ENGRANK_RETRY_BACKOFF_BASE_MS",
        &or_default("ENGRANK_RETRY_BACKOFF_BASE_MS", "1000"),
    )?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        scoring_path,
        rapidapi_key,
        provider_base_url,
        request_timeout_secs,
        inter_request_delay_ms,
        max_retries,
        retry_backoff_base_ms,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "ENGRANK_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
