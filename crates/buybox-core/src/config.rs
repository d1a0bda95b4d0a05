use std::fmt::Display;
use std::str::FromStr;

use crate::app_config::{
    AppConfig, Environment, DEFAULT_BLOCKED_BACKOFF_BASE, DEFAULT_LOCALE,
    DEFAULT_MARKETPLACE_BASE_URL, DEFAULT_MAX_BLOCKED_CYCLES, DEFAULT_MAX_WORKERS,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_RETRIES_PER_CYCLE, DEFAULT_USER_AGENT,
};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
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
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let env = match lookup("BUYBOX_ENV") {
        Ok(raw) => parse_environment(&raw)?,
        Err(_) => Environment::Development,
    };
    let log_level = or_default("BUYBOX_LOG_LEVEL", "info");
    let marketplace_base_url = or_default("BUYBOX_MARKETPLACE_BASE_URL", DEFAULT_MARKETPLACE_BASE_URL)
        .trim_end_matches('/')
        .to_owned();
    let locale = or_default("BUYBOX_LOCALE", DEFAULT_LOCALE);
    let user_agent = or_default("BUYBOX_USER_AGENT", DEFAULT_USER_AGENT);

    let max_workers = parse_var(&lookup, "BUYBOX_MAX_WORKERS", DEFAULT_MAX_WORKERS)?;
    if max_workers == 0 {
        return Err(invalid("BUYBOX_MAX_WORKERS", "must be at least 1"));
    }

    let request_timeout_secs = parse_var(
        &lookup,
        "BUYBOX_REQUEST_TIMEOUT_SECS",
        DEFAULT_REQUEST_TIMEOUT_SECS,
    )?;
    if request_timeout_secs == 0 {
        return Err(invalid("BUYBOX_REQUEST_TIMEOUT_SECS", "must be at least 1"));
    }

    let retries_per_cycle =
        parse_var(&lookup, "BUYBOX_RETRIES_PER_CYCLE", DEFAULT_RETRIES_PER_CYCLE)?;
    let max_blocked_cycles =
        parse_var(&lookup, "BUYBOX_MAX_BLOCKED_CYCLES", DEFAULT_MAX_BLOCKED_CYCLES)?;

    let blocked_backoff_base = parse_var(
        &lookup,
        "BUYBOX_BLOCKED_BACKOFF_BASE",
        DEFAULT_BLOCKED_BACKOFF_BASE,
    )?;
    if !blocked_backoff_base.is_finite() || blocked_backoff_base <= 0.0 {
        return Err(invalid(
            "BUYBOX_BLOCKED_BACKOFF_BASE",
            "must be a finite number greater than 0",
        ));
    }

    Ok(AppConfig {
        env,
        log_level,
        marketplace_base_url,
        locale,
        user_agent,
        max_workers,
        request_timeout_secs,
        retries_per_cycle,
        max_blocked_cycles,
        blocked_backoff_base,
    })
}

fn parse_var<T, F>(lookup: &F, var: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    match lookup(var) {
        Ok(raw) => raw.trim().parse::<T>().map_err(|e| invalid(var, e)),
        Err(_) => Ok(default),
    }
}

fn invalid(var: &str, reason: impl Display) -> ConfigError {
    ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason: reason.to_string(),
    }
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(invalid(
            "BUYBOX_ENV",
            format!("unknown environment \"{other}\""),
        )),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
