use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_USER_AGENT: &str = "socialdash/0.1 (analytics-dashboard)";

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
/// Decoupled from the process environment so it can be tested with a
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_url = |var: &str, raw: String| -> Result<String, ConfigError> {
        let trimmed = raw.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Ok(trimmed.trim_end_matches('/').to_owned())
        } else {
            Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("'{trimmed}' is not an http(s) URL"),
            })
        }
    };

    let env = parse_environment(&or_default("SOCIALDASH_ENV", "development"))?;
    let api_url = parse_url(
        "SOCIALDASH_API_URL",
        or_default("SOCIALDASH_API_URL", DEFAULT_API_URL),
    )?;
    let events_url = match lookup("SOCIALDASH_EVENTS_URL") {
        Ok(raw) if !raw.trim().is_empty() => Some(parse_url("SOCIALDASH_EVENTS_URL", raw)?),
        _ => None,
    };
    let log_level = or_default("SOCIALDASH_LOG_LEVEL", "info");

    let request_timeout_secs = match lookup("SOCIALDASH_REQUEST_TIMEOUT_SECS") {
        Ok(raw) => Some(
            raw.parse::<u64>()
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: "SOCIALDASH_REQUEST_TIMEOUT_SECS".to_string(),
                    reason: e.to_string(),
                })?,
        ),
        Err(_) => None,
    };

    let user_agent = or_default("SOCIALDASH_USER_AGENT", DEFAULT_USER_AGENT);

    Ok(AppConfig {
        env,
        api_url,
        events_url,
        log_level,
        request_timeout_secs,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SOCIALDASH_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
