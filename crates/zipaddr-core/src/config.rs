use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_UPSTREAM_BASE_URL: &str = "http://zipcloud.ibsnet.co.jp";

/// Load application configuration from environment variables.
///
/// Every variable is optional and falls back to a built-in default.
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] if a variable is set to a value
/// that does not parse or is out of range.
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
/// Returns [`ConfigError::InvalidEnvVar`] if a variable is set to a value
/// that does not parse or is out of range.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can feed a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_timeout = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let secs = or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if secs == 0 {
            return Err(invalid(var, "timeout must be at least one second".to_string()));
        }
        Ok(secs)
    };

    let env = parse_environment(&or_default("ZIPADDR_ENV", "development"))?;
    let bind_addr = parse_addr("ZIPADDR_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("ZIPADDR_LOG_LEVEL", "info");

    let upstream_base_url = or_default("ZIPADDR_UPSTREAM_BASE_URL", DEFAULT_UPSTREAM_BASE_URL);
    let parsed = url::Url::parse(&upstream_base_url)
        .map_err(|e| invalid("ZIPADDR_UPSTREAM_BASE_URL", e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(
            "ZIPADDR_UPSTREAM_BASE_URL",
            format!("unsupported scheme '{}'", parsed.scheme()),
        ));
    }

    let connect_timeout_secs = parse_timeout("ZIPADDR_CONNECT_TIMEOUT_SECS", "5")?;
    let read_timeout_secs = parse_timeout("ZIPADDR_READ_TIMEOUT_SECS", "10")?;
    let user_agent = or_default("ZIPADDR_USER_AGENT", "zipaddr/0.1 (address-lookup)");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        upstream_base_url,
        connect_timeout_secs,
        read_timeout_secs,
        user_agent,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "ZIPADDR_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
