use crate::app_config::{AppConfig, DEFAULT_USER_AGENTS};
use crate::ConfigError;

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
/// Every variable has a default, so an empty environment yields a usable
/// config. Decoupled from the real environment so tests can use a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.trim().parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim().parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let log_level = or_default("PRICEWATCH_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("PRICEWATCH_REQUEST_TIMEOUT_SECS", "15")?;

    let max_attempts = parse_u32("PRICEWATCH_MAX_ATTEMPTS", "3")?;
    if max_attempts == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "PRICEWATCH_MAX_ATTEMPTS".to_string(),
            reason: "at least one attempt is required".to_string(),
        });
    }

    let backoff_base_ms = parse_u64("PRICEWATCH_BACKOFF_BASE_MS", "2000")?;
    let pacing_min_ms = parse_u64("PRICEWATCH_PACING_MIN_MS", "500")?;
    let pacing_max_ms = parse_u64("PRICEWATCH_PACING_MAX_MS", "2000")?;
    check_range("PRICEWATCH_PACING_MAX_MS", pacing_min_ms, pacing_max_ms)?;

    let challenge_cooldown_min_ms = parse_u64("PRICEWATCH_CHALLENGE_COOLDOWN_MIN_MS", "3000")?;
    let challenge_cooldown_max_ms = parse_u64("PRICEWATCH_CHALLENGE_COOLDOWN_MAX_MS", "6000")?;
    check_range(
        "PRICEWATCH_CHALLENGE_COOLDOWN_MAX_MS",
        challenge_cooldown_min_ms,
        challenge_cooldown_max_ms,
    )?;

    let user_agents = match lookup("PRICEWATCH_USER_AGENTS") {
        Ok(raw) => parse_user_agents(&raw)?,
        Err(_) => DEFAULT_USER_AGENTS.iter().map(|ua| (*ua).to_string()).collect(),
    };

    let accept_language = or_default(
        "PRICEWATCH_ACCEPT_LANGUAGE",
        "tr-TR,tr;q=0.9,en-US;q=0.8,en;q=0.7",
    );
    let accept_encoding = or_default("PRICEWATCH_ACCEPT_ENCODING", "gzip, deflate, br");

    Ok(AppConfig {
        log_level,
        request_timeout_secs,
        max_attempts,
        backoff_base_ms,
        pacing_min_ms,
        pacing_max_ms,
        challenge_cooldown_min_ms,
        challenge_cooldown_max_ms,
        user_agents,
        accept_language,
        accept_encoding,
    })
}

fn check_range(var: &str, min: u64, max: u64) -> Result<(), ConfigError> {
    if min > max {
        return Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("maximum {max} is below minimum {min}"),
        });
    }
    Ok(())
}

/// Splits a `|`-separated user-agent list, dropping blank entries.
fn parse_user_agents(raw: &str) -> Result<Vec<String>, ConfigError> {
    let agents: Vec<String> = raw
        .split('|')
        .map(str::trim)
        .filter(|ua| !ua.is_empty())
        .map(str::to_string)
        .collect();

    if agents.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "PRICEWATCH_USER_AGENTS".to_string(),
            reason: "user-agent pool must not be empty".to_string(),
        });
    }
    Ok(agents)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
