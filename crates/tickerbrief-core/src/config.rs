use crate::app_config::{ApiConfig, AppConfig, ExecutionContext};
use crate::base_url::DEFAULT_FALLBACK_URL;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        optional(var).unwrap_or_else(|| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let context = parse_context(&or_default("TICKERBRIEF_CONTEXT", "server"))?;
    let client_origin = optional("TICKERBRIEF_CLIENT_ORIGIN");
    if context == ExecutionContext::Client && client_origin.is_none() {
        return Err(ConfigError::MissingEnvVar(
            "TICKERBRIEF_CLIENT_ORIGIN".to_string(),
        ));
    }

    let request_timeout_secs = parse_u64("TICKERBRIEF_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "TICKERBRIEF_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let api = ApiConfig {
        context,
        client_origin,
        deployment_url: optional("TICKERBRIEF_DEPLOYMENT_URL"),
        explicit_url: optional("TICKERBRIEF_API_URL"),
        fallback_url: or_default("TICKERBRIEF_FALLBACK_URL", DEFAULT_FALLBACK_URL),
        request_timeout_secs,
        user_agent: or_default("TICKERBRIEF_USER_AGENT", "tickerbrief/0.1"),
        trending_revalidate_secs: parse_u64("TICKERBRIEF_TRENDING_REVALIDATE_SECS", "60")?,
    };

    Ok(AppConfig {
        api,
        log_level: or_default("TICKERBRIEF_LOG_LEVEL", "info"),
    })
}

/// Parse a string into an `ExecutionContext` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `client` or `server`.
fn parse_context(s: &str) -> Result<ExecutionContext, ConfigError> {
    match s {
        "client" => Ok(ExecutionContext::Client),
        "server" => Ok(ExecutionContext::Server),
        other => Err(ConfigError::InvalidEnvVar {
            var: "TICKERBRIEF_CONTEXT".to_string(),
            reason: format!("expected 'client' or 'server', got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
