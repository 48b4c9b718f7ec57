use crate::app_config::{AppConfig, Environment};
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
/// Every setting has a default or is optional; the service starts with
/// simulated data and no external credentials when nothing is set.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::{IpAddr, SocketAddr};
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Blank values count as unset so `.env` templates can leave them empty.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u16 = |var: &str, default: &str| -> Result<u16, ConfigError> {
        or_default(var, default)
            .parse::<u16>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("SOCIALLENS_ENV", "development"))?;

    let host = or_default("SOCIALLENS_HOST", "127.0.0.1")
        .parse::<IpAddr>()
        .map_err(|e| invalid("SOCIALLENS_HOST", e.to_string()))?;
    let port = parse_u16("SOCIALLENS_PORT", "8080")?;
    let bind_addr = SocketAddr::new(host, port);

    let debug = parse_bool(&or_default("SOCIALLENS_DEBUG", "false"))
        .ok_or_else(|| invalid("SOCIALLENS_DEBUG", "expected true or false".to_string()))?;
    let log_level = or_default("SOCIALLENS_LOG_LEVEL", if debug { "debug" } else { "info" });

    let request_timeout_secs = parse_u64("SOCIALLENS_REQUEST_TIMEOUT_SECS", "30")?;
    let collector_url = optional("SOCIALLENS_COLLECTOR_URL");
    let simulated_days = parse_u32("SOCIALLENS_SIMULATED_DAYS", "30")?;
    let data_dir = optional("SOCIALLENS_DATA_DIR").map(PathBuf::from);

    let gemini_api_key = optional("GEMINI_API_KEY");
    let gemini_model = or_default("SOCIALLENS_GEMINI_MODEL", "gemini-2.0-flash");
    let google_credentials_path = optional("GOOGLE_APPLICATION_CREDENTIALS").map(PathBuf::from);
    let spreadsheet_id = optional("SOCIALLENS_SPREADSHEET_ID");

    Ok(AppConfig {
        env,
        bind_addr,
        debug,
        log_level,
        request_timeout_secs,
        collector_url,
        simulated_days,
        data_dir,
        gemini_api_key,
        gemini_model,
        google_credentials_path,
        spreadsheet_id,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SOCIALLENS_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" | "" => Some(false),
        _ => None,
    }
}
