use crate::app_config::AppConfig;
use crate::courts::{clamp_desired_count, Coordinates, DEFAULT_CENTER};
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
/// Every setting has a default, so an empty environment yields a usable
/// config pointed at public Nominatim and a local backend.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| invalid(var, e.to_string()))
    };

    let parse_f64 = |var: &str, default: f64| -> Result<f64, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.parse::<f64>().map_err(|e| invalid(var, e.to_string())),
            Err(_) => Ok(default),
        }
    };

    let parse_url = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        let trimmed = raw.trim().trim_end_matches('/');
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Ok(trimmed.to_string())
        } else {
            Err(invalid(var, format!("expected an http(s) URL, got '{raw}'")))
        }
    };

    let log_level = or_default("COURTFINDER_LOG_LEVEL", "info");
    let geocoder_url = parse_url(
        "COURTFINDER_GEOCODER_URL",
        "https://nominatim.openstreetmap.org",
    )?;
    let courts_api_url = parse_url("COURTFINDER_COURTS_API_URL", "http://127.0.0.1:5000")?;

    let request_timeout_secs = parse_u64("COURTFINDER_REQUEST_TIMEOUT_SECS", "15")?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "COURTFINDER_REQUEST_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }
    let user_agent = or_default("COURTFINDER_USER_AGENT", "courtfinder/0.1 (court-search)");
    let max_retries = parse_u32("COURTFINDER_MAX_RETRIES", "2")?;
    let retry_backoff_base_ms = parse_u64("COURTFINDER_RETRY_BACKOFF_BASE_MS", "500")?;

    let default_lat = parse_f64("COURTFINDER_DEFAULT_LAT", DEFAULT_CENTER.latitude())?;
    let default_lon = parse_f64("COURTFINDER_DEFAULT_LON", DEFAULT_CENTER.longitude())?;
    // Latitude is checked on its own first so a failure names the right variable.
    Coordinates::new(default_lat, 0.0)
        .map_err(|e| invalid("COURTFINDER_DEFAULT_LAT", e.to_string()))?;
    let default_center = Coordinates::new(default_lat, default_lon)
        .map_err(|e| invalid("COURTFINDER_DEFAULT_LON", e.to_string()))?;

    let default_count = parse_u32("COURTFINDER_DEFAULT_COUNT", "5")?;
    if clamp_desired_count(default_count) != default_count {
        return Err(invalid(
            "COURTFINDER_DEFAULT_COUNT",
            format!("must be between 1 and {}", crate::MAX_DESIRED_COUNT),
        ));
    }

    Ok(AppConfig {
        log_level,
        geocoder_url,
        courts_api_url,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
        default_center,
        default_count,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
