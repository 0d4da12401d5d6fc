use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_config_from_env() -> Result<AppConfig, ConfigError> {
    build_config(|key| std::env::var(key))
}

/// Build configuration using the provided env-var lookup function.
///
/// The parsing/validation logic is decoupled from the actual environment so
/// it can be tested with a pure `HashMap` lookup.
fn build_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let locationiq_token = lookup("ROUTEPLAN_LOCATIONIQ_TOKEN")
        .ok()
        .filter(|t| !t.trim().is_empty());

    let geocode_timeout_secs = parse_u64("ROUTEPLAN_GEOCODE_TIMEOUT_SECS", "30")?;
    let geocode_max_retries = parse_u32("ROUTEPLAN_GEOCODE_MAX_RETRIES", "2")?;
    let geocode_retry_backoff_ms = parse_u64("ROUTEPLAN_GEOCODE_RETRY_BACKOFF_MS", "250")?;
    let user_agent = or_default("ROUTEPLAN_USER_AGENT", "routeplan/0.1 (route-planning)");
    let optimizer_url = or_default("ROUTEPLAN_OPTIMIZER_URL", "http://127.0.0.1:8000");
    let optimizer_timeout_secs = parse_u64("ROUTEPLAN_OPTIMIZER_TIMEOUT_SECS", "60")?;
    let log_level = or_default("ROUTEPLAN_LOG_LEVEL", "info");
    let warehouse_path = PathBuf::from(or_default(
        "ROUTEPLAN_WAREHOUSE_PATH",
        "./routeplan-warehouse.json",
    ));
    let suggest_debounce_ms = parse_u64("ROUTEPLAN_SUGGEST_DEBOUNCE_MS", "300")?;

    Ok(AppConfig {
        locationiq_token,
        geocode_timeout_secs,
        geocode_max_retries,
        geocode_retry_backoff_ms,
        user_agent,
        optimizer_url,
        optimizer_timeout_secs,
        log_level,
        warehouse_path,
        suggest_debounce_ms,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn build_config_succeeds_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.locationiq_token.is_none());
        assert_eq!(cfg.geocode_timeout_secs, 30);
        assert_eq!(cfg.geocode_max_retries, 2);
        assert_eq!(cfg.geocode_retry_backoff_ms, 250);
        assert_eq!(cfg.user_agent, "routeplan/0.1 (route-planning)");
        assert_eq!(cfg.optimizer_url, "http://127.0.0.1:8000");
        assert_eq!(cfg.optimizer_timeout_secs, 60);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(
            cfg.warehouse_path,
            PathBuf::from("./routeplan-warehouse.json")
        );
        assert_eq!(cfg.suggest_debounce_ms, 300);
    }

    #[test]
    fn token_is_picked_up_when_present() {
        let mut map = HashMap::new();
        map.insert("ROUTEPLAN_LOCATIONIQ_TOKEN", "pk.test-token");
        let cfg = build_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.locationiq_token.as_deref(), Some("pk.test-token"));
    }

    #[test]
    fn blank_token_counts_as_absent() {
        let mut map = HashMap::new();
        map.insert("ROUTEPLAN_LOCATIONIQ_TOKEN", "   ");
        let cfg = build_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.locationiq_token.is_none());
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        let mut map = HashMap::new();
        map.insert("ROUTEPLAN_GEOCODE_TIMEOUT_SECS", "not-a-number");
        let result = build_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ROUTEPLAN_GEOCODE_TIMEOUT_SECS"),
            "expected InvalidEnvVar(ROUTEPLAN_GEOCODE_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn debounce_override_is_applied() {
        let mut map = HashMap::new();
        map.insert("ROUTEPLAN_SUGGEST_DEBOUNCE_MS", "150");
        let cfg = build_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.suggest_debounce_ms, 150);
    }

    #[test]
    fn debug_redacts_token() {
        let mut map = HashMap::new();
        map.insert("ROUTEPLAN_LOCATIONIQ_TOKEN", "pk.super-secret");
        let cfg = build_config(lookup_from_map(&map)).unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("super-secret"), "token leaked: {rendered}");
        assert!(rendered.contains("[redacted]"));
    }
}
