//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

pub const ENV_CONFIG_PATH: &str = "GATEWAY_CONFIG";
pub const ENV_PROVIDER: &str = "FLIGHT_PROVIDER";
pub const ENV_AMADEUS_CLIENT_ID: &str = "AMADEUS_CLIENT_ID";
pub const ENV_AMADEUS_CLIENT_SECRET: &str = "AMADEUS_CLIENT_SECRET";
pub const ENV_AMADEUS_BASE_URL: &str = "AMADEUS_BASE_URL";
pub const ENV_SERPAPI_KEY: &str = "SERPAPI_KEY";
pub const ENV_SERPAPI_BASE_URL: &str = "SERPAPI_BASE_URL";
pub const ENV_SERPAPI_HL: &str = "SERPAPI_HL";
pub const ENV_SERPAPI_GL: &str = "SERPAPI_GL";
pub const ENV_DEFAULT_CURRENCY: &str = "DEFAULT_CURRENCY";
pub const ENV_PORT: &str = "PORT";
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
pub const ENV_METRICS_ENABLED: &str = "METRICS_ENABLED";
pub const ENV_METRICS_ADDRESS: &str = "METRICS_ADDRESS";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Env { var: &'static str, value: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Env { var, value } => {
                write!(f, "Invalid value for {}: '{}'", var, value)
            }
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load configuration from a TOML file without validating it.
pub fn load_file(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let config = load_file(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Resolve the runtime configuration: defaults, then the file named by
/// `GATEWAY_CONFIG` if set, then environment overrides, then validation.
pub fn from_env() -> Result<GatewayConfig, ConfigError> {
    let lookup = |key: &str| std::env::var(key).ok();

    let base = match lookup(ENV_CONFIG_PATH).filter(|p| !p.trim().is_empty()) {
        Some(path) => load_file(Path::new(&path))?,
        None => GatewayConfig::default(),
    };

    let config = apply_env(base, lookup)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Overlay environment values onto `config`.
///
/// Blank values count as unset, so `AMADEUS_CLIENT_ID=` leaves the
/// credential absent.
pub fn apply_env<F>(mut config: GatewayConfig, lookup: F) -> Result<GatewayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| {
        lookup(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    if let Some(v) = get(ENV_PROVIDER) {
        config.provider.name = v;
    }
    if let Some(v) = get(ENV_AMADEUS_CLIENT_ID) {
        config.amadeus.client_id = Some(v);
    }
    if let Some(v) = get(ENV_AMADEUS_CLIENT_SECRET) {
        config.amadeus.client_secret = Some(v);
    }
    if let Some(v) = get(ENV_AMADEUS_BASE_URL) {
        config.amadeus.base_url = v;
    }
    if let Some(v) = get(ENV_SERPAPI_KEY) {
        config.serpapi.api_key = Some(v);
    }
    if let Some(v) = get(ENV_SERPAPI_BASE_URL) {
        config.serpapi.base_url = v;
    }
    if let Some(v) = get(ENV_SERPAPI_HL) {
        config.serpapi.hl = v;
    }
    if let Some(v) = get(ENV_SERPAPI_GL) {
        config.serpapi.gl = v;
    }
    if let Some(v) = get(ENV_DEFAULT_CURRENCY) {
        config.search.default_currency = v.to_uppercase();
    }
    if let Some(v) = get(ENV_PORT) {
        config.listener.port = v.parse().map_err(|_| ConfigError::Env {
            var: ENV_PORT,
            value: v.clone(),
        })?;
    }
    if let Some(v) = get(ENV_LOG_LEVEL) {
        config.observability.log_level = v;
    }
    if let Some(v) = get(ENV_METRICS_ENABLED) {
        config.observability.metrics_enabled = match v.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => {
                return Err(ConfigError::Env {
                    var: ENV_METRICS_ENABLED,
                    value: v,
                })
            }
        };
    }
    if let Some(v) = get(ENV_METRICS_ADDRESS) {
        config.observability.metrics_address = v;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_env_overrides() {
        let config = apply_env(
            GatewayConfig::default(),
            lookup_from(&[
                (ENV_PROVIDER, "serpapi"),
                (ENV_SERPAPI_KEY, "secret"),
                (ENV_DEFAULT_CURRENCY, "eur"),
                (ENV_PORT, "8088"),
            ]),
        )
        .unwrap();

        assert_eq!(config.provider.name, "serpapi");
        assert_eq!(config.serpapi.api_key.as_deref(), Some("secret"));
        assert_eq!(config.search.default_currency, "EUR");
        assert_eq!(config.listener.port, 8088);
    }

    #[test]
    fn test_blank_credentials_are_absent() {
        let config = apply_env(
            GatewayConfig::default(),
            lookup_from(&[(ENV_AMADEUS_CLIENT_ID, "  "), (ENV_AMADEUS_CLIENT_SECRET, "")]),
        )
        .unwrap();

        assert!(config.amadeus.client_id.is_none());
        assert!(config.amadeus.client_secret.is_none());
    }

    #[test]
    fn test_bad_port_rejected() {
        let err = apply_env(GatewayConfig::default(), lookup_from(&[(ENV_PORT, "eighty")]))
            .unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_metrics_flag() {
        let config = apply_env(
            GatewayConfig::default(),
            lookup_from(&[(ENV_METRICS_ENABLED, "TRUE")]),
        )
        .unwrap();
        assert!(config.observability.metrics_enabled);

        assert!(apply_env(
            GatewayConfig::default(),
            lookup_from(&[(ENV_METRICS_ENABLED, "maybe")])
        )
        .is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let path = std::env::temp_dir().join(format!("gateway-{}.toml", uuid::Uuid::new_v4()));
        fs::write(&path, "[listener]\nport = 4000\n\n[search]\ndefault_max = 10\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.listener.port, 4000);
        assert_eq!(config.search.default_max, 10);

        fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
