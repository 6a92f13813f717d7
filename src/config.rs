//! Fetch configuration, loaded from a TOML file.
//!
//! Every field carries a default so a missing file or a partial file
//! degrades to built-in settings rather than failing startup.

use serde::Deserialize;
use std::error::Error;
use std::fs;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FetchConfig {
    /// Total timeout for one HTTP request, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Client identification string sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Search radius used when the caller has no preference, nautical miles.
    #[serde(default = "default_radius_nm")]
    pub default_radius_nm: f64,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    "metar_service/0.1".to_string()
}

fn default_radius_nm() -> f64 {
    25.0
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            default_radius_nm: default_radius_nm(),
        }
    }
}

/// Load the fetch configuration from a TOML file.
pub fn load_config(path: &str) -> Result<FetchConfig, Box<dyn Error>> {
    let raw = fs::read_to_string(path)?;
    let config: FetchConfig = toml::from_str(&raw)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.user_agent, "metar_service/0.1");
        assert_eq!(config.default_radius_nm, 25.0);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: FetchConfig = toml::from_str("timeout_secs = 10").unwrap();
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.user_agent, "metar_service/0.1");
        assert_eq!(config.default_radius_nm, 25.0);
    }

    #[test]
    fn test_full_file_overrides_everything() {
        let config: FetchConfig = toml::from_str(
            "timeout_secs = 5\nuser_agent = \"simclient/2.0\"\ndefault_radius_nm = 50.0",
        )
        .unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.user_agent, "simclient/2.0");
        assert_eq!(config.default_radius_nm, 50.0);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_config("/nonexistent/metar_service.toml").is_err());
    }
}
