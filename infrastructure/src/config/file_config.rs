//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the config file. Every
//! section has working defaults except the API credentials, which must come
//! from the file or the environment.

use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Shared HTTP settings
    pub http: FileHttpConfig,
    /// Flight search API (OAuth2 client credentials)
    pub flights: FileFlightsConfig,
    /// Image search API (static key)
    pub images: FileImagesConfig,
    /// Weather APIs (no auth)
    pub weather: FileWeatherConfig,
    /// Rail search API (static key)
    pub rail: FileRailConfig,
    /// Planning engine endpoint
    pub engine: FileEngineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileHttpConfig {
    /// Bounded timeout applied to every upstream call, in seconds
    pub timeout_secs: u64,
}

impl Default for FileHttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileFlightsConfig {
    pub search_url: String,
    pub token_url: String,
    pub api_key: String,
    pub api_secret: String,
}

impl Default for FileFlightsConfig {
    fn default() -> Self {
        Self {
            search_url: "https://test.api.amadeus.com/v2/shopping/flight-offers".to_string(),
            token_url: "https://test.api.amadeus.com/v1/security/oauth2/token".to_string(),
            api_key: String::new(),
            api_secret: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileImagesConfig {
    pub search_url: String,
    pub api_key: String,
}

impl Default for FileImagesConfig {
    fn default() -> Self {
        Self {
            search_url: "https://api.pexels.com/v1/search".to_string(),
            api_key: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWeatherConfig {
    pub geocoding_url: String,
    pub forecast_url: String,
}

impl Default for FileWeatherConfig {
    fn default() -> Self {
        Self {
            geocoding_url: "https://geocoding-api.open-meteo.com/v1/search".to_string(),
            forecast_url: "https://api.open-meteo.com/v1/forecast".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRailConfig {
    pub search_url: String,
    pub api_key: String,
}

impl Default for FileRailConfig {
    fn default() -> Self {
        Self {
            search_url: "https://railradar.in/api/v1/trains/between".to_string(),
            api_key: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEngineConfig {
    /// Endpoint of the external planning engine
    pub endpoint: String,
}

impl Default for FileEngineConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8000/plan".to_string(),
        }
    }
}

impl FileConfig {
    /// List missing credentials. These are warnings, not hard errors: a
    /// deployment may run with a subset of tools.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.flights.api_key.is_empty() || self.flights.api_secret.is_empty() {
            missing.push("flights.api_key / flights.api_secret");
        }
        if self.images.api_key.is_empty() {
            missing.push("images.api_key");
        }
        if self.rail.api_key.is_empty() {
            missing.push("rail.api_key");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_have_endpoints() {
        let config = FileConfig::default();
        assert!(config.flights.search_url.starts_with("https://"));
        assert!(config.weather.geocoding_url.contains("geocoding"));
        assert_eq!(config.http.timeout_secs, 10);
    }

    #[test]
    fn test_missing_credentials_reported() {
        let mut config = FileConfig::default();
        assert_eq!(config.missing_credentials().len(), 3);

        config.images.api_key = "px-key".to_string();
        assert_eq!(config.missing_credentials().len(), 2);
    }

    #[test]
    fn test_partial_toml_merges_over_defaults() {
        let config: FileConfig = toml::from_str(
            r#"
            [http]
            timeout_secs = 5

            [images]
            api_key = "px-key"
            "#,
        )
        .unwrap();

        assert_eq!(config.http.timeout_secs, 5);
        assert_eq!(config.images.api_key, "px-key");
        // Untouched sections keep their defaults
        assert!(config.flights.token_url.contains("oauth2/token"));
    }
}
