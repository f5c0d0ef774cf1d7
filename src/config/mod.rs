//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/rent-nearby/config.toml

pub mod defaults;

use crate::constants::api::{
    IP_API_URL, NOMINATIM_URL, OPENWEATHER_KEY_ENV, OPENWEATHER_URL, TIME_API_URL,
};
use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Default values for searches
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Location settings
    #[serde(default)]
    pub location: LocationConfig,

    /// Optional parts of the nearby view
    #[serde(default)]
    pub features: FeaturesConfig,

    /// External provider endpoints
    #[serde(default)]
    pub services: ServicesConfig,

    /// URL generation settings
    #[serde(default)]
    pub url: UrlConfig,

    /// API keys for various services
    #[serde(default)]
    pub api_keys: ApiKeysConfig,
}

/// Default values for searches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default search radius in kilometres
    #[serde(default = "default_radius_km")]
    pub radius_km: f64,

    /// Smallest accepted radius
    #[serde(default = "default_min_radius_km")]
    pub min_radius_km: f64,

    /// Largest accepted radius
    #[serde(default = "default_max_radius_km")]
    pub max_radius_km: f64,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,

    /// Currency prefix for prices
    #[serde(default = "default_currency")]
    pub currency: String,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Location settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationConfig {
    /// If true, the IP-detected point is used when no location is given
    #[serde(default)]
    pub default_here: bool,
}

/// Toggles for the optional lookups of the nearby view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturesConfig {
    /// Detect the user's city by IP and prefill the query with it
    #[serde(default = "default_true")]
    pub detect_ip: bool,

    /// Show current weather at the user's location
    #[serde(default = "default_true")]
    pub weather: bool,

    /// Show local time at the user's location
    #[serde(default)]
    pub local_time: bool,
}

/// External provider endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesConfig {
    #[serde(default = "default_nominatim_url")]
    pub nominatim_url: String,

    #[serde(default = "default_ip_api_url")]
    pub ip_api_url: String,

    #[serde(default = "default_openweather_url")]
    pub openweather_url: String,

    #[serde(default = "default_time_api_url")]
    pub time_api_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// URL generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlConfig {
    /// Default URL provider
    #[serde(default = "default_url_provider")]
    pub default: String,

    /// URL provider templates
    #[serde(default = "default_url_providers")]
    pub providers: HashMap<String, String>,
}

/// API keys for external services
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiKeysConfig {
    /// OpenWeatherMap API key
    #[serde(default)]
    pub openweather: String,
}

// Default value functions for serde
fn default_radius_km() -> f64 {
    DEFAULT_RADIUS_KM
}
fn default_min_radius_km() -> f64 {
    DEFAULT_MIN_RADIUS_KM
}
fn default_max_radius_km() -> f64 {
    DEFAULT_MAX_RADIUS_KM
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_true() -> bool {
    true
}
fn default_nominatim_url() -> String {
    NOMINATIM_URL.to_string()
}
fn default_ip_api_url() -> String {
    IP_API_URL.to_string()
}
fn default_openweather_url() -> String {
    OPENWEATHER_URL.to_string()
}
fn default_time_api_url() -> String {
    TIME_API_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_url_provider() -> String {
    DEFAULT_URL_PROVIDER.to_string()
}
fn default_url_providers() -> HashMap<String, String> {
    let mut providers = HashMap::new();
    providers.insert(
        "google".to_string(),
        "https://www.google.com/maps/@{lat},{lng},15z".to_string(),
    );
    providers.insert(
        "openstreetmap".to_string(),
        "https://www.openstreetmap.org/#map=15/{lat}/{lng}".to_string(),
    );
    providers.insert(
        "apple".to_string(),
        "https://maps.apple.com/?ll={lat},{lng}".to_string(),
    );
    providers
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            radius_km: default_radius_km(),
            min_radius_km: default_min_radius_km(),
            max_radius_km: default_max_radius_km(),
            format: default_format(),
            currency: default_currency(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            detect_ip: true,
            weather: true,
            local_time: false,
        }
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            nominatim_url: default_nominatim_url(),
            ip_api_url: default_ip_api_url(),
            openweather_url: default_openweather_url(),
            time_api_url: default_time_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            default: default_url_provider(),
            providers: default_url_providers(),
        }
    }
}

impl ServicesConfig {
    /// Timeout applied to every provider request
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific path, writing defaults if absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                Error::Config(format!("Failed to read config file: {}", e))
            })?;

            toml::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse config file: {}", e))
            })
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, content).map_err(|e| {
            Error::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "radius_km"] => Some(self.defaults.radius_km.to_string()),
            ["defaults", "min_radius_km"] => Some(self.defaults.min_radius_km.to_string()),
            ["defaults", "max_radius_km"] => Some(self.defaults.max_radius_km.to_string()),
            ["defaults", "format"] => Some(self.defaults.format.clone()),
            ["defaults", "currency"] => Some(self.defaults.currency.clone()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["location", "default_here"] => Some(self.location.default_here.to_string()),

            ["features", "detect_ip"] => Some(self.features.detect_ip.to_string()),
            ["features", "weather"] => Some(self.features.weather.to_string()),
            ["features", "local_time"] => Some(self.features.local_time.to_string()),

            ["services", "nominatim_url"] => Some(self.services.nominatim_url.clone()),
            ["services", "ip_api_url"] => Some(self.services.ip_api_url.clone()),
            ["services", "openweather_url"] => Some(self.services.openweather_url.clone()),
            ["services", "time_api_url"] => Some(self.services.time_api_url.clone()),
            ["services", "timeout_secs"] => Some(self.services.timeout_secs.to_string()),

            ["url", "default"] => Some(self.url.default.clone()),

            ["api_keys", "openweather"] => Some(self.api_keys.openweather.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "radius_km"] => {
                self.defaults.radius_km = parse_value(value, "radius")?;
            }
            ["defaults", "min_radius_km"] => {
                self.defaults.min_radius_km = parse_value(value, "radius")?;
            }
            ["defaults", "max_radius_km"] => {
                self.defaults.max_radius_km = parse_value(value, "radius")?;
            }
            ["defaults", "format"] => {
                self.defaults.format = value.to_string();
            }
            ["defaults", "currency"] => {
                self.defaults.currency = value.to_string();
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = parse_value(value, "port")?;
            }

            ["location", "default_here"] => {
                self.location.default_here = parse_value(value, "boolean")?;
            }

            ["features", "detect_ip"] => {
                self.features.detect_ip = parse_value(value, "boolean")?;
            }
            ["features", "weather"] => {
                self.features.weather = parse_value(value, "boolean")?;
            }
            ["features", "local_time"] => {
                self.features.local_time = parse_value(value, "boolean")?;
            }

            ["services", "nominatim_url"] => {
                self.services.nominatim_url = value.to_string();
            }
            ["services", "ip_api_url"] => {
                self.services.ip_api_url = value.to_string();
            }
            ["services", "openweather_url"] => {
                self.services.openweather_url = value.to_string();
            }
            ["services", "time_api_url"] => {
                self.services.time_api_url = value.to_string();
            }
            ["services", "timeout_secs"] => {
                self.services.timeout_secs = parse_value(value, "timeout")?;
            }

            ["url", "default"] => {
                self.url.default = value.to_string();
            }

            ["api_keys", "openweather"] => {
                self.api_keys.openweather = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "defaults.radius_km",
            "defaults.min_radius_km",
            "defaults.max_radius_km",
            "defaults.format",
            "defaults.currency",
            "server.host",
            "server.port",
            "location.default_here",
            "features.detect_ip",
            "features.weather",
            "features.local_time",
            "services.nominatim_url",
            "services.ip_api_url",
            "services.openweather_url",
            "services.time_api_url",
            "services.timeout_secs",
            "url.default",
            "api_keys.openweather",
        ]
    }

    /// Format a URL using the specified provider
    ///
    /// Replaces {lat} and {lng} placeholders with actual values
    pub fn format_url(&self, provider: Option<&str>, lat: f64, lng: f64) -> Result<String> {
        let provider_name = provider.unwrap_or(&self.url.default);

        let template = self.url.providers.get(provider_name).ok_or_else(|| {
            Error::Config(format!("Unknown URL provider: {}", provider_name))
        })?;

        Ok(template
            .replace("{lat}", &lat.to_string())
            .replace("{lng}", &lng.to_string()))
    }

    /// OpenWeatherMap key from config, falling back to the environment
    pub fn openweather_key(&self) -> Option<String> {
        if !self.api_keys.openweather.is_empty() {
            return Some(self.api_keys.openweather.clone());
        }
        std::env::var(OPENWEATHER_KEY_ENV)
            .ok()
            .filter(|key| !key.is_empty())
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_value<T: std::str::FromStr>(value: &str, what: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::Config(format!("Invalid {} value: {}", what, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.defaults.radius_km, 5.0);
        assert_eq!(config.defaults.min_radius_km, 1.0);
        assert_eq!(config.defaults.max_radius_km, 20.0);
        assert_eq!(config.defaults.currency, "RM");
        assert_eq!(config.server.port, 7878);
        assert!(config.features.detect_ip);
        assert!(config.features.weather);
        assert!(!config.features.local_time);
    }

    #[test]
    fn test_get_set() {
        let mut config = Config::default();

        assert_eq!(config.get("defaults.format"), Some("text".to_string()));

        config.set("defaults.format", "json").unwrap();
        assert_eq!(config.get("defaults.format"), Some("json".to_string()));

        config.set("defaults.radius_km", "12").unwrap();
        assert_eq!(config.get("defaults.radius_km"), Some("12".to_string()));
        assert_eq!(config.defaults.radius_km, 12.0);

        config.set("features.weather", "false").unwrap();
        assert!(!config.features.weather);
    }

    #[test]
    fn test_get_invalid_key() {
        let config = Config::default();
        assert_eq!(config.get("invalid.key"), None);
    }

    #[test]
    fn test_set_invalid_key() {
        let mut config = Config::default();
        assert!(config.set("invalid.key", "value").is_err());
    }

    #[test]
    fn test_set_invalid_value() {
        let mut config = Config::default();
        assert!(config.set("defaults.radius_km", "not_a_number").is_err());
        assert!(config.set("features.detect_ip", "maybe").is_err());
        assert!(config.set("server.port", "70000").is_err());
    }

    #[test]
    fn test_every_available_key_is_readable() {
        let config = Config::default();
        for key in Config::available_keys() {
            assert!(config.get(key).is_some(), "key {} not readable", key);
        }
    }

    #[test]
    fn test_format_url() {
        let config = Config::default();

        let url = config.format_url(Some("google"), 3.5173, 103.4262).unwrap();
        assert_eq!(url, "https://www.google.com/maps/@3.5173,103.4262,15z");

        let url = config.format_url(None, 3.5173, 103.4262).unwrap();
        assert_eq!(url, "https://www.openstreetmap.org/#map=15/3.5173/103.4262");
    }

    #[test]
    fn test_format_url_unknown_provider() {
        let config = Config::default();
        assert!(config.format_url(Some("unknown"), 3.5, 103.4).is_err());
    }

    #[test]
    fn test_openweather_key_from_config() {
        let mut config = Config::default();
        config.api_keys.openweather = "abc123".to_string();
        assert_eq!(config.openweather_key(), Some("abc123".to_string()));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.defaults.radius_km = 8.0;
        config.features.local_time = true;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.defaults.radius_km, 8.0);
        assert!(loaded.features.local_time);
    }

    #[test]
    fn test_load_creates_default_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.defaults.radius_km, 5.0);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[features]\nweather = false\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(!config.features.weather);
        assert!(config.features.detect_ip);
        assert_eq!(config.services.timeout_secs, 10);
    }

    #[test]
    fn test_serialization_format() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();

        assert!(toml.contains("[defaults]"));
        assert!(toml.contains("[server]"));
        assert!(toml.contains("[features]"));
        assert!(toml.contains("[services]"));
        assert!(toml.contains("[url.providers]"));
    }

    #[test]
    fn test_server_addr() {
        let config = Config::default();
        assert_eq!(config.server_addr(), "127.0.0.1:7878");
    }
}
