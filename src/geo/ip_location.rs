//! IP-based geolocation
//!
//! Uses ipapi.co for IP geolocation with file-based caching.

use crate::config::defaults::APP_DIR_NAME;
use crate::constants::api::{IP_API_URL, USER_AGENT};
use crate::constants::cache::{IP_LOCATION_CACHE_FILE, IP_LOCATION_TTL_SECS};
use crate::error::{Error, Result};
use crate::geo::GeoLocation;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};
use tracing::debug;

/// Something that can tell where the caller roughly is
pub trait IpLocate: Send + Sync {
    fn locate(&self) -> impl std::future::Future<Output = Result<IpLocation>> + Send;
}

/// Location detected from the public IP address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpLocation {
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub location: GeoLocation,
}

impl IpLocation {
    /// "City, Region, Country" from whichever parts are known
    pub fn summary(&self) -> String {
        self.location.display_name.clone()
    }
}

/// IP location service with caching
#[derive(Debug)]
pub struct IpLocator {
    client: reqwest::Client,
    url: String,
    cache_path: Option<PathBuf>,
}

/// ipapi.co response
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    #[serde(default)]
    error: bool,
    reason: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    city: Option<String>,
    region: Option<String>,
    country_name: Option<String>,
}

/// Cached location data
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedLocation {
    location: IpLocation,
    timestamp: u64,
}

fn build_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .unwrap_or_default()
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

impl IpLocator {
    /// Create a new IP locator with the default cache path
    pub fn new(url: &str, timeout: Duration) -> Self {
        let cache_path = dirs::cache_dir()
            .map(|p| p.join(APP_DIR_NAME).join(IP_LOCATION_CACHE_FILE));

        Self {
            client: build_client(timeout),
            url: url.to_string(),
            cache_path,
        }
    }

    /// Create an IP locator with a specific cache path
    pub fn with_cache_path(url: &str, timeout: Duration, cache_path: PathBuf) -> Self {
        Self {
            client: build_client(timeout),
            url: url.to_string(),
            cache_path: Some(cache_path),
        }
    }

    /// Create an IP locator without caching
    pub fn without_cache(url: &str, timeout: Duration) -> Self {
        Self {
            client: build_client(timeout),
            url: url.to_string(),
            cache_path: None,
        }
    }

    /// Fetch location from the IP API
    async fn fetch_location(&self) -> Result<IpLocation> {
        let response = self.client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::Geo(format!("IP location request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Geo(format!(
                "IP location API returned status: {}",
                response.status()
            )));
        }

        let data: IpApiResponse = response
            .json()
            .await
            .map_err(|e| Error::Geo(format!("Failed to parse IP location response: {}", e)))?;

        Self::into_location(data)
    }

    fn into_location(data: IpApiResponse) -> Result<IpLocation> {
        if data.error {
            return Err(Error::Geo(format!(
                "IP location lookup failed: {}",
                data.reason.as_deref().unwrap_or("unknown reason")
            )));
        }

        let lat = data.latitude.ok_or_else(|| Error::Geo("No latitude in response".to_string()))?;
        let lng = data.longitude.ok_or_else(|| Error::Geo("No longitude in response".to_string()))?;

        let display_name = [&data.city, &data.region, &data.country_name]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        Ok(IpLocation {
            city: data.city,
            region: data.region,
            country: data.country_name,
            location: GeoLocation {
                lat,
                lng,
                display_name: if display_name.is_empty() {
                    "Unknown Location".to_string()
                } else {
                    display_name
                },
            },
        })
    }

    /// Load cached location if valid
    fn load_cache(&self) -> Option<IpLocation> {
        let cache_path = self.cache_path.as_ref()?;

        if !cache_path.exists() {
            return None;
        }

        let content = fs::read_to_string(cache_path).ok()?;
        let cached: CachedLocation = serde_json::from_str(&content).ok()?;

        if now_secs().saturating_sub(cached.timestamp) < IP_LOCATION_TTL_SECS {
            Some(cached.location)
        } else {
            None
        }
    }

    /// Save location to cache
    fn save_cache(&self, location: &IpLocation) {
        let Some(cache_path) = &self.cache_path else {
            return;
        };

        if let Some(parent) = cache_path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        let cached = CachedLocation {
            location: location.clone(),
            timestamp: now_secs(),
        };

        if let Ok(content) = serde_json::to_string_pretty(&cached) {
            let _ = fs::write(cache_path, content);
        }
    }

    /// Clear the cache
    pub fn clear_cache(&self) {
        if let Some(cache_path) = &self.cache_path {
            let _ = fs::remove_file(cache_path);
        }
    }

    /// Get cache duration
    pub fn cache_duration() -> Duration {
        Duration::from_secs(IP_LOCATION_TTL_SECS)
    }
}

impl Default for IpLocator {
    fn default() -> Self {
        Self::new(IP_API_URL, Duration::from_secs(10))
    }
}

impl IpLocate for IpLocator {
    async fn locate(&self) -> Result<IpLocation> {
        if let Some(cached) = self.load_cache() {
            debug!("using cached IP location");
            return Ok(cached);
        }

        let location = self.fetch_location().await?;
        self.save_cache(&location);

        Ok(location)
    }
}
