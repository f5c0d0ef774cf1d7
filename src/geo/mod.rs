//! Geocoding module
//!
//! Provides geocoding (location name to coordinates) and IP geolocation.

pub mod ip_location;
pub mod nominatim;

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::Result;
use serde::{Deserialize, Serialize};

pub use ip_location::{IpLocate, IpLocation, IpLocator};
pub use nominatim::NominatimBackend;

/// A geocoded location result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
    /// Display name (address or description)
    pub display_name: String,
}

impl GeoLocation {
    pub fn coords(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}

/// Trait for geocoding backends
pub trait GeoBackend: Send + Sync {
    /// Geocode a location string to coordinates
    ///
    /// Returns the best match for the query, or None if not found
    fn geocode(&self, query: &str) -> impl std::future::Future<Output = Result<Option<GeoLocation>>> + Send;

    /// Reverse geocode coordinates to a location name
    fn reverse_geocode(&self, lat: f64, lng: f64) -> impl std::future::Future<Output = Result<Option<GeoLocation>>> + Send;
}

/// Build the geocoding backend described by the config
pub fn get_geocoder(config: &Config) -> NominatimBackend {
    NominatimBackend::with_base_url(&config.services.nominatim_url, config.services.timeout())
}

/// Build the IP location service described by the config
pub fn get_ip_locator(config: &Config) -> IpLocator {
    IpLocator::new(&config.services.ip_api_url, config.services.timeout())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_location_coords() {
        let loc = GeoLocation {
            lat: 3.4976,
            lng: 103.4246,
            display_name: "Pekan".to_string(),
        };
        assert_eq!(loc.coords(), Coordinates::new(3.4976, 103.4246));
    }

    #[test]
    fn test_factories_follow_config() {
        let mut config = Config::default();
        config.services.nominatim_url = "http://localhost:9999".to_string();
        let geocoder = get_geocoder(&config);
        assert_eq!(geocoder.base_url(), "http://localhost:9999");
    }
}
