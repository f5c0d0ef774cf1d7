//! Centralized constants for the rent-nearby crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// Geographic constants
pub mod geo {
    /// Decimal places kept when displaying a distance
    pub const DISTANCE_DECIMALS: i32 = 2;
}

/// External API endpoints
pub mod api {
    /// OpenStreetMap Nominatim geocoding API
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

    /// IP geolocation API (free, no key required)
    pub const IP_API_URL: &str = "https://ipapi.co/json/";

    /// OpenWeatherMap current weather API
    pub const OPENWEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

    /// timeapi.io current time by coordinate
    pub const TIME_API_URL: &str = "https://timeapi.io/api/Time/current/coordinate";

    /// User agent sent to every provider (Nominatim requires one)
    pub const USER_AGENT: &str = concat!("rent-nearby/", env!("CARGO_PKG_VERSION"));

    /// Environment variable consulted when no weather key is configured
    pub const OPENWEATHER_KEY_ENV: &str = "OPENWEATHER_API_KEY";
}

/// Cache settings
pub mod cache {
    /// IP location cache duration in seconds (1 hour)
    pub const IP_LOCATION_TTL_SECS: u64 = 3600;

    /// IP location cache file name
    pub const IP_LOCATION_CACHE_FILE: &str = "ip_location_cache.json";
}

/// User-facing notice texts
pub mod messages {
    pub const IP_UNAVAILABLE: &str = "Could not detect location from IP.";
    pub const NO_LOCATION: &str = "Please enter a location or allow location detection.";
    pub const LOCATION_NOT_FOUND: &str =
        "Location not found. Try using a nearby place (e.g. Pekan, UMPSA).";
    pub const WEATHER_UNAVAILABLE: &str = "Weather info not available right now.";
    pub const TIME_UNAVAILABLE: &str = "Local time not available right now.";
    pub const NO_ITEMS: &str = "No items found within this radius.";
}
