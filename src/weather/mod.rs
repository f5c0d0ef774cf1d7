//! Current weather at a coordinate

pub mod openweather;

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::Result;
use serde::{Deserialize, Serialize};

pub use openweather::OpenWeatherBackend;

/// Current conditions, metric units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// Temperature in degrees Celsius
    pub temp_c: f64,
    /// Title-cased condition, e.g. "Light Rain"
    pub description: String,
    /// Relative humidity in percent
    pub humidity: f64,
    /// Wind speed in metres per second
    pub wind_speed: f64,
}

/// Trait for weather providers
pub trait WeatherBackend: Send + Sync {
    fn current(&self, at: Coordinates) -> impl std::future::Future<Output = Result<WeatherReport>> + Send;
}

/// Build the weather backend described by the config
pub fn get_weather_backend(config: &Config) -> OpenWeatherBackend {
    OpenWeatherBackend::new(
        &config.services.openweather_url,
        config.openweather_key(),
        config.services.timeout(),
    )
}

/// Capitalize the first letter of every word, lowercase the rest
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("light rain"), "Light Rain");
        assert_eq!(title_case("overcast clouds"), "Overcast Clouds");
        assert_eq!(title_case("THUNDERSTORM with heavy rain"), "Thunderstorm With Heavy Rain");
        assert_eq!(title_case("sky-is clear"), "Sky-Is Clear");
        assert_eq!(title_case(""), "");
    }
}
