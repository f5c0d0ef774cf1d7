//! OpenWeatherMap current weather backend

use crate::constants::api::{OPENWEATHER_KEY_ENV, OPENWEATHER_URL, USER_AGENT};
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::weather::{title_case, WeatherBackend, WeatherReport};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// OpenWeatherMap client
#[derive(Debug, Clone)]
pub struct OpenWeatherBackend {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwmResponse {
    main: OwmMain,
    #[serde(default)]
    weather: Vec<OwmCondition>,
    wind: OwmWind,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

impl OpenWeatherBackend {
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.to_string(),
            api_key,
        }
    }

    /// Whether a key is available at all
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn into_report(data: OwmResponse) -> Result<WeatherReport> {
        let condition = data
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| Error::Weather("No weather condition in response".to_string()))?;

        Ok(WeatherReport {
            temp_c: data.main.temp,
            description: title_case(&condition.description),
            humidity: data.main.humidity,
            wind_speed: data.wind.speed,
        })
    }
}

impl Default for OpenWeatherBackend {
    fn default() -> Self {
        let key = std::env::var(OPENWEATHER_KEY_ENV).ok().filter(|k| !k.is_empty());
        Self::new(OPENWEATHER_URL, key, Duration::from_secs(10))
    }
}

impl WeatherBackend for OpenWeatherBackend {
    async fn current(&self, at: Coordinates) -> Result<WeatherReport> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            Error::Weather(format!(
                "No OpenWeatherMap API key (set api_keys.openweather or {})",
                OPENWEATHER_KEY_ENV
            ))
        })?;

        let url = format!(
            "{}?lat={}&lon={}&appid={}&units=metric",
            self.base_url,
            at.lat,
            at.lng,
            urlencoding::encode(api_key)
        );
        debug!(lat = at.lat, lng = at.lng, "fetching weather");

        let response = self.client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Weather(format!("Weather request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Weather(format!(
                "Weather API returned status: {}",
                response.status()
            )));
        }

        let data: OwmResponse = response
            .json()
            .await
            .map_err(|e| Error::Weather(format!("Failed to parse weather response: {}", e)))?;

        Self::into_report(data)
    }
}
