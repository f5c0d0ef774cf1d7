//! Local time at a coordinate (timeapi.io)

use crate::config::Config;
use crate::constants::api::{TIME_API_URL, USER_AGENT};
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Wall-clock time in the time zone of a coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalTime {
    /// IANA zone name, e.g. "Asia/Kuala_Lumpur"
    pub time_zone: String,
    pub date_time: NaiveDateTime,
    pub day_of_week: String,
}

impl LocalTime {
    /// "Monday 14:05" style summary
    pub fn summary(&self) -> String {
        format!(
            "{} {} ({})",
            self.day_of_week,
            self.date_time.format("%H:%M"),
            self.time_zone
        )
    }
}

/// Trait for time providers
pub trait TimeBackend: Send + Sync {
    fn now_at(&self, at: Coordinates) -> impl std::future::Future<Output = Result<LocalTime>> + Send;
}

/// timeapi.io client
#[derive(Debug, Clone)]
pub struct TimeApiBackend {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimeApiResponse {
    date_time: String,
    time_zone: String,
    day_of_week: String,
}

impl TimeApiBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.to_string(),
        }
    }

    fn into_local_time(data: TimeApiResponse) -> Result<LocalTime> {
        // timeapi.io sends up to seven fractional digits and no offset
        let date_time = NaiveDateTime::parse_from_str(&data.date_time, "%Y-%m-%dT%H:%M:%S%.f")
            .map_err(|e| Error::Time(format!("Invalid dateTime '{}': {}", data.date_time, e)))?;

        Ok(LocalTime {
            time_zone: data.time_zone,
            date_time,
            day_of_week: data.day_of_week,
        })
    }
}

impl Default for TimeApiBackend {
    fn default() -> Self {
        Self::new(TIME_API_URL, Duration::from_secs(10))
    }
}

impl TimeBackend for TimeApiBackend {
    async fn now_at(&self, at: Coordinates) -> Result<LocalTime> {
        let url = format!(
            "{}?latitude={}&longitude={}",
            self.base_url, at.lat, at.lng
        );

        let response = self.client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Time(format!("Time request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Time(format!(
                "Time API returned status: {}",
                response.status()
            )));
        }

        let data: TimeApiResponse = response
            .json()
            .await
            .map_err(|e| Error::Time(format!("Failed to parse time response: {}", e)))?;

        Self::into_local_time(data)
    }
}

/// Build the time backend described by the config
pub fn get_time_backend(config: &Config) -> TimeApiBackend {
    TimeApiBackend::new(&config.services.time_api_url, config.services.timeout())
}
