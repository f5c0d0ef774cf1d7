//! Error types for rent-nearby

use thiserror::Error;

/// Main error type for rent-nearby operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid radius: {0}")]
    InvalidRadius(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Geocoding error: {0}")]
    Geocoding(String),

    #[error("Geo error: {0}")]
    Geo(String),

    #[error("Weather error: {0}")]
    Weather(String),

    #[error("Time error: {0}")]
    Time(String),
}

/// Result type alias for rent-nearby operations
pub type Result<T> = std::result::Result<T, Error>;
