//! Server shared state
//!
//! Holds configuration, the catalog and the external service clients.

use crate::catalog::Catalog;
use crate::config::Config;
use crate::view::Services;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

/// Shared state for the HTTP server
pub struct AppState {
    /// Configuration
    pub config: Arc<RwLock<Config>>,

    /// Listings served by this instance
    pub catalog: Catalog,

    /// Geocoder, IP locator, weather and time clients
    pub services: Services,

    started: Instant,
}

impl AppState {
    /// Create new application state with the built-in catalog
    pub fn new(config: Config) -> Self {
        Self::with_catalog(config, Catalog::builtin())
    }

    pub fn with_catalog(config: Config, catalog: Catalog) -> Self {
        let services = Services::from_config(&config);
        Self {
            config: Arc::new(RwLock::new(config)),
            catalog,
            services,
            started: Instant::now(),
        }
    }

    /// Snapshot of the current configuration
    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }

    /// Seconds since the state was created
    pub fn uptime_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}
