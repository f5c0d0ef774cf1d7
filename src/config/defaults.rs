//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default search radius in kilometres
pub const DEFAULT_RADIUS_KM: f64 = 5.0;

/// Smallest radius the search accepts
pub const DEFAULT_MIN_RADIUS_KM: f64 = 1.0;

/// Largest radius the search accepts
pub const DEFAULT_MAX_RADIUS_KM: f64 = 20.0;

/// Default output format
pub const DEFAULT_FORMAT: &str = "text";

/// Currency prefix shown before daily prices
pub const DEFAULT_CURRENCY: &str = "RM";

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7878;

/// Default HTTP timeout for external providers
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default URL provider
pub const DEFAULT_URL_PROVIDER: &str = "openstreetmap";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "rent-nearby";
