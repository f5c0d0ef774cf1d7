//! rent-nearby: find items for rent near you
//!
//! A library and CLI tool that filters a small catalog of rental listings
//! by geodesic distance from the user, enriched with IP geolocation,
//! current weather and local time.
//!
//! ## Features
//!
//! - Built-in catalog of rental listings with contact links
//! - Radius search on the WGS84 ellipsoid
//! - Place-name geocoding via OpenStreetMap Nominatim
//! - IP geolocation, weather and local time lookups
//! - HTTP page + JSON API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use rent_nearby::catalog::Catalog;
//! use rent_nearby::coord::Coordinates;
//! use rent_nearby::search::{find_nearby, SearchRadius};
//!
//! let catalog = Catalog::builtin();
//! let pekan = Coordinates::new(3.4976, 103.4246);
//! let radius = SearchRadius::new(5.0, 1.0, 20.0).unwrap();
//!
//! for item in find_nearby(&catalog, pekan, radius) {
//!     println!("{} is {} km away", item.listing.name, item.distance_km);
//! }
//! ```

pub mod catalog;
pub mod cli;
pub mod clock;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod format;
pub mod geo;
pub mod search;
pub mod server;
pub mod view;
pub mod weather;

// Re-export commonly used types
pub use catalog::Catalog;
pub use config::Config;
pub use coord::Coordinates;
pub use error::{Error, Result};
pub use view::NearbyView;
