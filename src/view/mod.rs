//! Nearby-items view
//!
//! Resolves where the user is, asks the optional providers about that
//! point, and filters the catalog. Provider failures never abort the view;
//! each one becomes a [`Notice`] instead.

use crate::catalog::Catalog;
use crate::clock::{get_time_backend, LocalTime, TimeApiBackend, TimeBackend};
use crate::config::{Config, DefaultsConfig};
use crate::constants::messages;
use crate::coord::Coordinates;
use crate::error::Result;
use crate::geo::{get_geocoder, get_ip_locator, GeoBackend, GeoLocation, IpLocate, IpLocation, IpLocator, NominatimBackend};
use crate::search::{find_nearby, map_points, MapPoint, NearbyItem, SearchRadius};
use crate::weather::{get_weather_backend, OpenWeatherBackend, WeatherBackend, WeatherReport};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Label of the user's own map marker
const USER_MARKER_LABEL: &str = "You are here";

/// How loud a notice is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A message shown alongside the results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

/// What the user asked for
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NearbyRequest {
    /// Place name to geocode
    pub query: Option<String>,
    /// Exact position, takes precedence over `query`
    pub coords: Option<Coordinates>,
    /// Radius in km; the configured default when absent
    pub radius_km: Option<f64>,
    /// Use the IP-detected point directly instead of geocoding
    #[serde(default)]
    pub use_ip: bool,
}

/// Which optional lookups run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    pub detect_ip: bool,
    pub weather: bool,
    pub local_time: bool,
    /// Fall back to the IP-detected point when nothing else is given
    pub fallback_to_ip: bool,
}

impl ViewOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            detect_ip: config.features.detect_ip,
            weather: config.features.weather,
            local_time: config.features.local_time,
            fallback_to_ip: config.location.default_here,
        }
    }

    /// Only the distance filter, no optional providers
    pub fn minimal() -> Self {
        Self {
            detect_ip: false,
            weather: false,
            local_time: false,
            fallback_to_ip: false,
        }
    }
}

/// Everything needed to render the results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyView {
    /// Effective place query (typed, or the detected city)
    pub query: Option<String>,
    pub radius_km: f64,
    pub detected: Option<IpLocation>,
    /// Where distances are measured from
    pub user: Option<GeoLocation>,
    pub weather: Option<WeatherReport>,
    pub local_time: Option<LocalTime>,
    pub items: Vec<NearbyItem>,
    pub map_points: Vec<MapPoint>,
    pub notices: Vec<Notice>,
}

impl NearbyView {
    fn empty(query: Option<String>, radius: SearchRadius) -> Self {
        Self {
            query,
            radius_km: radius.km(),
            detected: None,
            user: None,
            weather: None,
            local_time: None,
            items: Vec::new(),
            map_points: Vec::new(),
            notices: Vec::new(),
        }
    }

    /// Center of the map: the user if known, else the first marker
    pub fn map_center(&self) -> Option<Coordinates> {
        self.user
            .as_ref()
            .map(GeoLocation::coords)
            .or_else(|| self.map_points.first().map(|p| Coordinates::new(p.lat, p.lng)))
    }
}

/// Builds a [`NearbyView`] from the four external services
pub struct ViewBuilder<'a, G, I, W, T> {
    geocoder: &'a G,
    ip: &'a I,
    weather: &'a W,
    clock: &'a T,
    options: ViewOptions,
    defaults: DefaultsConfig,
}

impl<'a, G, I, W, T> ViewBuilder<'a, G, I, W, T>
where
    G: GeoBackend,
    I: IpLocate,
    W: WeatherBackend,
    T: TimeBackend,
{
    pub fn new(geocoder: &'a G, ip: &'a I, weather: &'a W, clock: &'a T) -> Self {
        Self {
            geocoder,
            ip,
            weather,
            clock,
            options: ViewOptions::minimal(),
            defaults: DefaultsConfig::default(),
        }
    }

    pub fn with_options(mut self, options: ViewOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_defaults(mut self, defaults: DefaultsConfig) -> Self {
        self.defaults = defaults;
        self
    }

    /// Build the view
    ///
    /// Fails only for an out-of-range radius or invalid explicit coordinates.
    pub async fn build(&self, catalog: &Catalog, request: NearbyRequest) -> Result<NearbyView> {
        let radius = SearchRadius::from_config(request.radius_km, &self.defaults)?;
        if let Some(coords) = &request.coords {
            coords.validate()?;
        }

        // A typed place never labels the IP point
        let typed_query = request
            .query
            .as_deref()
            .filter(|_| !request.use_ip)
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_string);

        let mut view = NearbyView::empty(typed_query, radius);

        if self.options.detect_ip || self.options.fallback_to_ip || request.use_ip {
            match self.ip.locate().await {
                Ok(detected) => {
                    info!(location = %detected.summary(), "detected location from IP");
                    view.detected = Some(detected);
                }
                Err(e) => {
                    warn!(error = %e, "IP location failed");
                    view.notices.push(Notice::info(messages::IP_UNAVAILABLE));
                }
            }
        }

        // The detected city prefills the query only when none was sent at all
        if request.query.is_none() && request.coords.is_none() && !request.use_ip {
            view.query = view
                .detected
                .as_ref()
                .and_then(|d| d.city.clone())
                .filter(|c| !c.is_empty());
        }

        let user = self.resolve_user(&request, &mut view).await;
        view.user = user;

        let Some(user) = view.user.clone() else {
            return Ok(view);
        };
        let at = user.coords();

        if self.options.weather {
            match self.weather.current(at).await {
                Ok(report) => view.weather = Some(report),
                Err(e) => {
                    warn!(error = %e, "weather lookup failed");
                    view.notices.push(Notice::info(messages::WEATHER_UNAVAILABLE));
                }
            }
        }

        if self.options.local_time {
            match self.clock.now_at(at).await {
                Ok(time) => view.local_time = Some(time),
                Err(e) => {
                    warn!(error = %e, "local time lookup failed");
                    view.notices.push(Notice::info(messages::TIME_UNAVAILABLE));
                }
            }
        }

        view.items = find_nearby(catalog, at, radius);
        if view.items.is_empty() {
            view.notices.push(Notice::warning(messages::NO_ITEMS));
        }
        view.map_points = map_points(at, USER_MARKER_LABEL, &view.items);

        info!(
            location = %user.display_name,
            radius_km = radius.km(),
            matches = view.items.len(),
            "built nearby view"
        );

        Ok(view)
    }

    async fn resolve_user(&self, request: &NearbyRequest, view: &mut NearbyView) -> Option<GeoLocation> {
        if let Some(coords) = request.coords {
            let display_name = match &view.query {
                Some(query) => query.clone(),
                None => self.place_name(coords).await,
            };
            return Some(GeoLocation {
                lat: coords.lat,
                lng: coords.lng,
                display_name,
            });
        }

        if request.use_ip {
            // The IP failure notice is already recorded
            return view.detected.as_ref().map(|d| d.location.clone());
        }

        if let Some(query) = view.query.clone() {
            return match self.geocoder.geocode(&query).await {
                Ok(Some(found)) => Some(found),
                Ok(None) => {
                    info!(%query, "location not found");
                    view.notices.push(Notice::error(messages::LOCATION_NOT_FOUND));
                    None
                }
                Err(e) => {
                    warn!(%query, error = %e, "geocoding failed");
                    view.notices
                        .push(Notice::error(format!("Location lookup failed: {}", e)));
                    None
                }
            };
        }

        // A cleared field is a deliberate "no location"
        if request.query.is_some() {
            view.notices.push(Notice::info(messages::NO_LOCATION));
            return None;
        }

        if self.options.fallback_to_ip {
            if let Some(detected) = &view.detected {
                return Some(detected.location.clone());
            }
        }

        view.notices.push(Notice::info(messages::NO_LOCATION));
        None
    }

    /// Reverse-geocoded label for a coordinate, or the coordinate itself
    async fn place_name(&self, coords: Coordinates) -> String {
        match self.geocoder.reverse_geocode(coords.lat, coords.lng).await {
            Ok(Some(found)) => found.display_name,
            Ok(None) => coords.to_string(),
            Err(e) => {
                debug!(error = %e, "reverse geocoding failed");
                coords.to_string()
            }
        }
    }
}

/// The production set of external services
#[derive(Debug)]
pub struct Services {
    pub geocoder: NominatimBackend,
    pub ip: IpLocator,
    pub weather: OpenWeatherBackend,
    pub clock: TimeApiBackend,
}

impl Services {
    pub fn from_config(config: &Config) -> Self {
        Self {
            geocoder: get_geocoder(config),
            ip: get_ip_locator(config),
            weather: get_weather_backend(config),
            clock: get_time_backend(config),
        }
    }

    /// A builder over these services, configured from `config`
    pub fn view_builder(
        &self,
        config: &Config,
    ) -> ViewBuilder<'_, NominatimBackend, IpLocator, OpenWeatherBackend, TimeApiBackend> {
        ViewBuilder::new(&self.geocoder, &self.ip, &self.weather, &self.clock)
            .with_options(ViewOptions::from_config(config))
            .with_defaults(config.defaults.clone())
    }
}
