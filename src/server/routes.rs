//! HTTP routes
//!
//! Defines the page and all JSON API endpoints for the server.

use crate::catalog::RentalListing;
use crate::clock::{LocalTime, TimeBackend};
use crate::coord::Coordinates;
use crate::error::Error;
use crate::format::{available_formats, html::HtmlFormatter, FormatInfo, OutputFormatter};
use crate::geo::{IpLocate, IpLocation};
use crate::server::state::AppState;
use crate::view::{NearbyRequest, NearbyView};
use crate::weather::{WeatherBackend, WeatherReport};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Create the router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(page_handler))
        .route("/api/nearby", get(nearby_handler))
        .route("/api/catalog", get(catalog_handler))
        .route("/api/location", get(location_handler))
        .route("/api/weather", get(weather_handler))
        .route("/api/time", get(time_handler))
        .route("/api/formats", get(formats_handler))
        .route("/api/status", get(status_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Query parameters shared by the page and `/api/nearby`
#[derive(Debug, Default, Deserialize)]
pub struct NearbyQuery {
    /// Place name to geocode
    pub location: Option<String>,
    /// Radius in kilometres
    pub radius: Option<f64>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    /// Use the IP-detected position
    #[serde(default)]
    pub here: bool,
}

impl NearbyQuery {
    fn into_request(self) -> Result<NearbyRequest, ApiError> {
        let coords = match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)),
            (None, None) => None,
            _ => {
                return Err(ApiError {
                    error: "Both lat and lng are required".to_string(),
                    code: "INVALID_COORDINATES".to_string(),
                })
            }
        };

        Ok(NearbyRequest {
            query: self.location,
            coords,
            radius_km: self.radius,
            use_ip: self.here,
        })
    }
}

/// Coordinates for the single-provider endpoints
#[derive(Debug, Deserialize)]
pub struct PointQuery {
    pub lat: f64,
    pub lng: f64,
}

impl PointQuery {
    fn coords(&self) -> Result<Coordinates, ApiError> {
        let coords = Coordinates::new(self.lat, self.lng);
        coords.validate().map_err(ApiError::from)?;
        Ok(coords)
    }
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.code.as_str() {
            "PROVIDER_ERROR" => StatusCode::BAD_GATEWAY,
            "INTERNAL_ERROR" => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidCoordinates(_) => "INVALID_COORDINATES",
            Error::InvalidRadius(_) => "INVALID_RADIUS",
            Error::Config(_) => "CONFIG_ERROR",
            Error::Geocoding(_) | Error::Geo(_) | Error::Weather(_) | Error::Time(_) | Error::Http(_) => {
                "PROVIDER_ERROR"
            }
            _ => "INTERNAL_ERROR",
        };
        ApiError {
            error: err.to_string(),
            code: code.to_string(),
        }
    }
}

async fn build_view(state: &AppState, query: NearbyQuery) -> Result<NearbyView, ApiError> {
    let request = query.into_request()?;
    let config = state.config().await;
    state
        .services
        .view_builder(&config)
        .build(&state.catalog, request)
        .await
        .map_err(ApiError::from)
}

/// The nearby-items page
///
/// GET /
async fn page_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NearbyQuery>,
) -> Result<Html<String>, ApiError> {
    let view = build_view(&state, query).await?;
    let config = state.config().await;
    let page = HtmlFormatter.format(&view, &config).map_err(ApiError::from)?;
    Ok(Html(page))
}

/// Nearby items as JSON
///
/// GET /api/nearby
async fn nearby_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<NearbyView>, ApiError> {
    build_view(&state, query).await.map(Json)
}

/// Catalog response
#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub listings: Vec<RentalListing>,
    pub count: usize,
}

/// All listings
///
/// GET /api/catalog
async fn catalog_handler(State(state): State<Arc<AppState>>) -> Json<CatalogResponse> {
    let listings = state.catalog.listings().to_vec();
    Json(CatalogResponse {
        count: listings.len(),
        listings,
    })
}

/// Get current location from IP address
///
/// GET /api/location
async fn location_handler(State(state): State<Arc<AppState>>) -> Result<Json<IpLocation>, ApiError> {
    state.services.ip.locate().await.map(Json).map_err(ApiError::from)
}

/// Current weather at a point
///
/// GET /api/weather?lat=..&lng=..
async fn weather_handler(
    State(state): State<Arc<AppState>>,
    Query(point): Query<PointQuery>,
) -> Result<Json<WeatherReport>, ApiError> {
    let at = point.coords()?;
    state.services.weather.current(at).await.map(Json).map_err(ApiError::from)
}

/// Local time at a point
///
/// GET /api/time?lat=..&lng=..
async fn time_handler(
    State(state): State<Arc<AppState>>,
    Query(point): Query<PointQuery>,
) -> Result<Json<LocalTime>, ApiError> {
    let at = point.coords()?;
    state.services.clock.now_at(at).await.map(Json).map_err(ApiError::from)
}

/// Formats list response
#[derive(Debug, Serialize, Deserialize)]
pub struct FormatsResponse {
    pub formats: Vec<FormatInfo>,
}

/// List available output formats
///
/// GET /api/formats
async fn formats_handler() -> Json<FormatsResponse> {
    Json(FormatsResponse {
        formats: available_formats(),
    })
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Number of listings served
    pub catalog_size: usize,
    pub detect_ip: bool,
    pub weather: bool,
    pub local_time: bool,
    /// Whether a weather API key is available
    pub weather_configured: bool,
    /// Uptime in seconds
    pub uptime_secs: u64,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let config = state.config().await;
    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        catalog_size: state.catalog.len(),
        detect_ip: config.features.detect_ip,
        weather: config.features.weather,
        local_time: config.features.local_time,
        weather_configured: state.services.weather.is_configured(),
        uptime_secs: state.uptime_secs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    /// A config that never reaches a real provider
    fn offline_config() -> Config {
        let mut config = Config::default();
        config.features.detect_ip = false;
        config.features.weather = false;
        config.features.local_time = false;
        config.services.nominatim_url = "http://127.0.0.1:1".to_string();
        config.services.ip_api_url = "http://127.0.0.1:1".to_string();
        config.services.openweather_url = "http://127.0.0.1:1".to_string();
        config.services.time_api_url = "http://127.0.0.1:1".to_string();
        config.services.timeout_secs = 2;
        config
    }

    fn create_test_state(config: Config) -> Arc<AppState> {
        Arc::new(AppState::new(config))
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, axum::body::Bytes) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body)
    }

    #[tokio::test]
    async fn test_status_endpoint() {
        let app = create_router(create_test_state(offline_config()));
        let (status, body) = get(app, "/api/status").await;

        assert_eq!(status, StatusCode::OK);
        let status: StatusResponse = serde_json::from_slice(&body).unwrap();
        assert!(status.running);
        assert_eq!(status.catalog_size, 5);
        assert!(!status.weather);
    }

    #[tokio::test]
    async fn test_catalog_endpoint() {
        let app = create_router(create_test_state(offline_config()));
        let (status, body) = get(app, "/api/catalog").await;

        assert_eq!(status, StatusCode::OK);
        let catalog: CatalogResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(catalog.count, 5);
        assert_eq!(catalog.listings[0].price_per_day, 200);
    }

    #[tokio::test]
    async fn test_formats_endpoint() {
        let app = create_router(create_test_state(offline_config()));
        let (status, body) = get(app, "/api/formats").await;

        assert_eq!(status, StatusCode::OK);
        let formats: FormatsResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(formats.formats.len(), 5);
    }

    #[tokio::test]
    async fn test_nearby_by_coordinates() {
        let app = create_router(create_test_state(offline_config()));
        let (status, body) = get(app, "/api/nearby?lat=3.4976&lng=103.4246&radius=1").await;

        assert_eq!(status, StatusCode::OK);
        let view: NearbyView = serde_json::from_slice(&body).unwrap();
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].listing.plain_name(), "Generator");
        assert_eq!(view.map_points.len(), 2);
        assert!(view.notices.is_empty());
    }

    #[tokio::test]
    async fn test_nearby_geocoder_down_degrades() {
        let app = create_router(create_test_state(offline_config()));
        let (status, body) = get(app, "/api/nearby?location=Pekan").await;

        assert_eq!(status, StatusCode::OK);
        let view: NearbyView = serde_json::from_slice(&body).unwrap();
        assert!(view.user.is_none());
        assert!(view.notices[0].message.starts_with("Location lookup failed"));
    }

    #[tokio::test]
    async fn test_nearby_by_name_with_mock_geocoder() {
        let mock = Router::new().route(
            "/search",
            axum::routing::get(|| async {
                Json(serde_json::json!([
                    {"lat": "3.5225", "lon": "103.4185", "display_name": "Taman Permata, Pekan"}
                ]))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, mock).await.unwrap();
        });

        let mut config = offline_config();
        config.services.nominatim_url = format!("http://{}", addr);
        let app = create_router(create_test_state(config));
        let (status, body) = get(app, "/api/nearby?location=Taman%20Permata&radius=1").await;

        assert_eq!(status, StatusCode::OK);
        let view: NearbyView = serde_json::from_slice(&body).unwrap();
        assert_eq!(view.user.unwrap().display_name, "Taman Permata, Pekan");
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].listing.plain_name(), "Hammer");
    }

    #[tokio::test]
    async fn test_nearby_invalid_radius() {
        let app = create_router(create_test_state(offline_config()));
        let (status, body) = get(app, "/api/nearby?lat=3.5&lng=103.4&radius=500").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let err: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.code, "INVALID_RADIUS");
    }

    #[tokio::test]
    async fn test_nearby_half_coordinates() {
        let app = create_router(create_test_state(offline_config()));
        let (status, body) = get(app, "/api/nearby?lat=3.5").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let err: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.code, "INVALID_COORDINATES");
    }

    #[tokio::test]
    async fn test_page_renders_html() {
        let app = create_router(create_test_state(offline_config()));
        let (status, body) = get(app, "/?lat=3.4976&lng=103.4246&radius=5").await;

        assert_eq!(status, StatusCode::OK);
        let page = String::from_utf8(body.to_vec()).unwrap();
        assert!(page.contains("Available Items Nearby"));
        assert!(page.contains("📷 Camera"));
        assert!(page.contains("L.map('map')"));
    }

    #[tokio::test]
    async fn test_page_without_location() {
        let app = create_router(create_test_state(offline_config()));
        let (status, body) = get(app, "/").await;

        assert_eq!(status, StatusCode::OK);
        let page = String::from_utf8(body.to_vec()).unwrap();
        assert!(page.contains("Please enter a location or allow location detection."));
        assert!(!page.contains("L.map("));
    }

    #[tokio::test]
    async fn test_page_with_cleared_location() {
        let mut config = offline_config();
        config.features.detect_ip = true;
        let app = create_router(create_test_state(config));
        let (status, body) = get(app, "/?location=&radius=5").await;

        assert_eq!(status, StatusCode::OK);
        let page = String::from_utf8(body.to_vec()).unwrap();
        assert!(page.contains("Please enter a location or allow location detection."));
        assert!(page.contains(r#"name="location" value="""#));
        assert!(!page.contains("Available Items Nearby"));
    }

    #[tokio::test]
    async fn test_weather_endpoint_without_provider() {
        let app = create_router(create_test_state(offline_config()));
        let (status, body) = get(app, "/api/weather?lat=3.5&lng=103.4").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let err: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.code, "PROVIDER_ERROR");
    }

    #[tokio::test]
    async fn test_time_endpoint_invalid_point() {
        let app = create_router(create_test_state(offline_config()));
        let (status, body) = get(app, "/api/time?lat=123&lng=103.4").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let err: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.code, "INVALID_COORDINATES");
    }
}
