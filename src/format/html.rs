//! HTML page formatter
//!
//! Renders the whole nearby-items page: search form, detected location,
//! weather, item cards and a Leaflet map of the matches.

use crate::config::Config;
use crate::error::Result;
use crate::format::{price_label, OutputFormatter};
use crate::view::{NearbyView, NoticeLevel};
use maud::{html, Markup, PreEscaped, DOCTYPE};

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0 auto; max-width: 1100px; padding: 1rem 2rem; }
form { display: flex; flex-wrap: wrap; gap: 1rem; align-items: end; }
form label { display: flex; flex-direction: column; gap: .3rem; }
input[type=text] { min-width: 22rem; padding: .4rem; }
.notice { padding: .6rem 1rem; border-radius: 6px; margin: .6rem 0; }
.notice.info { background: #e8f1fd; }
.notice.warning { background: #fff6db; }
.notice.error { background: #fde8e8; }
.card { display: grid; grid-template-columns: 220px 1fr; gap: 1.5rem; padding: 1rem 0; border-bottom: 1px solid #ddd; }
.card img { width: 200px; border-radius: 6px; }
#map { height: 420px; border-radius: 8px; margin-bottom: 2rem; }
"#;

/// HTML formatter - outputs a standalone page
pub struct HtmlFormatter;

impl OutputFormatter for HtmlFormatter {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "Standalone HTML page with map"
    }

    fn format(&self, view: &NearbyView, config: &Config) -> Result<String> {
        Ok(render_page(view, config)?.into_string())
    }
}

fn notice_class(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Info => "notice info",
        NoticeLevel::Warning => "notice warning",
        NoticeLevel::Error => "notice error",
    }
}

/// Map markers as a script-safe JSON literal
fn map_script(view: &NearbyView) -> Result<Option<String>> {
    let Some(center) = view.map_center() else {
        return Ok(None);
    };
    let points = serde_json::to_string(&view.map_points)?.replace("</", "<\\/");

    Ok(Some(format!(
        r#"
const points = {points};
const map = L.map('map').setView([{lat}, {lng}], 13);
L.tileLayer('https://{{s}}.tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png', {{
    maxZoom: 19,
    attribution: '&copy; OpenStreetMap contributors'
}}).addTo(map);
for (const p of points) {{
    const marker = p.kind === 'user'
        ? L.circleMarker([p.lat, p.lng], {{ radius: 9, color: '#d33' }})
        : L.marker([p.lat, p.lng]);
    marker.addTo(map).bindPopup(p.label);
}}
if (points.length > 1) {{
    map.fitBounds(points.map(p => [p.lat, p.lng]), {{ padding: [30, 30] }});
}}
"#,
        points = points,
        lat = center.lat,
        lng = center.lng,
    )))
}

fn render_page(view: &NearbyView, config: &Config) -> Result<Markup> {
    let map_js = map_script(view)?;
    let defaults = &config.defaults;

    Ok(html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Nearby Rentals" }
                link rel="stylesheet" href=(LEAFLET_CSS);
                style { (PreEscaped(STYLE)) }
            }
            body {
                h1 { "🔍 Find Items for Rent Near You" }

                form method="get" action="/" {
                    label {
                        "📍 Enter your location (e.g. Pekan, UMPSA Pekan, Kuantan):"
                        input type="text" name="location" value=(view.query.as_deref().unwrap_or(""));
                    }
                    label {
                        "📏 Search radius (in km): " output id="radius-value" { (view.radius_km) }
                        input type="range" name="radius" step="1"
                            min=(defaults.min_radius_km) max=(defaults.max_radius_km)
                            value=(view.radius_km)
                            oninput="document.getElementById('radius-value').textContent = this.value";
                    }
                    button type="submit" { "Search" }
                }

                @if let Some(detected) = &view.detected {
                    div.notice.info {
                        strong { "Detected Location from IP: " } (detected.summary())
                        br;
                        "Latitude: " (detected.location.lat) ", Longitude: " (detected.location.lng)
                    }
                }

                @for notice in &view.notices {
                    div class=(notice_class(notice.level)) { (notice.message) }
                }

                @if let Some(weather) = &view.weather {
                    h2 { "🌤️ Current Weather at Your Location:" }
                    ul {
                        li { "Temperature: " (weather.temp_c) "°C" }
                        li { "Condition: " (weather.description) }
                        li { "Humidity: " (weather.humidity) "%" }
                        li { "Wind Speed: " (weather.wind_speed) " m/s" }
                    }
                }

                @if let Some(time) = &view.local_time {
                    p { "🕒 Local time: " (time.summary()) }
                }

                @if !view.items.is_empty() {
                    h2 { "📦 Available Items Nearby:" }
                    @for item in &view.items {
                        div.card {
                            img src=(item.listing.image_url) alt=(item.listing.plain_name());
                            div {
                                h3 { (item.listing.name) }
                                p { "📍 " (item.listing.location) }
                                p { "💰 " (price_label(&defaults.currency, item.listing.price_per_day)) }
                                p { "🧭 " (item.distance_km) " km away" }
                                a href=(item.listing.contact_url) target="_blank" rel="noopener" {
                                    "📞 Book Now"
                                }
                            }
                        }
                    }
                }

                @if let Some(map_js) = map_js {
                    h2 { "🗺️ Map of Nearby Items:" }
                    div #map {}
                    script src=(LEAFLET_JS) {}
                    script { (PreEscaped(map_js)) }
                }
            }
        }
    })
}
