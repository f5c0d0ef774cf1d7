//! GPX output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::{price_label, OutputFormatter};
use crate::view::NearbyView;
use std::fmt::Write;

/// GPX formatter - outputs the user and every match as waypoints
pub struct GpxFormatter;

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let _ = maud::Escaper::new(&mut out).write_str(s);
    out
}

impl OutputFormatter for GpxFormatter {
    fn name(&self) -> &str {
        "gpx"
    }

    fn description(&self) -> &str {
        "GPX waypoint file"
    }

    fn format(&self, view: &NearbyView, config: &Config) -> Result<String> {
        let mut gpx = String::new();

        gpx.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        gpx.push('\n');
        gpx.push_str(r#"<gpx version="1.1" creator="rent-nearby">"#);
        gpx.push('\n');

        gpx.push_str("  <metadata>\n");
        gpx.push_str(&format!(
            "    <name>Rentals within {} km</name>\n",
            view.radius_km
        ));
        gpx.push_str("  </metadata>\n");

        if let Some(user) = &view.user {
            gpx.push_str(&format!(r#"  <wpt lat="{}" lon="{}">"#, user.lat, user.lng));
            gpx.push('\n');
            gpx.push_str("    <name>You</name>\n");
            gpx.push_str(&format!("    <desc>{}</desc>\n", escape(&user.display_name)));
            gpx.push_str("  </wpt>\n");
        }

        for item in &view.items {
            let listing = &item.listing;
            gpx.push_str(&format!(
                r#"  <wpt lat="{}" lon="{}">"#,
                listing.coords.lat, listing.coords.lng
            ));
            gpx.push('\n');
            gpx.push_str(&format!("    <name>{}</name>\n", escape(&listing.name)));
            gpx.push_str(&format!(
                "    <desc>{}, {}, {} km away</desc>\n",
                escape(&listing.location),
                escape(&price_label(&config.defaults.currency, listing.price_per_day)),
                item.distance_km
            ));
            gpx.push_str(&format!(
                "    <link href=\"{}\"><text>Book</text></link>\n",
                escape(&listing.contact_url)
            ));
            gpx.push_str("  </wpt>\n");
        }

        gpx.push_str("</gpx>\n");
        Ok(gpx)
    }
}
