//! Human-readable text output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::{price_label, OutputFormatter};
use crate::view::{NearbyView, NoticeLevel};
use std::fmt::Write;

/// Text formatter - outputs a terminal rendition of the page
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, view: &NearbyView, config: &Config) -> Result<String> {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write(&mut out, view, config);
        Ok(out)
    }
}

impl TextFormatter {
    fn write(&self, out: &mut String, view: &NearbyView, config: &Config) -> std::fmt::Result {
        writeln!(out, "🔍 Find Items for Rent Near You")?;
        if let Some(query) = &view.query {
            writeln!(out, "📍 Location: {}", query)?;
        }
        writeln!(out, "📏 Radius: {} km", view.radius_km)?;

        if let Some(detected) = &view.detected {
            writeln!(out)?;
            writeln!(out, "Detected Location from IP: {}", detected.summary())?;
            writeln!(
                out,
                "  Latitude: {}, Longitude: {}",
                detected.location.lat, detected.location.lng
            )?;
        }

        if let Some(user) = &view.user {
            writeln!(out)?;
            writeln!(out, "Searching around: {} ({:.4}, {:.4})", user.display_name, user.lat, user.lng)?;
        }

        if let Some(weather) = &view.weather {
            writeln!(out)?;
            writeln!(out, "🌤️ Current Weather at Your Location:")?;
            writeln!(out, "  Temperature: {}°C", weather.temp_c)?;
            writeln!(out, "  Condition: {}", weather.description)?;
            writeln!(out, "  Humidity: {}%", weather.humidity)?;
            writeln!(out, "  Wind Speed: {} m/s", weather.wind_speed)?;
        }

        if let Some(time) = &view.local_time {
            writeln!(out)?;
            writeln!(out, "🕒 Local Time: {}", time.summary())?;
        }

        if !view.items.is_empty() {
            writeln!(out)?;
            writeln!(out, "📦 Available Items Nearby:")?;
            for item in &view.items {
                let listing = &item.listing;
                writeln!(out)?;
                writeln!(out, "  {}", listing.name)?;
                writeln!(out, "    📍 {}", listing.location)?;
                writeln!(out, "    💰 {}", price_label(&config.defaults.currency, listing.price_per_day))?;
                writeln!(out, "    🧭 {} km away", item.distance_km)?;
                writeln!(out, "    📞 Book Now ({}): {}", listing.contact().label(), listing.contact_url)?;
            }
        }

        if !view.notices.is_empty() {
            writeln!(out)?;
            for notice in &view.notices {
                let tag = match notice.level {
                    NoticeLevel::Info => "info",
                    NoticeLevel::Warning => "warning",
                    NoticeLevel::Error => "error",
                };
                writeln!(out, "[{}] {}", tag, notice.message)?;
            }
        }

        if let Some(center) = view.map_center() {
            if let Ok(url) = config.format_url(None, center.lat, center.lng) {
                writeln!(out)?;
                writeln!(out, "🗺️ Map: {}", url)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::testing::sample_view;

    #[test]
    fn test_text_format() {
        let output = TextFormatter.format(&sample_view(), &Config::default()).unwrap();

        assert!(output.contains("Find Items for Rent Near You"));
        assert!(output.contains("📍 Location: Pekan"));
        assert!(output.contains("Detected Location from IP: Pekan, Pahang, Malaysia"));
        assert!(output.contains("Condition: Clear Sky"));
        assert!(output.contains("🔌 Generator"));
        assert!(output.contains("RM300 / day"));
        assert!(output.contains("0 km away"));
        assert!(output.contains("Email jokerz1403@gmail.com"));
        assert!(output.contains("[info] hello <world>"));
        assert!(output.contains("openstreetmap.org"));
        assert!(!output.contains("Camera"));
    }

    #[test]
    fn test_text_uses_configured_currency() {
        let mut config = Config::default();
        config.defaults.currency = "$".to_string();
        let output = TextFormatter.format(&sample_view(), &config).unwrap();
        assert!(output.contains("$20 / day"));
    }

    #[test]
    fn test_text_formatter_info() {
        assert_eq!(TextFormatter.name(), "text");
        assert!(!TextFormatter.description().is_empty());
    }
}
