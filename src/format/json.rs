//! JSON output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::view::NearbyView;

/// JSON formatter - outputs the full view as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Full JSON view"
    }

    fn format(&self, view: &NearbyView, _config: &Config) -> Result<String> {
        Ok(serde_json::to_string_pretty(view)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::testing::sample_view;

    #[test]
    fn test_json_format() {
        let output = JsonFormatter.format(&sample_view(), &Config::default()).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["radius_km"], 1.5);
        assert_eq!(parsed["items"][0]["price_per_day"], 20);
        assert!(parsed["items"][0]["distance_km"].is_number());
        assert_eq!(parsed["map_points"][0]["kind"], "user");
        assert_eq!(parsed["notices"][0]["level"], "info");
    }

    #[test]
    fn test_json_round_trips_into_view() {
        let output = JsonFormatter.format(&sample_view(), &Config::default()).unwrap();
        let view: NearbyView = serde_json::from_str(&output).unwrap();
        assert_eq!(view.items.len(), sample_view().items.len());
    }
}
