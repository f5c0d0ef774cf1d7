//! URL output formatter

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::OutputFormatter;
use crate::view::NearbyView;

/// URL formatter - outputs a map URL centred on the user
pub struct UrlFormatter;

impl UrlFormatter {
    /// Format URL with optional provider override
    pub fn format_with_provider(
        &self,
        view: &NearbyView,
        config: &Config,
        provider: Option<&str>,
    ) -> Result<String> {
        let center = view
            .map_center()
            .ok_or_else(|| Error::Geo("No resolved location to link to".to_string()))?;
        config.format_url(provider, center.lat, center.lng)
    }
}

impl OutputFormatter for UrlFormatter {
    fn name(&self) -> &str {
        "url"
    }

    fn description(&self) -> &str {
        "Map URL for your location"
    }

    fn format(&self, view: &NearbyView, config: &Config) -> Result<String> {
        self.format_with_provider(view, config, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::testing::sample_view;

    #[test]
    fn test_url_format_default_provider() {
        let output = UrlFormatter.format(&sample_view(), &Config::default()).unwrap();
        assert_eq!(output, "https://www.openstreetmap.org/#map=15/3.4976/103.4246");
    }

    #[test]
    fn test_url_format_with_provider() {
        let output = UrlFormatter
            .format_with_provider(&sample_view(), &Config::default(), Some("google"))
            .unwrap();
        assert!(output.contains("google.com/maps"));
    }

    #[test]
    fn test_url_without_location() {
        let mut view = sample_view();
        view.user = None;
        view.map_points.clear();
        assert!(UrlFormatter.format(&view, &Config::default()).is_err());
    }
}
