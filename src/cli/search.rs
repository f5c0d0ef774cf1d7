//! Search command handler
//!
//! Finds listings near a typed place, a coordinate, or the IP location.

use crate::catalog::Catalog;
use crate::cli::init_logging;
use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter};
use crate::view::{NearbyRequest, NearbyView, NoticeLevel, Services, ViewOptions};
use clap::Args;

/// Search command arguments
#[derive(Args)]
pub struct SearchArgs {
    /// Place name to search around (geocoded)
    #[arg(long, short = 'l', conflicts_with_all = ["lat", "lng", "here"])]
    pub location: Option<String>,

    /// Latitude
    #[arg(long, requires = "lng", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lng: Option<f64>,

    /// Use current location (IP geolocation)
    #[arg(long, conflicts_with_all = ["lat", "lng", "location"])]
    pub here: bool,

    /// Search radius in kilometres
    #[arg(long, short = 'r')]
    pub radius: Option<f64>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// Show current weather even if disabled in config
    #[arg(long, conflicts_with = "no_weather")]
    pub weather: bool,

    /// Skip the weather lookup
    #[arg(long)]
    pub no_weather: bool,

    /// Show local time at the location
    #[arg(long)]
    pub time: bool,

    /// Skip IP location detection
    #[arg(long, conflicts_with = "here")]
    pub no_ip: bool,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

impl SearchArgs {
    fn options(&self, config: &Config) -> ViewOptions {
        let mut options = ViewOptions::from_config(config);
        if self.weather {
            options.weather = true;
        }
        if self.no_weather {
            options.weather = false;
        }
        if self.time {
            options.local_time = true;
        }
        if self.no_ip {
            options.detect_ip = false;
            options.fallback_to_ip = false;
        }
        options
    }

    fn request(&self) -> NearbyRequest {
        NearbyRequest {
            query: self.location.clone(),
            coords: self.lat.zip(self.lng).map(|(lat, lng)| Coordinates::new(lat, lng)),
            radius_km: self.radius,
            use_ip: self.here,
        }
    }
}

/// Run the search command
pub async fn run(args: SearchArgs) -> Result<()> {
    if args.list_formats {
        list_formats();
        return Ok(());
    }

    init_logging("warn");

    let config = Config::load()?;
    let format = args.format.clone().unwrap_or_else(|| config.defaults.format.clone());
    let formatter = get_formatter(&format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;

    let services = Services::from_config(&config);
    let view = services
        .view_builder(&config)
        .with_options(args.options(&config))
        .build(&Catalog::builtin(), args.request())
        .await?;

    let output = formatter.format(&view, &config)?;

    if let Some(path) = &args.output {
        std::fs::write(path, &output)?;
        eprintln!("Output written to {}", path);
    } else {
        println!("{}", output);
    }

    unresolved_error(&view).map_or(Ok(()), Err)
}

/// The error to exit with when no search point could be resolved
fn unresolved_error(view: &NearbyView) -> Option<Error> {
    if view.user.is_some() {
        return None;
    }
    let message = view
        .notices
        .iter()
        .find(|n| n.level == NoticeLevel::Error)
        .or_else(|| view.notices.first())
        .map(|n| n.message.clone())
        .unwrap_or_else(|| "No location resolved".to_string());
    Some(Error::Geocoding(message))
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:6} - {}", format.name, format.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use crate::view::testing::sample_view;
    use crate::view::Notice;
    use clap::Parser;

    fn parse(args: &[&str]) -> SearchArgs {
        let mut full = vec!["rent-nearby", "search"];
        full.extend_from_slice(args);
        match Cli::try_parse_from(full).unwrap().command {
            Commands::Search(args) => args,
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_flags_override_config() {
        let config = Config::default();
        let args = parse(&["--no-weather", "--time", "--no-ip"]);
        let options = args.options(&config);
        assert!(!options.weather);
        assert!(options.local_time);
        assert!(!options.detect_ip);
    }

    #[test]
    fn test_coordinates_request() {
        let args = parse(&["--lat", "3.5", "--lng", "-103.4", "-r", "2"]);
        let request = args.request();
        assert_eq!(request.coords, Some(Coordinates::new(3.5, -103.4)));
        assert_eq!(request.radius_km, Some(2.0));
        assert!(request.query.is_none());
    }

    #[test]
    fn test_lat_requires_lng() {
        let result = Cli::try_parse_from(["rent-nearby", "search", "--lat", "3.5"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unresolved_error() {
        assert!(unresolved_error(&sample_view()).is_none());

        let mut view = sample_view();
        view.user = None;
        view.notices = vec![Notice::info("IP down"), Notice::error("Location not found.")];
        let err = unresolved_error(&view).unwrap();
        assert!(err.to_string().contains("Location not found."));
    }
}
