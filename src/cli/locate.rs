//! Locate command handler
//!
//! Shows where the IP geolocation service thinks you are.

use crate::cli::init_logging;
use crate::config::Config;
use crate::error::Result;
use crate::geo::{get_ip_locator, IpLocate, IpLocator};
use clap::Args;

/// Locate command arguments
#[derive(Args)]
pub struct LocateArgs {
    /// Ignore the cached location and ask the service again
    #[arg(long)]
    pub refresh: bool,

    /// Print the location as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the locate command
pub async fn run(args: LocateArgs) -> Result<()> {
    init_logging("warn");

    let config = Config::load()?;
    let locator = get_ip_locator(&config);
    if args.refresh {
        locator.clear_cache();
    }

    let location = locator.locate().await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&location)?);
    } else {
        println!("Detected Location from IP: {}", location.summary());
        println!(
            "Latitude: {}, Longitude: {}",
            location.location.lat, location.location.lng
        );
        println!(
            "(cached for {} minutes)",
            IpLocator::cache_duration().as_secs() / 60
        );
    }

    Ok(())
}
