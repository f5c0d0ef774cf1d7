//! Status command handler
//!
//! Shows which lookups are enabled and whether the server is up.

use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::Result;
use crate::server::routes::StatusResponse;
use clap::Args;

/// Status command arguments
#[derive(Args)]
pub struct StatusArgs {
    /// Check if server is running (tries to connect)
    #[arg(long)]
    pub server: bool,
}

/// Run the status command
pub async fn run(args: StatusArgs) -> Result<()> {
    let config = Config::load()?;

    println!("rent-nearby v{}", env!("CARGO_PKG_VERSION"));
    println!();

    if args.server {
        check_server_status(&config).await;
    }

    let on_off = |enabled: bool| if enabled { "on" } else { "off" };
    let features = &config.features;

    println!("Catalog: {} listings", Catalog::builtin().len());
    println!(
        "Radius:  {} km (allowed {}-{} km)",
        config.defaults.radius_km, config.defaults.min_radius_km, config.defaults.max_radius_km
    );
    println!();
    println!("Features:");
    println!("  IP detection: {}", on_off(features.detect_ip));
    println!("  Weather:      {}", on_off(features.weather));
    println!("  Local time:   {}", on_off(features.local_time));
    println!();
    println!(
        "Weather API key: {}",
        if config.openweather_key().is_some() {
            "configured"
        } else {
            "not configured"
        }
    );

    Ok(())
}

/// Check if the server is running
async fn check_server_status(config: &Config) {
    let url = format!("http://{}/api/status", config.server_addr());

    let client = reqwest::Client::builder()
        .timeout(config.services.timeout())
        .build()
        .unwrap_or_default();

    match client.get(&url).send().await {
        Ok(response) if response.status().is_success() => {
            println!("Server: RUNNING on {}", config.server_addr());
            if let Ok(status) = response.json::<StatusResponse>().await {
                println!("  Version: {}", status.version);
                println!("  Uptime:  {}s", status.uptime_secs);
            }
        }
        Ok(response) => {
            println!("Server: ERROR (status {})", response.status());
        }
        Err(_) => {
            println!("Server: NOT RUNNING on {}", config.server_addr());
        }
    }
    println!();
}
