//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Config;
use crate::error::{Error, Result};
use clap::Args;
use std::fmt::Write;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "defaults.radius_km")
    pub key: Option<String>,

    /// Value to set (if not provided, shows current value)
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Reset config to defaults
    #[arg(long)]
    pub reset: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    if args.path {
        let path = Config::config_path()?;
        println!("{}", path.display());
        return Ok(());
    }

    if args.reset {
        Config::default().save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load()?;

    match (&args.key, &args.value) {
        (None, None) => {
            print!("{}", render_all(&config));
        }

        (Some(key), None) => {
            if let Some(value) = config.get(key) {
                println!("{}", value);
            } else {
                eprintln!("Unknown config key: {}", key);
                eprintln!("\nAvailable keys:");
                for k in Config::available_keys() {
                    eprintln!("  {}", k);
                }
                std::process::exit(1);
            }
        }

        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save()?;
            println!("{} = {}", key, value);
        }

        (None, Some(_)) => {
            return Err(Error::Config("Must specify a key to set a value".to_string()));
        }
    }

    Ok(())
}

/// All configuration values in TOML-like form, keys masked
fn render_all(config: &Config) -> String {
    let mut out = String::new();
    let d = &config.defaults;
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "radius_km = {}", d.radius_km);
    let _ = writeln!(out, "min_radius_km = {}", d.min_radius_km);
    let _ = writeln!(out, "max_radius_km = {}", d.max_radius_km);
    let _ = writeln!(out, "format = \"{}\"", d.format);
    let _ = writeln!(out, "currency = \"{}\"", d.currency);
    let _ = writeln!(out);

    let _ = writeln!(out, "[server]");
    let _ = writeln!(out, "host = \"{}\"", config.server.host);
    let _ = writeln!(out, "port = {}", config.server.port);
    let _ = writeln!(out);

    let _ = writeln!(out, "[location]");
    let _ = writeln!(out, "default_here = {}", config.location.default_here);
    let _ = writeln!(out);

    let f = &config.features;
    let _ = writeln!(out, "[features]");
    let _ = writeln!(out, "detect_ip = {}", f.detect_ip);
    let _ = writeln!(out, "weather = {}", f.weather);
    let _ = writeln!(out, "local_time = {}", f.local_time);
    let _ = writeln!(out);

    let s = &config.services;
    let _ = writeln!(out, "[services]");
    let _ = writeln!(out, "nominatim_url = \"{}\"", s.nominatim_url);
    let _ = writeln!(out, "ip_api_url = \"{}\"", s.ip_api_url);
    let _ = writeln!(out, "openweather_url = \"{}\"", s.openweather_url);
    let _ = writeln!(out, "time_api_url = \"{}\"", s.time_api_url);
    let _ = writeln!(out, "timeout_secs = {}", s.timeout_secs);
    let _ = writeln!(out);

    let _ = writeln!(out, "[url]");
    let _ = writeln!(out, "default = \"{}\"", config.url.default);
    let _ = writeln!(out);

    let _ = writeln!(out, "[url.providers]");
    let mut providers: Vec<_> = config.url.providers.iter().collect();
    providers.sort();
    for (name, template) in providers {
        let _ = writeln!(out, "{} = \"{}\"", name, template);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "[api_keys]");
    if config.api_keys.openweather.is_empty() {
        let _ = writeln!(out, "openweather = \"\" # not configured");
    } else {
        let _ = writeln!(out, "openweather = \"***\" # configured");
    }
    out
}
