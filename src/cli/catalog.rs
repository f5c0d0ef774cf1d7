//! Catalog command handler
//!
//! Prints every listing, without any location filtering.

use crate::catalog::{Catalog, RentalListing};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::price_label;
use clap::Args;

/// Catalog command arguments
#[derive(Args)]
pub struct CatalogArgs {
    /// Output format (text or json)
    #[arg(long, short = 'f', default_value = "text")]
    pub format: String,
}

/// Run the catalog command
pub fn run(args: CatalogArgs) -> Result<()> {
    let config = Config::load()?;
    let catalog = Catalog::builtin();
    println!("{}", render(&catalog, &args.format, &config.defaults.currency)?);
    Ok(())
}

fn render(catalog: &Catalog, format: &str, currency: &str) -> Result<String> {
    match format.to_lowercase().as_str() {
        "json" => Ok(serde_json::to_string_pretty(catalog.listings())?),
        "text" => Ok(catalog
            .listings()
            .iter()
            .map(|listing| render_listing(listing, currency))
            .collect::<Vec<_>>()
            .join("\n\n")),
        other => Err(Error::Config(format!(
            "Unknown catalog format: {} (expected text or json)",
            other
        ))),
    }
}

fn render_listing(listing: &RentalListing, currency: &str) -> String {
    format!(
        "{}\n  Location: {} {}\n  Price:    {}\n  Contact:  {}",
        listing.name,
        listing.location,
        listing.coords,
        price_label(currency, listing.price_per_day),
        listing.contact().label()
    )
}
