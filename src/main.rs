//! rent-nearby CLI entry point
//!
//! Nearby rental finder - CLI + web app

use rent_nearby::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
