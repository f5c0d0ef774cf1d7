//! Rental listing catalog
//!
//! The catalog is compiled into the binary and never changes at runtime.

pub mod contact;

use crate::coord::Coordinates;
use serde::{Deserialize, Serialize};

pub use contact::ContactLink;

/// A single item offered for rent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalListing {
    /// Display label, emoji included
    pub name: String,
    /// Human-readable place name
    pub location: String,
    pub coords: Coordinates,
    /// Daily price in the configured currency
    pub price_per_day: u32,
    pub image_url: String,
    /// Click-to-chat or mailto link
    pub contact_url: String,
}

impl RentalListing {
    /// Parse the contact URL into its structured form
    pub fn contact(&self) -> ContactLink {
        ContactLink::parse(&self.contact_url)
    }

    /// Name without the leading emoji and whitespace
    pub fn plain_name(&self) -> &str {
        self.name
            .trim_start_matches(|c: char| !c.is_alphanumeric())
            .trim()
    }
}

/// An ordered, immutable set of listings
#[derive(Debug, Clone)]
pub struct Catalog {
    listings: Vec<RentalListing>,
}

struct Entry {
    name: &'static str,
    location: &'static str,
    lat: f64,
    lng: f64,
    price: u32,
    image: &'static str,
    contact: &'static str,
}

const BUILTIN: [Entry; 5] = [
    Entry {
        name: "📷 Camera",
        location: "Kampung Ketepang Tengah",
        lat: 3.5173,
        lng: 103.4262,
        price: 200,
        image: "https://i.ebayimg.com/images/g/sOwAAOSwBr1kWZ3e/s-l1200.jpg",
        contact: "https://wa.me/60148190876?text=Hi%2C%20I%20want%20to%20rent%20your%20Camera",
    },
    Entry {
        name: "🔨 Hammer",
        location: "Taman Permata",
        lat: 3.5225,
        lng: 103.4185,
        price: 50,
        image: "https://www.qualtry.com/cdn/shop/products/CU7B9350_staged_800x.jpg?v=1666289440",
        contact: "https://wa.me/60148190876?text=Hi%2C%20I%20want%20to%20rent%20your%20Hammer",
    },
    Entry {
        name: "📸 Tripod",
        location: "Taman Harmoni",
        lat: 3.5068,
        lng: 103.4299,
        price: 20,
        image: "https://i.ebayimg.com/images/g/z0oAAOSwKx9e27sQ/s-l400.jpg",
        contact: "https://wa.me/60148190876?text=Interested%20in%20your%20Tripod%20rental",
    },
    Entry {
        name: "🔌 Generator",
        location: "Pekan",
        lat: 3.4976,
        lng: 103.4246,
        price: 300,
        image: "https://d172ov9zf7ze1q.cloudfront.net/2021/06/Screenshot_20210531-235422_Chrome.jpg",
        contact: "mailto:jokerz1403@gmail.com?subject=Rent%20Generator",
    },
    Entry {
        name: "⛺ Tent",
        location: "Kampung Padang Polo",
        lat: 3.4912,
        lng: 103.4140,
        price: 80,
        image: "https://down-my.img.susercontent.com/file/my-11134233-7r98u-ludj1z3e6tbx13",
        contact: "https://wa.me/60148190876?text=Interested%20in%20renting%20the%20Tent",
    },
];

impl Catalog {
    /// The built-in listings around Pekan, Pahang
    pub fn builtin() -> Self {
        let listings = BUILTIN
            .iter()
            .map(|e| RentalListing {
                name: e.name.to_string(),
                location: e.location.to_string(),
                coords: Coordinates::new(e.lat, e.lng),
                price_per_day: e.price,
                image_url: e.image.to_string(),
                contact_url: e.contact.to_string(),
            })
            .collect();
        Self { listings }
    }

    /// Build a catalog from arbitrary listings
    pub fn from_listings(listings: Vec<RentalListing>) -> Self {
        Self { listings }
    }

    pub fn listings(&self) -> &[RentalListing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Find the first listing whose name contains `fragment`, ignoring case
    pub fn find(&self, fragment: &str) -> Option<&RentalListing> {
        let needle = fragment.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.listings
            .iter()
            .find(|l| l.plain_name().to_lowercase().contains(&needle))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
