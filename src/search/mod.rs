//! Radius search over the catalog
//!
//! A listing is nearby when its geodesic distance from the user is at most
//! the radius. Matches keep catalog order.

use crate::catalog::{Catalog, RentalListing};
use crate::config::DefaultsConfig;
use crate::coord::distance::{geodesic_km, round_km};
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A validated search radius in kilometres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchRadius(f64);

impl SearchRadius {
    /// Validate a radius against explicit bounds
    pub fn new(km: f64, min_km: f64, max_km: f64) -> Result<Self> {
        if !km.is_finite() || km <= 0.0 {
            return Err(Error::InvalidRadius(format!(
                "Radius must be a positive number of kilometres, got {}",
                km
            )));
        }
        if km < min_km || km > max_km {
            return Err(Error::InvalidRadius(format!(
                "Radius {} km is outside [{}, {}]",
                km, min_km, max_km
            )));
        }
        Ok(Self(km))
    }

    /// Validate a radius (or the configured default) against configured bounds
    pub fn from_config(km: Option<f64>, defaults: &DefaultsConfig) -> Result<Self> {
        Self::new(
            km.unwrap_or(defaults.radius_km),
            defaults.min_radius_km,
            defaults.max_radius_km,
        )
    }

    pub fn km(&self) -> f64 {
        self.0
    }
}

/// A listing that fell inside the radius
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyItem {
    #[serde(flatten)]
    pub listing: RentalListing,
    /// Distance from the user, rounded to two decimals
    pub distance_km: f64,
}

/// What a map marker stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapPointKind {
    User,
    Item,
}

/// A marker on the result map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapPoint {
    pub lat: f64,
    pub lng: f64,
    pub label: String,
    pub kind: MapPointKind,
}

/// Listings within `radius` of `user`, in catalog order
pub fn find_nearby(catalog: &Catalog, user: Coordinates, radius: SearchRadius) -> Vec<NearbyItem> {
    catalog
        .listings()
        .iter()
        .filter_map(|listing| {
            let distance = geodesic_km(user, listing.coords);
            (distance <= radius.km()).then(|| NearbyItem {
                listing: listing.clone(),
                distance_km: round_km(distance),
            })
        })
        .collect()
}

/// Map markers: the user first, then every match
pub fn map_points(user: Coordinates, user_label: &str, items: &[NearbyItem]) -> Vec<MapPoint> {
    std::iter::once(MapPoint {
        lat: user.lat,
        lng: user.lng,
        label: user_label.to_string(),
        kind: MapPointKind::User,
    })
    .chain(items.iter().map(|item| MapPoint {
        lat: item.listing.coords.lat,
        lng: item.listing.coords.lng,
        label: item.listing.name.clone(),
        kind: MapPointKind::Item,
    }))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn radius(km: f64) -> SearchRadius {
        SearchRadius::new(km, 1.0, 20.0).unwrap()
    }

    #[test]
    fn test_radius_validation() {
        assert!(SearchRadius::new(5.0, 1.0, 20.0).is_ok());
        assert!(SearchRadius::new(1.0, 1.0, 20.0).is_ok());
        assert!(SearchRadius::new(20.0, 1.0, 20.0).is_ok());
        assert!(SearchRadius::new(0.5, 1.0, 20.0).is_err());
        assert!(SearchRadius::new(21.0, 1.0, 20.0).is_err());
        assert!(SearchRadius::new(-3.0, 1.0, 20.0).is_err());
        assert!(SearchRadius::new(f64::NAN, 1.0, 20.0).is_err());
        assert!(SearchRadius::new(f64::INFINITY, 1.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_radius_from_config_default() {
        let defaults = DefaultsConfig::default();
        assert_eq!(SearchRadius::from_config(None, &defaults).unwrap().km(), 5.0);
        assert_eq!(SearchRadius::from_config(Some(2.0), &defaults).unwrap().km(), 2.0);
        assert!(matches!(
            SearchRadius::from_config(Some(50.0), &defaults),
            Err(Error::InvalidRadius(_))
        ));
    }

    #[test]
    fn test_filter_matches_brute_force() {
        let catalog = Catalog::builtin();
        let users = [
            Coordinates::new(3.4976, 103.4246),
            Coordinates::new(3.5300, 103.4300),
            Coordinates::new(3.4700, 103.3900),
            Coordinates::new(3.8077, 103.3260),
        ];

        for user in users {
            for km in [1.0, 2.0, 3.5, 5.0, 20.0] {
                let found: Vec<String> = find_nearby(&catalog, user, radius(km))
                    .into_iter()
                    .map(|item| item.listing.name)
                    .collect();
                let expected: Vec<String> = catalog
                    .listings()
                    .iter()
                    .filter(|l| geodesic_km(user, l.coords) <= km)
                    .map(|l| l.name.clone())
                    .collect();
                assert_eq!(found, expected, "user {} radius {}", user, km);
            }
        }
    }

    #[test]
    fn test_from_pekan_within_five_km() {
        let catalog = Catalog::builtin();
        let pekan = Coordinates::new(3.4976, 103.4246);
        let items = find_nearby(&catalog, pekan, radius(5.0));

        assert_eq!(items.len(), 5);
        assert_eq!(items[3].listing.plain_name(), "Generator");
        assert_eq!(items[3].distance_km, 0.0);
    }

    #[test]
    fn test_small_radius_keeps_only_close_items() {
        let catalog = Catalog::builtin();
        let pekan = Coordinates::new(3.4976, 103.4246);
        let items = find_nearby(&catalog, pekan, radius(1.0));

        let names: Vec<&str> = items.iter().map(|i| i.listing.plain_name()).collect();
        assert_eq!(names, ["Generator"]);
    }

    #[test]
    fn test_far_away_finds_nothing() {
        let catalog = Catalog::builtin();
        let kuala_lumpur = Coordinates::new(3.1390, 101.6869);
        assert!(find_nearby(&catalog, kuala_lumpur, radius(20.0)).is_empty());
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let catalog = Catalog::builtin();
        let user = Coordinates::new(3.4976, 103.4246);
        let tent = catalog.find("tent").unwrap();
        let exact = geodesic_km(user, tent.coords);

        let at_boundary = SearchRadius::new(exact, 0.0, 20.0).unwrap();
        let items = find_nearby(&catalog, user, at_boundary);
        assert!(items.iter().any(|i| i.listing.name == tent.name));

        let just_inside = SearchRadius::new(exact - 1e-6, 0.0, 20.0).unwrap();
        let items = find_nearby(&catalog, user, just_inside);
        assert!(!items.iter().any(|i| i.listing.name == tent.name));
    }

    #[test]
    fn test_distances_are_rounded() {
        let catalog = Catalog::builtin();
        let user = Coordinates::new(3.5, 103.42);
        for item in find_nearby(&catalog, user, radius(20.0)) {
            let scaled = item.distance_km * 100.0;
            assert!((scaled - scaled.round()).abs() < 1e-6);
        }
    }

    #[test]
    fn test_map_points_user_first() {
        let catalog = Catalog::builtin();
        let user = Coordinates::new(3.4976, 103.4246);
        let items = find_nearby(&catalog, user, radius(1.0));
        let points = map_points(user, "You", &items);

        assert_eq!(points.len(), items.len() + 1);
        assert_eq!(points[0].kind, MapPointKind::User);
        assert_eq!(points[0].label, "You");
        assert!(points[1..].iter().all(|p| p.kind == MapPointKind::Item));
    }
}
