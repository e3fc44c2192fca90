//! Geographic distribution of the current page.

use homesite_analytics_models::{DEFAULT_MAP_CENTER, GeoPoint};
use homesite_property_models::Property;

/// Marker label for properties without a builder code.
const FALLBACK_LABEL: &str = "Plan";

/// Map markers for every property with both coordinates.
#[must_use]
pub fn geo_points(properties: &[Property]) -> Vec<GeoPoint> {
    properties
        .iter()
        .filter_map(|p| {
            let (latitude, longitude) = p.coordinates()?;
            Some(GeoPoint {
                label: p
                    .builder_code
                    .clone()
                    .unwrap_or_else(|| FALLBACK_LABEL.to_string()),
                latitude,
                longitude,
                location: p.location_label(),
                price: p.homesite_price,
            })
        })
        .collect()
}

/// Where to center the map: the first marker, or [`DEFAULT_MAP_CENTER`].
#[must_use]
pub fn map_center(points: &[GeoPoint]) -> (f64, f64) {
    points
        .first()
        .map_or(DEFAULT_MAP_CENTER, |p| (p.latitude, p.longitude))
}
