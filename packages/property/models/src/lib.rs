#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Property inventory, site plan, and pagination types.
//!
//! These are the normalized records the dashboard works with. Every field
//! that the upstream API may omit is an [`Option`], and absence is never
//! conflated with zero: a property without a price is excluded from price
//! averages rather than counted as free.

mod metro;
pub mod pagination;

use serde::{Deserialize, Serialize};

pub use metro::MetroKey;
pub use pagination::{PageLink, Pagination};

/// A single inventory unit (homesite) as listed by a builder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// City name, as provided (not normalized).
    pub city: Option<String>,
    /// State abbreviation, as provided (not normalized).
    pub state: Option<String>,
    /// ZIP code.
    pub zipcode: Option<String>,
    /// Builder / master-planned community code.
    pub builder_code: Option<String>,
    /// Community name.
    pub community: Option<String>,
    /// Listed homesite price in dollars.
    pub homesite_price: Option<f64>,
    /// Homesite size in square feet.
    pub homesite_square_feet: Option<f64>,
    /// Latitude in decimal degrees.
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees.
    pub longitude: Option<f64>,
}

impl Property {
    /// Returns the normalized metro key, or `None` if city or state is
    /// missing.
    #[must_use]
    pub fn metro_key(&self) -> Option<MetroKey> {
        MetroKey::new(self.city.as_deref()?, self.state.as_deref()?)
    }

    /// Price divided by square footage, when both are present.
    #[must_use]
    pub fn price_per_sq_ft(&self) -> Option<f64> {
        let price = self.homesite_price?;
        let sq_ft = self.homesite_square_feet?;
        Some(price / sq_ft)
    }

    /// [`Self::price_per_sq_ft`] rounded to whole dollars for display.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn rounded_price_per_sq_ft(&self) -> Option<i64> {
        self.price_per_sq_ft().map(|v| v.round() as i64)
    }

    /// Human-readable location such as `"Dallas, TX 75201"`.
    ///
    /// Returns `None` unless both city and state are present.
    #[must_use]
    pub fn location_label(&self) -> Option<String> {
        let city = self.city.as_deref()?;
        let state = self.state.as_deref()?;
        Some(match self.zipcode.as_deref() {
            Some(zip) => format!("{city}, {state} {zip}"),
            None => format!("{city}, {state}"),
        })
    }

    /// Returns `(latitude, longitude)` when both coordinates are present.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

/// Aggregate sales record for a community.
///
/// `sold_count <= total_count` is expected but not enforced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitePlan {
    /// City name, as provided.
    pub city: Option<String>,
    /// State abbreviation, as provided.
    pub state: Option<String>,
    /// Units sold in this community.
    pub sold_count: u64,
    /// Total units in this community.
    pub total_count: u64,
}

impl SitePlan {
    /// Returns the normalized metro key, or `None` if city or state is
    /// missing.
    #[must_use]
    pub fn metro_key(&self) -> Option<MetroKey> {
        MetroKey::new(self.city.as_deref()?, self.state.as_deref()?)
    }
}

/// One page of properties as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyPage {
    /// Properties on this page.
    pub properties: Vec<Property>,
    /// Total number of pages available (always at least 1).
    pub total_pages: u32,
}

impl PropertyPage {
    /// An empty single-page result, used as the fallback for a failed
    /// fetch.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            properties: Vec::new(),
            total_pages: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dallas() -> Property {
        Property {
            city: Some("Dallas".to_string()),
            state: Some("TX".to_string()),
            zipcode: Some("75201".to_string()),
            homesite_price: Some(300_000.0),
            homesite_square_feet: Some(1500.0),
            ..Property::default()
        }
    }

    #[test]
    fn computes_price_per_sq_ft() {
        let p = dallas();
        assert_eq!(p.rounded_price_per_sq_ft(), Some(200));
    }

    #[test]
    fn price_per_sq_ft_requires_both_fields() {
        let p = Property {
            homesite_square_feet: None,
            ..dallas()
        };
        assert!(p.price_per_sq_ft().is_none());
    }

    #[test]
    fn formats_location_label() {
        assert_eq!(dallas().location_label().unwrap(), "Dallas, TX 75201");

        let no_zip = Property {
            zipcode: None,
            ..dallas()
        };
        assert_eq!(no_zip.location_label().unwrap(), "Dallas, TX");

        let no_state = Property {
            state: None,
            ..dallas()
        };
        assert!(no_state.location_label().is_none());
    }

    #[test]
    fn property_without_state_has_no_metro() {
        let p = Property {
            state: None,
            ..dallas()
        };
        assert!(p.metro_key().is_none());
    }

    #[test]
    fn site_plan_metro_key_is_normalized() {
        let plan = SitePlan {
            city: Some("dallas".to_string()),
            state: Some("tx".to_string()),
            sold_count: 1,
            total_count: 2,
        };
        assert_eq!(plan.metro_key().unwrap().as_str(), "Dallas, TX");
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(dallas()).unwrap();
        assert_eq!(json["homesitePrice"], 300_000.0);
        assert_eq!(json["builderCode"], serde_json::Value::Null);
    }
}
