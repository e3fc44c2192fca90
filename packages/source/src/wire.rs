//! Listings API response shapes and their normalization.
//!
//! Wire records keep every field as a raw [`serde_json::Value`] so that a
//! single oddly-typed field never fails a whole page; [`crate::parsing`]
//! decides what counts as present.

use homesite_property_models::{Property, PropertyPage, SitePlan};
use serde::Deserialize;
use serde_json::Value;

use crate::SourceError;
use crate::parsing::{parse_count, parse_lat_lng, parse_nonzero_f64, parse_text};

/// A property record as sent by `GET /properties`.
#[derive(Debug, Default, Deserialize)]
pub struct WireProperty {
    #[serde(rename = "City")]
    city: Option<Value>,
    #[serde(rename = "State")]
    state: Option<Value>,
    #[serde(rename = "Zipcode")]
    zipcode: Option<Value>,
    #[serde(rename = "MPC")]
    builder_code: Option<Value>,
    #[serde(rename = "Community")]
    community: Option<Value>,
    #[serde(rename = "Homesite Price")]
    homesite_price: Option<Value>,
    /// Square footage, nested as `{ "Ft": { "": 1500 } }`.
    #[serde(rename = "Homesite Sq")]
    homesite_sq: Option<Value>,
    #[serde(rename = "Latitude")]
    latitude: Option<Value>,
    #[serde(rename = "Longitude")]
    longitude: Option<Value>,
}

impl WireProperty {
    /// Square footage from the nested `Homesite Sq.Ft[""]` field. A bare
    /// number is accepted too.
    fn square_feet(&self) -> Option<f64> {
        let sq = self.homesite_sq.as_ref()?;
        match sq {
            Value::Object(_) => parse_nonzero_f64(sq.get("Ft").and_then(|ft| ft.get(""))),
            other => parse_nonzero_f64(Some(other)),
        }
    }
}

impl From<WireProperty> for Property {
    fn from(wire: WireProperty) -> Self {
        let coordinates = parse_lat_lng(wire.latitude.as_ref(), wire.longitude.as_ref());
        Self {
            city: parse_text(wire.city.as_ref()),
            state: parse_text(wire.state.as_ref()),
            zipcode: parse_text(wire.zipcode.as_ref()),
            builder_code: parse_text(wire.builder_code.as_ref()),
            community: parse_text(wire.community.as_ref()),
            homesite_price: parse_nonzero_f64(wire.homesite_price.as_ref()),
            homesite_square_feet: wire.square_feet(),
            latitude: coordinates.map(|(lat, _)| lat),
            longitude: coordinates.map(|(_, lng)| lng),
        }
    }
}

/// A site plan record as sent by `GET /siteplans`.
#[derive(Debug, Default, Deserialize)]
pub struct WireSitePlan {
    #[serde(rename = "City")]
    city: Option<Value>,
    #[serde(rename = "State")]
    state: Option<Value>,
    #[serde(rename = "Sold")]
    sold: Option<Value>,
    #[serde(rename = "Total")]
    total: Option<Value>,
}

impl From<WireSitePlan> for SitePlan {
    fn from(wire: WireSitePlan) -> Self {
        Self {
            city: parse_text(wire.city.as_ref()),
            state: parse_text(wire.state.as_ref()),
            sold_count: parse_count(wire.sold.as_ref()),
            total_count: parse_count(wire.total.as_ref()),
        }
    }
}

/// The `GET /properties` envelope.
#[derive(Debug, Default, Deserialize)]
pub struct WirePropertyPage {
    properties: Option<Vec<WireProperty>>,
    #[serde(rename = "totalPages")]
    total_pages: Option<Value>,
}

impl From<WirePropertyPage> for PropertyPage {
    #[allow(clippy::cast_possible_truncation)]
    fn from(wire: WirePropertyPage) -> Self {
        let total_pages = parse_count(wire.total_pages.as_ref()).clamp(1, u64::from(u32::MAX));
        Self {
            properties: wire
                .properties
                .unwrap_or_default()
                .into_iter()
                .map(Property::from)
                .collect(),
            total_pages: total_pages as u32,
        }
    }
}

/// Decodes a `GET /properties` body.
///
/// A `null` body, missing `properties`, or missing `totalPages` is not an
/// error: they decode to an empty list and a single page.
///
/// # Errors
///
/// Returns [`SourceError::Json`] if the body is not an object of the
/// expected shape.
pub fn decode_property_page(body: Value) -> Result<PropertyPage, SourceError> {
    if body.is_null() {
        return Ok(PropertyPage::empty());
    }
    let wire: WirePropertyPage = serde_json::from_value(body)?;
    Ok(wire.into())
}

/// Decodes a `GET /siteplans` body. A `null` body is an empty set.
///
/// # Errors
///
/// Returns [`SourceError::Json`] if the body is not an array of objects.
pub fn decode_siteplans(body: Value) -> Result<Vec<SitePlan>, SourceError> {
    let wire: Option<Vec<WireSitePlan>> = serde_json::from_value(body)?;
    Ok(wire
        .unwrap_or_default()
        .into_iter()
        .map(SitePlan::from)
        .collect())
}
