#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Derived dashboard metrics.
//!
//! Everything in this crate is a pure projection of the current property
//! page and site-plan set. Values are recomputed whenever that snapshot
//! changes and are never mutated in place.

use std::fmt;

use homesite_property_models::MetroKey;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Map center used when no property on the page has coordinates
/// (downtown Atlanta).
pub const DEFAULT_MAP_CENTER: (f64, f64) = (33.749, -84.388);

/// Number of metros kept in each ranked list.
pub const TOP_N: usize = 10;

/// A metric that may not be computable from the available data.
///
/// Serializes as a number, or `null` when unavailable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum MetricValue {
    /// The data needed to compute this metric does not exist.
    #[default]
    Unavailable,
    /// A computed value.
    Value(f64),
}

impl MetricValue {
    /// Returns the value, if available.
    #[must_use]
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Unavailable => None,
            Self::Value(v) => Some(v),
        }
    }
}

impl From<Option<f64>> for MetricValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Unavailable, Self::Value)
    }
}

impl From<MetricValue> for Option<f64> {
    fn from(value: MetricValue) -> Self {
        value.value()
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => f.write_str("N/A"),
            Self::Value(v) => write!(f, "{v}"),
        }
    }
}

/// Rollup of property and site-plan data for one metro.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetroMetrics {
    /// Metro key, e.g. `"Dallas, TX"`.
    pub name: MetroKey,
    /// Sum of sold counts over this metro's site plans.
    pub homes_closed: u64,
    /// Sum of total counts over this metro's site plans.
    pub total_available: u64,
    /// Number of properties on the current page in this metro.
    pub new_homes: u64,
    /// Mean homesite price over priced properties, or 0.
    pub average_price: f64,
    /// Year-over-year price change. There is no historical data, so this
    /// is always unavailable.
    pub price_increase_percent: MetricValue,
}

impl MetroMetrics {
    /// A metro with no contributing records yet.
    #[must_use]
    pub fn empty(name: MetroKey) -> Self {
        Self {
            name,
            homes_closed: 0,
            total_available: 0,
            new_homes: 0,
            average_price: 0.0,
            price_increase_percent: MetricValue::Unavailable,
        }
    }
}

/// The field a ranked metro list is ordered by.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RankingMetric {
    /// Homes closed (sold count).
    HomesClosed,
    /// Price increase percentage.
    PriceIncrease,
    /// Sales pace. Ranked by sold count, not by a rate.
    SalesPace,
    /// New homes on the current page.
    NewHomes,
}

impl RankingMetric {
    /// Every ranking, in display order.
    pub const ALL: &[Self] = &[
        Self::HomesClosed,
        Self::PriceIncrease,
        Self::SalesPace,
        Self::NewHomes,
    ];

    /// Table title for this ranking.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::HomesClosed => "Top 10 MSA by Homes Closed",
            Self::PriceIncrease => "Top 10 MSA by Average Price Increase",
            Self::SalesPace => "Top 10 MSA by Sales Pace",
            Self::NewHomes => "Top 10 MSA by New Homes Added",
        }
    }

    /// Column header for the ranked value.
    #[must_use]
    pub const fn value_label(self) -> &'static str {
        match self {
            Self::HomesClosed => "Homes Closed",
            Self::PriceIncrease => "Price Increase (%)",
            Self::SalesPace => "Homes Sold",
            Self::NewHomes => "New Homes",
        }
    }

    /// Extracts the ranked value from a metro.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn value(self, metro: &MetroMetrics) -> MetricValue {
        match self {
            Self::HomesClosed | Self::SalesPace => MetricValue::Value(metro.homes_closed as f64),
            Self::PriceIncrease => metro.price_increase_percent,
            Self::NewHomes => MetricValue::Value(metro.new_homes as f64),
        }
    }
}

/// The four top-N metro tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetroRankings {
    /// Ordered by homes closed.
    pub by_homes_closed: Vec<MetroMetrics>,
    /// Ordered by price increase.
    pub by_price_increase: Vec<MetroMetrics>,
    /// Ordered by sales pace (sold count).
    pub by_sales_pace: Vec<MetroMetrics>,
    /// Ordered by new homes.
    pub by_new_homes: Vec<MetroMetrics>,
}

impl MetroRankings {
    /// Returns the list for a given metric.
    #[must_use]
    pub fn get(&self, metric: RankingMetric) -> &[MetroMetrics] {
        match metric {
            RankingMetric::HomesClosed => &self.by_homes_closed,
            RankingMetric::PriceIncrease => &self.by_price_increase,
            RankingMetric::SalesPace => &self.by_sales_pace,
            RankingMetric::NewHomes => &self.by_new_homes,
        }
    }

    /// Whether there are no metros to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_homes_closed.is_empty()
    }
}

/// Qualitative reading of the portfolio sales pace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum SalesPaceRating {
    /// More than half of available units have sold.
    #[strum(serialize = "+Good performance")]
    Good,
    /// Half or fewer of available units have sold.
    #[strum(serialize = "Below average")]
    BelowAverage,
}

/// Portfolio-wide KPIs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    /// Properties on the current page (page-scoped, not dataset-wide).
    pub total_inventory: u64,
    /// Sum of sold counts across all site plans.
    pub sold_inventory: u64,
    /// Same as `sold_inventory`.
    pub total_homes_sold: u64,
    /// Sum of total counts across all site plans.
    pub total_available: u64,
    /// Rounded mean of price / square feet, or 0.
    pub average_price_per_sq_ft: i64,
    /// Rounded `sold_inventory / total_available * 100`, or 0.
    pub sales_pace_percent: u64,
    /// Always unavailable; there is no historical price data.
    pub price_increase_percent: MetricValue,
}

impl InventoryStats {
    /// Threshold above which the sales pace is considered good.
    pub const GOOD_SALES_PACE_PERCENT: u64 = 50;

    /// Rates the sales pace.
    #[must_use]
    pub const fn sales_pace_rating(&self) -> SalesPaceRating {
        if self.sales_pace_percent > Self::GOOD_SALES_PACE_PERCENT {
            SalesPaceRating::Good
        } else {
            SalesPaceRating::BelowAverage
        }
    }
}

/// Distinct facet values from the current page, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterIndex {
    /// Distinct ZIP codes.
    pub zipcodes: Vec<String>,
    /// Distinct states, exactly as written.
    pub states: Vec<String>,
    /// Distinct cities, exactly as written.
    pub cities: Vec<String>,
    /// Distinct builder / plan codes.
    pub builders: Vec<String>,
}

/// Sizes of each facet in a [`FilterIndex`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetCounts {
    /// Number of distinct ZIP codes.
    pub zipcodes: usize,
    /// Number of distinct states.
    pub states: usize,
    /// Number of distinct cities.
    pub cities: usize,
    /// Number of distinct builders.
    pub builders: usize,
}

impl FilterIndex {
    /// Returns the number of values in each facet.
    #[must_use]
    pub const fn facet_counts(&self) -> FacetCounts {
        FacetCounts {
            zipcodes: self.zipcodes.len(),
            states: self.states.len(),
            cities: self.cities.len(),
            builders: self.builders.len(),
        }
    }

    /// Whether every facet is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.zipcodes.is_empty()
            && self.states.is_empty()
            && self.cities.is_empty()
            && self.builders.is_empty()
    }
}

/// A property plotted on the geographic distribution map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    /// Marker title: the builder code, or `"Plan"`.
    pub label: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Location label, when city and state are known.
    pub location: Option<String>,
    /// Homesite price, if listed.
    pub price: Option<f64>,
}
