//! Portfolio-wide inventory KPIs.

use homesite_analytics_models::{InventoryStats, MetricValue};
use homesite_property_models::{Property, SitePlan};

/// Computes the acquisition KPIs.
///
/// `total_inventory` counts only the properties passed in (the current
/// page). Site-plan figures cover the whole site-plan set and are computed
/// even when the page is empty.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn inventory_stats(properties: &[Property], siteplans: &[SitePlan]) -> InventoryStats {
    let price_per_sq_ft: Vec<f64> = properties
        .iter()
        .filter_map(Property::price_per_sq_ft)
        .collect();
    let average_price_per_sq_ft = if price_per_sq_ft.is_empty() {
        0
    } else {
        let mean = price_per_sq_ft.iter().sum::<f64>() / price_per_sq_ft.len() as f64;
        mean.round() as i64
    };

    let sold_inventory: u64 = siteplans.iter().map(|p| p.sold_count).sum();
    let total_available: u64 = siteplans.iter().map(|p| p.total_count).sum();
    let sales_pace_percent = if total_available == 0 {
        0
    } else {
        (sold_inventory as f64 / total_available as f64 * 100.0).round() as u64
    };

    InventoryStats {
        total_inventory: properties.len() as u64,
        sold_inventory,
        total_homes_sold: sold_inventory,
        total_available,
        average_price_per_sq_ft,
        sales_pace_percent,
        price_increase_percent: MetricValue::Unavailable,
    }
}
