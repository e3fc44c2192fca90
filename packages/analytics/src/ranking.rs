//! Top-N metro tables.

use std::cmp::Ordering;

use homesite_analytics_models::{MetricValue, MetroMetrics, MetroRankings, RankingMetric, TOP_N};

/// Descending order on metric values. Unavailable values sort after
/// every available one and compare equal among themselves.
fn descending(a: MetricValue, b: MetricValue) -> Ordering {
    match (a, b) {
        (MetricValue::Value(a), MetricValue::Value(b)) => b.total_cmp(&a),
        (MetricValue::Value(_), MetricValue::Unavailable) => Ordering::Less,
        (MetricValue::Unavailable, MetricValue::Value(_)) => Ordering::Greater,
        (MetricValue::Unavailable, MetricValue::Unavailable) => Ordering::Equal,
    }
}

/// Returns the top [`TOP_N`] metros by `metric`, highest first.
///
/// The sort is stable: metros with equal values keep their relative order
/// from `metros`.
#[must_use]
pub fn rank_by(metros: &[MetroMetrics], metric: RankingMetric) -> Vec<MetroMetrics> {
    let mut ranked = metros.to_vec();
    ranked.sort_by(|a, b| descending(metric.value(a), metric.value(b)));
    ranked.truncate(TOP_N);
    ranked
}

/// Builds all four ranked tables from the same metro list.
#[must_use]
pub fn rank_metros(metros: &[MetroMetrics]) -> MetroRankings {
    MetroRankings {
        by_homes_closed: rank_by(metros, RankingMetric::HomesClosed),
        by_price_increase: rank_by(metros, RankingMetric::PriceIncrease),
        by_sales_pace: rank_by(metros, RankingMetric::SalesPace),
        by_new_homes: rank_by(metros, RankingMetric::NewHomes),
    }
}
