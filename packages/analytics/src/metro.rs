//! Metro (city + state) rollups.
//!
//! Properties and site plans are folded into per-metro accumulators keyed
//! by [`MetroKey`]. Accumulation is a commutative sum, so the result does
//! not depend on input order.

use std::collections::BTreeMap;

use homesite_analytics_models::MetroMetrics;
use homesite_property_models::{MetroKey, Property, SitePlan};

#[derive(Debug, Default)]
struct MetroAccumulator {
    new_homes: u64,
    price_sum: f64,
    price_count: u64,
    homes_closed: u64,
    total_available: u64,
}

impl MetroAccumulator {
    fn add_property(&mut self, property: &Property) {
        self.new_homes += 1;
        if let Some(price) = property.homesite_price {
            self.price_sum += price;
            self.price_count += 1;
        }
    }

    fn add_siteplan(&mut self, plan: &SitePlan) {
        self.homes_closed += plan.sold_count;
        self.total_available += plan.total_count;
    }

    #[allow(clippy::cast_precision_loss)]
    fn finish(self, name: MetroKey) -> MetroMetrics {
        let average_price = if self.price_count > 0 {
            self.price_sum / self.price_count as f64
        } else {
            0.0
        };
        MetroMetrics {
            homes_closed: self.homes_closed,
            total_available: self.total_available,
            new_homes: self.new_homes,
            average_price,
            ..MetroMetrics::empty(name)
        }
    }
}

/// Groups properties and site plans by metro and computes per-metro
/// metrics.
///
/// Records missing a city or state are skipped. A metro may come from
/// properties only, site plans only, or both; absent sides contribute
/// zeros.
#[must_use]
pub fn aggregate_metros(
    properties: &[Property],
    siteplans: &[SitePlan],
) -> BTreeMap<MetroKey, MetroMetrics> {
    let mut groups: BTreeMap<MetroKey, MetroAccumulator> = BTreeMap::new();

    for property in properties {
        if let Some(key) = property.metro_key() {
            groups.entry(key).or_default().add_property(property);
        }
    }

    for plan in siteplans {
        if let Some(key) = plan.metro_key() {
            groups.entry(key).or_default().add_siteplan(plan);
        }
    }

    log::debug!(
        "Aggregated {} properties and {} site plans into {} metros",
        properties.len(),
        siteplans.len(),
        groups.len()
    );

    groups
        .into_iter()
        .map(|(key, acc)| (key.clone(), acc.finish(key)))
        .collect()
}

/// Flattens an aggregation into a list ordered by metro key.
#[must_use]
pub fn metro_list(metros: BTreeMap<MetroKey, MetroMetrics>) -> Vec<MetroMetrics> {
    metros.into_values().collect()
}
