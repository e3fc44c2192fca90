//! Distinct-value facets for the property filter panel.
//!
//! Unlike metro grouping, values are compared exactly: `"Atlanta"` and
//! `"ATLANTA"` are two different city facets.

use std::collections::HashSet;

use homesite_analytics_models::FilterIndex;
use homesite_property_models::Property;

fn distinct<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .flatten()
        .filter(|v| !v.is_empty() && seen.insert(*v))
        .map(str::to_string)
        .collect()
}

/// Builds the facet lists from the current page, in first-seen order.
#[must_use]
pub fn build_filter_index(properties: &[Property]) -> FilterIndex {
    FilterIndex {
        zipcodes: distinct(properties.iter().map(|p| p.zipcode.as_deref())),
        states: distinct(properties.iter().map(|p| p.state.as_deref())),
        cities: distinct(properties.iter().map(|p| p.city.as_deref())),
        builders: distinct(properties.iter().map(|p| p.builder_code.as_deref())),
    }
}
