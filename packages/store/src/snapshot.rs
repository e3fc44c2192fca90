//! Read-only view of everything the dashboard renders.

use chrono::{DateTime, Utc};
use homesite_analytics::{
    aggregate_metros, build_filter_index, geo_points, inventory_stats, map_center, metro_list,
    rank_metros,
};
use homesite_analytics_models::{
    FilterIndex, GeoPoint, InventoryStats, MetroMetrics, MetroRankings,
};
use homesite_property_models::{Pagination, Property, SitePlan};
use serde::Serialize;

/// Every derived view of one store state, computed together.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    /// When this snapshot was computed.
    pub generated_at: DateTime<Utc>,
    /// Pagination at the time of the snapshot.
    pub pagination: Pagination,
    /// Whether a page request is outstanding.
    pub loading: bool,
    /// When the outstanding page request started.
    pub loading_since: Option<DateTime<Utc>>,
    /// Raw rows for the property table.
    pub properties: Vec<Property>,
    /// Acquisition KPIs.
    pub stats: InventoryStats,
    /// Filter facets.
    pub filters: FilterIndex,
    /// Every metro, ordered by key.
    pub metros: Vec<MetroMetrics>,
    /// Top-N metro tables.
    pub rankings: MetroRankings,
    /// Map markers.
    pub geo_points: Vec<GeoPoint>,
    /// Map center as `(latitude, longitude)`.
    pub map_center: (f64, f64),
}

impl DashboardSnapshot {
    /// Derives every view from a page of properties and the site-plan set.
    #[must_use]
    pub fn compute(
        pagination: Pagination,
        loading_since: Option<DateTime<Utc>>,
        properties: &[Property],
        siteplans: &[SitePlan],
    ) -> Self {
        let metros = metro_list(aggregate_metros(properties, siteplans));
        let rankings = rank_metros(&metros);
        let geo_points = geo_points(properties);
        let map_center = map_center(&geo_points);

        Self {
            generated_at: Utc::now(),
            pagination,
            loading: loading_since.is_some(),
            loading_since,
            properties: properties.to_vec(),
            stats: inventory_stats(properties, siteplans),
            filters: build_filter_index(properties),
            metros,
            rankings,
            geo_points,
            map_center,
        }
    }
}
