//! Plain-text rendering of dashboard snapshots.

use homesite_analytics_models::{MetricValue, RankingMetric};
use homesite_property_models::{PageLink, Pagination, Property};
use homesite_store::DashboardSnapshot;

const RULE_WIDTH: usize = 100;

fn rule() -> String {
    "-".repeat(RULE_WIDTH)
}

fn money(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("${v:.0}"))
}

fn optional(value: Option<&str>) -> &str {
    value.unwrap_or("N/A")
}

fn format_metric(value: MetricValue) -> String {
    match value {
        MetricValue::Unavailable => value.to_string(),
        MetricValue::Value(v) => format!("{v:.0}"),
    }
}

/// Joins lines with a trailing newline after each.
fn to_text(lines: &[String]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Page controls as a single line, e.g. `[1] 2 3 4 5 ... 12  (page 1 of 12)`.
#[must_use]
pub fn page_controls(pagination: &Pagination) -> String {
    if !pagination.shows_controls() {
        return String::new();
    }

    let mut line = String::new();
    for link in pagination.page_links() {
        match link {
            PageLink::Page(n) if n == pagination.current_page => {
                line.push_str(&format!("[{n}] "));
            }
            PageLink::Page(n) => line.push_str(&format!("{n} ")),
            PageLink::Ellipsis => line.push_str("... "),
        }
    }
    line.push_str(&format!(
        " (page {} of {})",
        pagination.current_page, pagination.total_pages
    ));
    line
}

fn property_row(property: &Property) -> String {
    let ppsf = property
        .rounded_price_per_sq_ft()
        .map_or_else(|| "N/A".to_string(), |v| format!("${v}"));
    let sq_ft = property
        .homesite_square_feet
        .map_or_else(|| "N/A".to_string(), |v| format!("{v:.0}"));

    format!(
        "{:<28} {:<10} {:<16} {:>12} {:>8} {:>8}",
        property.location_label().as_deref().unwrap_or("N/A"),
        optional(property.builder_code.as_deref()),
        optional(property.community.as_deref()),
        money(property.homesite_price),
        sq_ft,
        ppsf,
    )
}

/// The acquisition view: KPIs, filter facets, and the property table.
#[must_use]
pub fn acquisition(snapshot: &DashboardSnapshot) -> String {
    let stats = &snapshot.stats;
    let facets = snapshot.filters.facet_counts();

    let mut lines = vec![
        "Land Acquisition".to_string(),
        rule(),
        format!("Total inventory:        {}", stats.total_inventory),
        format!("Sold inventory:         {}", stats.sold_inventory),
        format!(
            "Sales pace:             {}% ({})",
            stats.sales_pace_percent,
            stats.sales_pace_rating()
        ),
        format!("Avg price / sq ft:      ${}", stats.average_price_per_sq_ft),
        format!(
            "Price increase:         {}",
            format_metric(stats.price_increase_percent)
        ),
        format!(
            "Filters:                {} zip codes, {} states, {} cities, {} builders",
            facets.zipcodes, facets.states, facets.cities, facets.builders
        ),
        String::new(),
    ];

    if snapshot.properties.is_empty() {
        lines.push("No properties on this page.".to_string());
    } else {
        lines.push(format!(
            "{:<28} {:<10} {:<16} {:>12} {:>8} {:>8}",
            "LOCATION", "MPC", "COMMUNITY", "PRICE", "SQ FT", "$/SQFT"
        ));
        lines.push(rule());
        lines.extend(snapshot.properties.iter().map(property_row));
    }

    let controls = page_controls(&snapshot.pagination);
    if !controls.is_empty() {
        lines.push(String::new());
        lines.push(controls);
    }
    if snapshot.loading {
        lines.push("(loading...)".to_string());
    }
    to_text(&lines)
}

/// The market view: metro rankings and the map summary.
#[must_use]
pub fn market(snapshot: &DashboardSnapshot) -> String {
    let mut lines = vec![format!("Market Overview ({} metros)", snapshot.metros.len())];

    for metric in RankingMetric::ALL {
        let ranked = snapshot.rankings.get(*metric);
        lines.push(String::new());
        lines.push(metric.title().to_string());
        lines.push(rule());
        if ranked.is_empty() {
            lines.push("No metro data.".to_string());
            continue;
        }
        lines.push(format!(
            "{:<4} {:<30} {:>16}",
            "#",
            "MSA",
            metric.value_label()
        ));
        lines.extend(ranked.iter().enumerate().map(|(i, metro)| {
            format!(
                "{:<4} {:<30} {:>16}",
                i + 1,
                metro.name,
                format_metric(metric.value(metro))
            )
        }));
    }

    let (lat, lng) = snapshot.map_center;
    lines.push(String::new());
    lines.push(format!(
        "Map: {} located properties, centered at ({lat:.3}, {lng:.3})",
        snapshot.geo_points.len()
    ));
    to_text(&lines)
}
