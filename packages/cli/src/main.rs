#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Terminal dashboard for homesite acquisition and market data.
//!
//! ```text
//! homesite [--config homesite.toml] [--api-url URL] [--page N]
//! homesite --view acquisition|market [--json]
//! ```
//!
//! Running without `--view` enters the interactive page browser.

mod interactive;
mod render;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use homesite_source::http::HttpPropertySource;
use homesite_store::{DashboardConfig, DashboardSnapshot, PropertyStore};

#[derive(Parser)]
#[command(name = "homesite", about = "Browse homesite inventory and metro rankings")]
struct Cli {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listings API root (overrides config and environment)
    #[arg(long)]
    api_url: Option<String>,

    /// Page to load first
    #[arg(long, default_value_t = 1)]
    page: u32,

    /// Print a single view and exit
    #[arg(long, value_enum)]
    view: Option<View>,

    /// Print the view as JSON
    #[arg(long, requires = "view")]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum View {
    /// KPIs, filters, and the property table
    Acquisition,
    /// Metro rankings and map summary
    Market,
}

fn view_json(view: View, snapshot: &DashboardSnapshot) -> serde_json::Value {
    match view {
        View::Acquisition => serde_json::json!({
            "pagination": snapshot.pagination,
            "pageLinks": snapshot.pagination.page_links(),
            "loading": snapshot.loading,
            "stats": snapshot.stats,
            "salesPaceRating": snapshot.stats.sales_pace_rating().to_string(),
            "filters": snapshot.filters,
            "facetCounts": snapshot.filters.facet_counts(),
            "properties": snapshot.properties,
        }),
        View::Market => serde_json::json!({
            "metros": snapshot.metros,
            "rankings": snapshot.rankings,
            "geoPoints": snapshot.geo_points,
            "mapCenter": snapshot.map_center,
        }),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    let mut config = DashboardConfig::load(cli.config.as_deref())?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
        config.validate()?;
    }
    log::info!(
        "Using {} (page size {}, stale responses: {})",
        config.api_url,
        config.page_size,
        config.stale_responses
    );

    let source = Arc::new(HttpPropertySource::new(&config.api_url)?);
    let store = PropertyStore::from_config(source, &config);

    tokio::join!(store.request_page(cli.page), store.load_siteplans());

    let Some(view) = cli.view else {
        return interactive::run(&store).await;
    };

    let snapshot = store.snapshot();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&view_json(view, &snapshot))?);
    } else {
        match view {
            View::Acquisition => print!("{}", render::acquisition(&snapshot)),
            View::Market => print!("{}", render::market(&snapshot)),
        }
    }

    Ok(())
}
