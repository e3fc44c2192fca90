#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Metric computations for the homesite dashboard.
//!
//! Each public function is a pure projection of the current property page
//! and/or the full site-plan set. None of them mutate their inputs, so
//! they can be recomputed on any thread whenever the data changes.

pub mod filters;
pub mod geo;
pub mod metro;
pub mod ranking;
pub mod stats;

pub use filters::build_filter_index;
pub use geo::{geo_points, map_center};
pub use metro::{aggregate_metros, metro_list};
pub use ranking::{rank_by, rank_metros};
pub use stats::inventory_stats;
