#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Property and site plan data sources.
//!
//! The dashboard only needs two capabilities from its backend: one page of
//! properties, and the full site-plan set. [`PropertySource`] captures
//! those, and [`http::HttpPropertySource`] implements them against the
//! listings REST API. Raw JSON is normalized into
//! [`homesite_property_models`] types by [`wire`].

pub mod http;
pub mod parsing;
pub mod wire;

use async_trait::async_trait;
use homesite_property_models::{PropertyPage, SitePlan};

/// Errors that can occur while fetching from a data source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status {
        /// Requested URL.
        url: String,
        /// Response status code.
        status: u16,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A backend that can serve property pages and site plans.
///
/// Implementations perform a single attempt per call. Retrying, caching,
/// and fallback-to-empty are the caller's concern.
#[async_trait]
pub trait PropertySource: Send + Sync {
    /// Returns a short label for log messages.
    fn name(&self) -> &str;

    /// Fetches one page of properties.
    ///
    /// `page` is passed through unvalidated.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the request or decoding fails.
    async fn fetch_properties(&self, page: u32, page_size: u32)
    -> Result<PropertyPage, SourceError>;

    /// Fetches every site plan. Not paginated.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the request or decoding fails.
    async fn fetch_siteplans(&self) -> Result<Vec<SitePlan>, SourceError>;
}
