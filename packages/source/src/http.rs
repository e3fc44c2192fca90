//! HTTP implementation of [`PropertySource`] for the listings REST API.
//!
//! Exposes `GET {base}/properties?page=<n>&limit=<size>` and
//! `GET {base}/siteplans`. Requests are sent once with no retry and no
//! timeout; a hung request stays pending until the server responds.

use async_trait::async_trait;
use homesite_property_models::{PropertyPage, SitePlan};

use crate::wire::{decode_property_page, decode_siteplans};
use crate::{PropertySource, SourceError};

/// Maximum length of the response body preview included in error logs.
const BODY_PREVIEW_LEN: usize = 300;

/// Listings API client.
#[derive(Debug, Clone)]
pub struct HttpPropertySource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPropertySource {
    /// Creates a client for the API rooted at `base_url`
    /// (e.g. `"http://localhost:8080/api"`).
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Creates a source around an existing [`reqwest::Client`].
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The API root this source talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn properties_url(&self, page: u32, page_size: u32) -> String {
        format!("{}/properties?page={page}&limit={page_size}", self.base_url)
    }

    fn siteplans_url(&self) -> String {
        format!("{}/siteplans", self.base_url)
    }

    async fn get_json(&self, url: &str) -> Result<serde_json::Value, SourceError> {
        log::debug!("GET {url}");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            let preview: String = text.chars().take(BODY_PREVIEW_LEN).collect();
            log::warn!(
                "JSON parse failed\n  \
                 url: {url}\n  \
                 received: {} bytes\n  \
                 parse error: {e}\n  \
                 body preview: {preview}",
                text.len(),
            );
            SourceError::Json(e)
        })
    }
}

#[async_trait]
impl PropertySource for HttpPropertySource {
    fn name(&self) -> &str {
        &self.base_url
    }

    async fn fetch_properties(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<PropertyPage, SourceError> {
        let body = self.get_json(&self.properties_url(page, page_size)).await?;
        decode_property_page(body)
    }

    async fn fetch_siteplans(&self) -> Result<Vec<SitePlan>, SourceError> {
        let body = self.get_json(&self.siteplans_url()).await?;
        decode_siteplans(body)
    }
}
