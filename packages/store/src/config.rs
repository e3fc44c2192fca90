//! Dashboard configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `HOMESITE_*` environment variables. Command-line flags are applied on
//! top by the binary.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Default listings API root.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Default number of properties per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Environment variable overriding [`DashboardConfig::api_url`].
pub const ENV_API_URL: &str = "HOMESITE_API_URL";
/// Environment variable overriding [`DashboardConfig::page_size`].
pub const ENV_PAGE_SIZE: &str = "HOMESITE_PAGE_SIZE";
/// Environment variable overriding [`DashboardConfig::stale_responses`].
pub const ENV_STALE_RESPONSES: &str = "HOMESITE_STALE_RESPONSES";

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A value is out of range or unparseable.
    #[error("Invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        /// Setting name.
        key: String,
        /// Offending value.
        value: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// What to do with a page response that arrives after a newer page was
/// requested.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum StaleResponsePolicy {
    /// Drop responses to superseded requests. Loading stays set until the
    /// newest request resolves.
    #[default]
    Discard,
    /// Apply every response as it resolves; the last one to arrive wins,
    /// even if it belongs to an older request.
    LastWriteWins,
}

/// Settings for the data store and its HTTP source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct DashboardConfig {
    /// Listings API root, e.g. `"http://localhost:8080/api"`.
    pub api_url: String,
    /// Properties requested per page.
    pub page_size: u32,
    /// Handling of out-of-order page responses.
    pub stale_responses: StaleResponsePolicy,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            stale_responses: StaleResponsePolicy::default(),
        }
    }
}

impl DashboardConfig {
    /// Parses a TOML document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the document is malformed or a value is
    /// invalid.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Loads defaults, then `path` if given, then the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any layer is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => {
                log::info!("Loading config from {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies `HOMESITE_*` overrides looked up through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if an override cannot be
    /// parsed.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_url = url;
        }
        if let Some(size) = lookup(ENV_PAGE_SIZE) {
            self.page_size = size.trim().parse().map_err(|e| ConfigError::InvalidValue {
                key: ENV_PAGE_SIZE.to_string(),
                value: size.clone(),
                reason: format!("{e}"),
            })?;
        }
        if let Some(policy) = lookup(ENV_STALE_RESPONSES) {
            self.stale_responses =
                policy
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue {
                        key: ENV_STALE_RESPONSES.to_string(),
                        value: policy.clone(),
                        reason: "expected `discard` or `last-write-wins`".to_string(),
                    })?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `page_size` is zero or
    /// `api_url` is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "page_size".to_string(),
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "api_url".to_string(),
                value: self.api_url.clone(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_the_listings_api() {
        let config = DashboardConfig::default();
        assert_eq!(config.api_url, "http://localhost:8080/api");
        assert_eq!(config.page_size, 10);
        assert_eq!(config.stale_responses, StaleResponsePolicy::Discard);
    }

    #[test]
    fn parses_partial_toml() {
        let config = DashboardConfig::from_toml_str(
            r#"
            api_url = "https://listings.example.com/api"
            stale_responses = "last-write-wins"
            "#,
        )
        .unwrap();

        assert_eq!(config.api_url, "https://listings.example.com/api");
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.stale_responses, StaleResponsePolicy::LastWriteWins);
    }

    #[test]
    fn rejects_zero_page_size() {
        let err = DashboardConfig::from_toml_str("page_size = 0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn rejects_unknown_policy_in_toml() {
        assert!(DashboardConfig::from_toml_str(r#"stale_responses = "sometimes""#).is_err());
    }

    #[test]
    fn environment_overrides_file_values() {
        let config = DashboardConfig::default()
            .with_overrides(env(&[
                (ENV_API_URL, "http://10.0.0.5:9000/api"),
                (ENV_PAGE_SIZE, "25"),
                (ENV_STALE_RESPONSES, "last-write-wins"),
            ]))
            .unwrap();

        assert_eq!(config.api_url, "http://10.0.0.5:9000/api");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.stale_responses, StaleResponsePolicy::LastWriteWins);
    }

    #[test]
    fn reports_bad_environment_values() {
        let err = DashboardConfig::default()
            .with_overrides(env(&[(ENV_PAGE_SIZE, "ten")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_PAGE_SIZE));

        let err = DashboardConfig::default()
            .with_overrides(env(&[(ENV_STALE_RESPONSES, "never")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = DashboardConfig::from_file(Path::new("/nonexistent/homesite.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err
            .to_string()
            .starts_with("Failed to read /nonexistent/homesite.toml: "));
    }
}
