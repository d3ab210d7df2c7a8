//! `[site]` configuration.
//!
//! Used for the index page title and for absolute links in the feed, so
//! `url` is required even though every other setting has a default.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfoConfig {
    /// Site title (index page and feed channel).
    pub title: String,

    /// Base URL for feed links, e.g. "https://example.com".
    pub url: String,
}

impl SiteInfoConfig {
    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Absolute URL of an article page.
    pub fn permalink(&self, slug: &str) -> String {
        format!("{}/{}", self.base_url(), slug)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url().is_empty() {
            return Err(ConfigError::validation(
                "site.url",
                "must be set to the absolute base URL of the site",
            ));
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ConfigError::validation(
                "site.url",
                format!("`{}` must start with http:// or https://", self.url),
            ));
        }
        Ok(())
    }
}
