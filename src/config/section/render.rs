//! `[render]` configuration.
//!
//! Describes how the external renderer is invoked.
//!
//! ```toml
//! [render]
//! program = "./bin/pandoc"
//! metadata_template = "metadata.tmpl"   # prints front matter as JSON
//! page_template = "post.tmpl"           # wraps post and index bodies
//! highlight_style = "haddock"
//! from = "markdown"
//! to = "html5"
//! timeout_secs = 60                     # 0 disables the deadline
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub program: PathBuf,
    pub metadata_template: PathBuf,
    pub page_template: PathBuf,
    pub highlight_style: String,
    pub from: String,
    pub to: String,
    pub timeout_secs: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            program: "./bin/pandoc".into(),
            metadata_template: "metadata.tmpl".into(),
            page_template: "post.tmpl".into(),
            highlight_style: "haddock".into(),
            from: "markdown".into(),
            to: "html5".into(),
            timeout_secs: 0,
        }
    }
}

impl RenderConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let paths = [
            ("render.program", &self.program),
            ("render.metadata_template", &self.metadata_template),
            ("render.page_template", &self.page_template),
        ];
        for (field, path) in paths {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::validation(field, "must not be empty"));
            }
        }

        // Each of these is the value of a flag; an empty one would swallow the next flag
        let values = [
            ("render.highlight_style", &self.highlight_style),
            ("render.from", &self.from),
            ("render.to", &self.to),
        ];
        for (field, value) in values {
            if value.trim().is_empty() {
                return Err(ConfigError::validation(field, "must not be empty"));
            }
        }
        Ok(())
    }
}
