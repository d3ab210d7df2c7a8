//! Site configuration management for `quire.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [site], [paths], [render], [build]
//! ├── error          # ConfigError
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! Every section except `site.url` has defaults matching the conventional
//! layout (`posts/`, `links/`, `static/`, `./bin/pandoc`). The base URL has
//! no sensible default, so a build needs at least `[site] url = ..`. The
//! only value that never comes from the file is the output directory,
//! which is always given on the command line.

mod error;
pub mod section;

pub use error::ConfigError;
pub use section::{BuildConfig, PathsConfig, RenderConfig, SiteInfoConfig};

use crate::cli::Cli;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "quire.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing quire.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site title and base URL
    pub site: SiteInfoConfig,

    /// Input directories
    pub paths: PathsConfig,

    /// External renderer invocation
    pub render: RenderConfig,

    /// Worker pool and output root
    pub build: BuildConfig,
}

impl SiteConfig {
    /// Load `quire.toml` from the working directory (if present) and apply
    /// the command line.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        Self::load_from(Path::new(CONFIG_FILE), cli)
    }

    fn load_from(path: &Path, cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            Self::from_path(path)?
        } else {
            Self::default()
        };

        config.build.output = cli.outdir.clone();
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.site.validate()?;
        self.render.validate()?;
        if self.build.output.as_os_str().is_empty() {
            return Err(ConfigError::validation("build.output", "must not be empty"));
        }
        Ok(())
    }

    /// Output root directory.
    pub fn output_dir(&self) -> &Path {
        &self.build.output
    }

    /// Join a path with the output root.
    pub fn output_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.build.output.join(path)
    }
}

#[cfg(test)]
pub fn test_parse_config(content: &str) -> SiteConfig {
    SiteConfig::from_str(content).expect("test config should parse")
}
