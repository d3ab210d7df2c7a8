//! `[paths]` configuration.
//!
//! All paths are relative to the working directory.
//!
//! ```toml
//! [paths]
//! posts = "posts"     # one directory per article, each with an index.md
//! links = "links"     # flat directory of {title, date, url} JSON files
//! static = "static"   # copied verbatim into the output root
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    pub posts: PathBuf,
    pub links: PathBuf,
    #[serde(rename = "static")]
    pub static_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            posts: "posts".into(),
            links: "links".into(),
            static_dir: "static".into(),
        }
    }
}
