//! `[build]` configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Worker threads for reading and rendering; 0 uses every core.
    pub jobs: usize,

    /// Output root, set from `--outdir` (internal use only)
    #[serde(skip)]
    pub output: PathBuf,
}
