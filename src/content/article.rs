//! Articles: `posts/**/index.md`, metadata read through the renderer.

use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

use crate::error::BuildError;
use crate::render::{Metadata, Renderer};
use crate::utils::date::Date;

/// One published (or draft) post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub date: Date,
    pub source: PathBuf,
    /// Name of the directory holding `index.md`.
    pub slug: String,
    pub draft: bool,
}

/// Fields the metadata template is expected to print.
#[derive(Debug, Deserialize)]
struct ArticleMeta {
    title: String,
    date: String,
    #[serde(default, deserialize_with = "deserialize_draft")]
    draft: bool,
}

/// Accept `true`, `"true"`, `false`, `"false"`, `""` or `null`.
///
/// Templates print every variable as text, so a boolean often arrives as
/// a string; an unset variable prints as nothing.
fn deserialize_draft<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Option::<Flag>::deserialize(deserializer)? {
        None => Ok(false),
        Some(Flag::Bool(b)) => Ok(b),
        Some(Flag::Text(s)) => match s.trim() {
            "true" => Ok(true),
            "false" | "" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "`draft` must be true or false, got `{other}`"
            ))),
        },
    }
}

impl Article {
    /// Extract metadata for `source` with `template` and build the record.
    pub fn read(
        source: &Path,
        renderer: &dyn Renderer,
        template: &Path,
    ) -> Result<Self, BuildError> {
        let meta = renderer
            .extract_metadata(source, template)
            .map_err(|e| BuildError::render(source, e))?;
        Self::from_meta(source, meta)
    }

    pub fn from_meta(source: &Path, meta: Metadata) -> Result<Self, BuildError> {
        let slug = slug_of(source)?;
        let meta: ArticleMeta = serde_json::from_value(meta.into())
            .map_err(|e| BuildError::metadata(source, e.to_string()))?;
        let date = Date::parse(&meta.date).map_err(|e| BuildError::metadata(source, e.to_string()))?;

        Ok(Self {
            title: meta.title,
            date,
            source: source.to_path_buf(),
            slug,
            draft: meta.draft,
        })
    }

    /// Directory containing the source; sibling assets live here.
    pub fn dir(&self) -> &Path {
        self.source.parent().unwrap_or(Path::new("."))
    }
}

fn slug_of(source: &Path) -> Result<String, BuildError> {
    source
        .parent()
        .and_then(Path::file_name)
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| BuildError::metadata(source, "cannot derive a slug from the directory name"))
}
