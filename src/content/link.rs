//! Link references: `links/*.json`, each `{ "title", "date", "url" }`.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BuildError, IoContext};
use crate::utils::date::Date;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkReference {
    pub title: String,
    pub date: Date,
    pub url: String,
    /// File stem of the JSON file.
    pub slug: String,
    pub source: PathBuf,
}

#[derive(Debug, Deserialize)]
struct LinkFile {
    title: String,
    date: String,
    url: String,
}

impl LinkReference {
    pub fn read(source: &Path) -> Result<Self, BuildError> {
        let text = fs::read_to_string(source).at(source)?;
        Self::parse(source, &text)
    }

    pub fn parse(source: &Path, text: &str) -> Result<Self, BuildError> {
        let file: LinkFile =
            serde_json::from_str(text).map_err(|e| BuildError::metadata(source, e.to_string()))?;
        let date = Date::parse(&file.date).map_err(|e| BuildError::metadata(source, e.to_string()))?;
        let slug = source
            .file_stem()
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.is_empty())
            .ok_or_else(|| BuildError::metadata(source, "cannot derive a slug from the file name"))?;

        Ok(Self {
            title: file.title,
            date,
            url: file.url,
            slug: slug.to_string(),
            source: source.to_path_buf(),
        })
    }
}
