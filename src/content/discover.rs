//! Locate source files and read them on the worker pool.

use jwalk::WalkDir;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{Article, Content, LinkReference};
use crate::config::SiteConfig;
use crate::error::{BuildError, IoContext};
use crate::render::Renderer;
use crate::utils::par::WorkerPool;

/// Entry-point file of an article directory.
pub const ARTICLE_FILE: &str = "index.md";

const LINK_EXTENSION: &str = "json";

/// Every `index.md` below `root`, in path order. Missing `root` yields none.
pub fn find_articles(root: &Path) -> Result<Vec<PathBuf>, BuildError> {
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let mut found = Vec::new();
    for entry in WalkDir::new(root).sort(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf);
            BuildError::io(path, io::Error::from(e))
        })?;
        if entry.file_type().is_file() && entry.file_name() == ARTICLE_FILE {
            found.push(entry.path());
        }
    }
    Ok(found)
}

/// Every `*.json` directly inside `root`, sorted. Missing `root` yields none.
pub fn find_links(root: &Path) -> Result<Vec<PathBuf>, BuildError> {
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let mut found = Vec::new();
    for entry in fs::read_dir(root).at(root)? {
        let path = entry.at(root)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == LINK_EXTENSION) {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}

/// Discover and parse all articles and links, one pool task per file.
pub fn read_content(
    config: &SiteConfig,
    renderer: &dyn Renderer,
    pool: &WorkerPool,
) -> Result<Content, BuildError> {
    let article_paths = find_articles(&config.paths.posts)?;
    let link_paths = find_links(&config.paths.links)?;

    let template = &config.render.metadata_template;
    let articles = pool.map(&article_paths, |path| {
        Article::read(path, renderer, template)
    })?;
    let links = pool.map(&link_paths, |path| LinkReference::read(path))?;

    Ok(Content { articles, links })
}
