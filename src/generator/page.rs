//! One output directory per article: `<out>/<slug>/index.html` plus assets.

use std::fs;
use std::path::{Path, PathBuf};

use super::assets::copy_file;
use crate::config::SiteConfig;
use crate::content::Article;
use crate::error::{BuildError, IoContext};
use crate::render::{Renderer, Source, TemplateVars};

/// Extensions left behind when copying an article's siblings.
const SKIPPED_EXTENSIONS: &[&str] = &["md", "html"];

/// Render `article` and copy its sibling files. Returns the page path.
pub fn render_page(
    article: &Article,
    config: &SiteConfig,
    renderer: &dyn Renderer,
) -> Result<PathBuf, BuildError> {
    let out_dir = config.output_join(&article.slug);
    fs::create_dir_all(&out_dir).at(&out_dir)?;

    copy_siblings(article.dir(), &out_dir)?;

    let html = renderer
        .render_content(
            Source::File(&article.source),
            &config.render.page_template,
            &page_vars(article),
        )
        .map_err(|e| BuildError::render(&article.source, e))?;

    let dest = out_dir.join("index.html");
    fs::write(&dest, html).at(&dest)?;
    Ok(dest)
}

fn page_vars(article: &Article) -> TemplateVars {
    let vars = TemplateVars::new().set("nice_date", article.date.month_year());
    if article.draft {
        vars.set("draft", "true")
    } else {
        vars
    }
}

/// Copy regular files from `dir` into `out_dir`; subdirectories are ignored.
fn copy_siblings(dir: &Path, out_dir: &Path) -> Result<(), BuildError> {
    for entry in fs::read_dir(dir).at(dir)? {
        let path = entry.at(dir)?.path();
        if !path.is_file() || is_skipped(&path) {
            continue;
        }
        if let Some(name) = path.file_name() {
            copy_file(&path, &out_dir.join(name))?;
        }
    }
    Ok(())
}

fn is_skipped(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SKIPPED_EXTENSIONS.contains(&ext))
}
