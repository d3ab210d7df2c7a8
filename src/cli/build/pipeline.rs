//! Build stages. Each one finishes completely before the next starts.

use std::fs;

use crate::{
    config::SiteConfig,
    content::{self, Content},
    error::{BuildError, IoContext},
    generator::{assets, feed, index, page},
    log,
    logger::LogSink,
    render::Renderer,
    utils::par::WorkerPool,
};

/// Read every article and link, then reject duplicate slugs.
pub(super) fn discover(
    config: &SiteConfig,
    renderer: &dyn Renderer,
    pool: &WorkerPool,
    sink: &dyn LogSink,
) -> Result<Content, BuildError> {
    let content = content::read_content(config, renderer, pool)?;
    log!(
        sink,
        "build";
        "found {} posts and {} links",
        content.articles.len(),
        content.links.len()
    );
    content.check_slugs()?;
    Ok(content)
}

/// Create the output root; existing files are left in place.
pub(super) fn prepare_output(config: &SiteConfig) -> Result<(), BuildError> {
    let output = config.output_dir();
    fs::create_dir_all(output).at(output)
}

/// Render every article page on the pool, drafts included.
pub(super) fn render_pages(
    content: &Content,
    config: &SiteConfig,
    renderer: &dyn Renderer,
    pool: &WorkerPool,
    sink: &dyn LogSink,
) -> Result<(), BuildError> {
    let written = pool.map(&content.articles, |article| {
        page::render_page(article, config, renderer)
    })?;
    for path in written {
        log!(sink, "build"; "generated {}", path.display());
    }
    Ok(())
}

/// `index.html` and `index.xml` from the complete content set.
pub(super) fn write_listings(
    content: &Content,
    config: &SiteConfig,
    renderer: &dyn Renderer,
    sink: &dyn LogSink,
) -> Result<(), BuildError> {
    let index = index::write_index(content, config, renderer)?;
    log!(sink, "build"; "generated {}", index.display());

    let feed = feed::write_feed(&content.articles, config)?;
    log!(sink, "build"; "generated {} (RSS feed)", feed.display());
    Ok(())
}

pub(super) fn sync_assets(config: &SiteConfig, sink: &dyn LogSink) -> Result<(), BuildError> {
    for path in assets::sync_static(&config.paths.static_dir, config.output_dir())? {
        log!(sink, "assets"; "copied {}", path.display());
    }
    Ok(())
}
