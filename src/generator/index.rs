//! Home page: articles and links merged into one year-grouped listing.
//!
//! The listing is assembled as a small markdown document and rendered with
//! the page template, so the home page shares the look of every article.

use std::fs;
use std::path::PathBuf;

use crate::config::SiteConfig;
use crate::content::{Article, Content, LinkReference};
use crate::error::{BuildError, IoContext};
use crate::render::{Renderer, Source, TemplateVars};
use crate::utils::date::Date;

/// One entry of the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedItem<'a> {
    Article(&'a Article),
    Link(&'a LinkReference),
}

impl FeedItem<'_> {
    pub fn title(&self) -> &str {
        match self {
            Self::Article(a) => &a.title,
            Self::Link(l) => &l.title,
        }
    }

    pub fn date(&self) -> Date {
        match self {
            Self::Article(a) => a.date,
            Self::Link(l) => l.date,
        }
    }

    /// One listing line: internal link for articles, arrow-marked external
    /// link for link references.
    pub fn markup(&self) -> String {
        match self {
            Self::Article(a) => format!("<p>[{}](/{})</p>", escape_link_text(self.title()), a.slug),
            Self::Link(l) => format!("<p>[↗ {}]({})</p>", escape_link_text(self.title()), l.url),
        }
    }
}

/// Published articles and all links, newest first.
///
/// Drafts are left out. Equal dates keep input order, articles before links.
pub fn aggregate<'a>(articles: &'a [Article], links: &'a [LinkReference]) -> Vec<FeedItem<'a>> {
    let mut items: Vec<FeedItem<'a>> = articles
        .iter()
        .filter(|a| !a.draft)
        .map(FeedItem::Article)
        .chain(links.iter().map(FeedItem::Link))
        .collect();
    items.sort_by(|a, b| b.date().cmp(&a.date()));
    items
}

/// Listing lines with an `<h2>` heading wherever the year changes.
pub fn listing_lines(items: &[FeedItem<'_>]) -> Vec<String> {
    let mut lines = Vec::with_capacity(items.len() + 8);
    let mut last_year = None;
    for item in items {
        let year = item.date().year;
        if last_year != Some(year) {
            last_year = Some(year);
            lines.push(format!("<h2>{year}</h2>"));
        }
        lines.push(item.markup());
    }
    lines
}

/// The markdown source of the home page.
pub fn index_document(site_title: &str, items: &[FeedItem<'_>]) -> String {
    let title = serde_json::Value::from(site_title).to_string();
    let mut lines = vec![
        "---".to_string(),
        format!("title: {title}"),
        "isindex: true".to_string(),
        "---".to_string(),
        String::new(),
    ];
    lines.extend(listing_lines(items));
    lines.join("\n")
}

/// Render `<out>/index.html`.
pub fn write_index(
    content: &Content,
    config: &SiteConfig,
    renderer: &dyn Renderer,
) -> Result<PathBuf, BuildError> {
    let items = aggregate(&content.articles, &content.links);
    let document = index_document(&config.site.title, &items);
    let dest = config.output_join("index.html");

    let html = renderer
        .render_content(
            Source::Text(&document),
            &config.render.page_template,
            &TemplateVars::new(),
        )
        .map_err(|e| BuildError::render(&dest, e))?;

    fs::write(&dest, html).at(&dest)?;
    Ok(dest)
}

fn escape_link_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '[' | ']' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
