//! RSS 2.0 feed of published articles (`index.xml`).
//!
//! Link references are not syndicated; only the site's own articles are.

use rss::{ChannelBuilder, GuidBuilder, ItemBuilder};
use std::fs;
use std::path::PathBuf;

use crate::config::{SiteConfig, SiteInfoConfig};
use crate::content::Article;
use crate::error::{BuildError, IoContext};

/// Serialize the feed, newest article first, ending with a newline.
pub fn build_feed(articles: &[Article], site: &SiteInfoConfig) -> String {
    let mut published: Vec<&Article> = articles.iter().filter(|a| !a.draft).collect();
    published.sort_by(|a, b| b.date.cmp(&a.date));

    let items: Vec<_> = published
        .into_iter()
        .map(|article| article_to_item(article, site))
        .collect();

    let channel = ChannelBuilder::default()
        .title(&site.title)
        .link(site.base_url())
        .description(&site.title)
        .items(items)
        .build();

    let mut xml = channel.to_string();
    xml.push('\n');
    xml
}

fn article_to_item(article: &Article, site: &SiteInfoConfig) -> rss::Item {
    let link = site.permalink(&article.slug);
    ItemBuilder::default()
        .title(article.title.clone())
        .link(Some(link.clone()))
        .guid(GuidBuilder::default().permalink(true).value(link).build())
        .description(article.title.clone())
        .pub_date(article.date.to_string())
        .build()
}

/// Write `<out>/index.xml`.
pub fn write_feed(articles: &[Article], config: &SiteConfig) -> Result<PathBuf, BuildError> {
    let dest = config.output_join("index.xml");
    fs::write(&dest, build_feed(articles, &config.site)).at(&dest)?;
    Ok(dest)
}
