//! Content items read from the source tree.
//!
//! ```text
//! content/
//! ├── article    # posts/**/index.md, metadata via the renderer
//! ├── link       # links/*.json
//! └── discover   # file lookup + pooled reads
//! ```

mod article;
mod discover;
mod link;

pub use article::Article;
pub use discover::read_content;
pub use link::LinkReference;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{BuildError, ItemKind};

/// Everything one build reads, in discovery (path) order.
#[derive(Debug, Clone, Default)]
pub struct Content {
    pub articles: Vec<Article>,
    pub links: Vec<LinkReference>,
}

impl Content {
    /// Slugs must be unique among articles and among links.
    ///
    /// Article slugs name output directories, so a collision would make two
    /// pages write to the same place.
    pub fn check_slugs(&self) -> Result<(), BuildError> {
        check_unique(
            ItemKind::Article,
            self.articles.iter().map(|a| (a.slug.as_str(), a.source.as_path())),
        )?;
        check_unique(
            ItemKind::Link,
            self.links.iter().map(|l| (l.slug.as_str(), l.source.as_path())),
        )
    }
}

fn check_unique<'a>(
    kind: ItemKind,
    items: impl Iterator<Item = (&'a str, &'a Path)>,
) -> Result<(), BuildError> {
    let mut seen: HashMap<&str, &Path> = HashMap::new();
    for (slug, path) in items {
        if let Some(first) = seen.insert(slug, path) {
            return Err(BuildError::DuplicateSlug {
                kind,
                slug: slug.to_string(),
                first: PathBuf::from(first),
                second: path.to_path_buf(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::date::Date;

    fn article(slug: &str, source: &str) -> Article {
        Article {
            title: slug.to_uppercase(),
            date: Date::from_ymd(2023, 1, 1),
            source: PathBuf::from(source),
            slug: slug.to_string(),
            draft: false,
        }
    }

    fn link(slug: &str) -> LinkReference {
        LinkReference {
            title: slug.to_string(),
            date: Date::from_ymd(2023, 1, 1),
            url: "https://example.com".into(),
            slug: slug.to_string(),
            source: PathBuf::from(format!("links/{slug}.json")),
        }
    }

    #[test]
    fn test_unique_slugs_pass() {
        let content = Content {
            articles: vec![article("a", "posts/a/index.md"), article("b", "posts/b/index.md")],
            links: vec![link("a"), link("c")],
        };
        assert!(content.check_slugs().is_ok());
    }

    #[test]
    fn test_duplicate_article_slug() {
        let content = Content {
            articles: vec![
                article("hello", "posts/2023/hello/index.md"),
                article("other", "posts/other/index.md"),
                article("hello", "posts/2024/hello/index.md"),
            ],
            links: Vec::new(),
        };
        match content.check_slugs().unwrap_err() {
            BuildError::DuplicateSlug {
                kind,
                slug,
                first,
                second,
            } => {
                assert_eq!(kind, ItemKind::Article);
                assert_eq!(slug, "hello");
                assert_eq!(first, PathBuf::from("posts/2023/hello/index.md"));
                assert_eq!(second, PathBuf::from("posts/2024/hello/index.md"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_link_slug() {
        let mut dup = link("x");
        dup.source = PathBuf::from("links/sub/x.json");
        let content = Content {
            articles: Vec::new(),
            links: vec![link("x"), dup],
        };
        assert!(matches!(
            content.check_slugs(),
            Err(BuildError::DuplicateSlug {
                kind: ItemKind::Link,
                ..
            })
        ));
    }
}
