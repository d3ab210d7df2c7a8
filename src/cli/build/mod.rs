//! Site building orchestration.
//!
//! Build pipeline phases:
//! - **Discover** - Read articles and links on the pool, check slugs
//! - **Pages** - Render each article to `<slug>/index.html` on the pool
//! - **Listings** - `index.html` and `index.xml` from the full content set
//! - **Assets** - Merge `static/` into the output root
//!
//! Any error aborts the build; nothing is retried and nothing is cleaned.

mod pipeline;

use crate::{
    config::SiteConfig, error::BuildError, logger::LogSink, render::Renderer,
    utils::par::WorkerPool,
};

/// Build the entire site into `config.output_dir()`.
///
/// Pipeline: discover -> pages -> listings -> assets
pub fn build_site(
    config: &SiteConfig,
    renderer: &dyn Renderer,
    pool: &WorkerPool,
    sink: &dyn LogSink,
) -> Result<(), BuildError> {
    // Slugs are checked before anything touches the output directory
    let content = pipeline::discover(config, renderer, pool, sink)?;

    pipeline::prepare_output(config)?;
    pipeline::render_pages(&content, config, renderer, pool, sink)?;
    pipeline::write_listings(&content, config, renderer, sink)?;
    pipeline::sync_assets(config, sink)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::{MemorySink, SilentSink};
    use crate::render::FakeRenderer;
    use std::fs;
    use std::path::Path;
    use std::sync::atomic::Ordering;
    use tempfile::TempDir;

    struct Site {
        dir: TempDir,
        config: SiteConfig,
    }

    impl Site {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let root = dir.path();
            let mut config = SiteConfig::default();
            config.site.title = "Test Site".into();
            config.site.url = "https://example.com".into();
            config.paths.posts = root.join("posts");
            config.paths.links = root.join("links");
            config.paths.static_dir = root.join("static");
            config.build.output = root.join("out");
            Self { dir, config }
        }

        fn write(&self, rel: &str, text: &str) {
            let path = self.dir.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, text).unwrap();
        }

        fn post(&self, slug: &str, title: &str, date: &str, draft: bool) {
            self.write(
                &format!("posts/{slug}/index.md"),
                &format!("---\ntitle: {title}\ndate: {date}\ndraft: {draft}\n---\n{title} body\n"),
            );
        }

        fn out(&self) -> &Path {
            self.config.output_dir()
        }

        fn read(&self, rel: &str) -> String {
            fs::read_to_string(self.out().join(rel)).unwrap()
        }

        fn build(&self, sink: &dyn LogSink) -> Result<(), BuildError> {
            build_site(
                &self.config,
                &FakeRenderer::new(),
                &WorkerPool::new(2).unwrap(),
                sink,
            )
        }
    }

    #[test]
    fn test_drafts_rendered_but_not_listed() {
        let site = Site::new();
        site.post("a", "A", "2023-01-05", false);
        site.post("b", "B", "2022-06-01", true);

        site.build(&SilentSink).unwrap();

        let index = site.read("index.html");
        assert_eq!(index.matches("<h2>").count(), 1);
        assert!(index.contains("<h2>2023</h2>"));
        assert_eq!(index.matches("[A](/a)").count(), 1);
        assert!(!index.contains("(/b)"));

        let feed = site.read("index.xml");
        assert_eq!(feed.matches("<item>").count(), 1);
        assert!(feed.contains("<link>https://example.com/a</link>"));
        assert!(!feed.contains("https://example.com/b"));

        assert!(site.read("b/index.html").contains("draft=true"));
        assert!(site.read("a/index.html").contains("nice_date=January 2023"));
    }

    #[test]
    fn test_links_listed_but_not_syndicated() {
        let site = Site::new();
        site.write(
            "links/cool-thing.json",
            r#"{"title": "Cool Thing", "date": "2023-03-01", "url": "https://example.com"}"#,
        );

        site.build(&SilentSink).unwrap();

        let feed = site.read("index.xml");
        assert_eq!(feed.matches("<item>").count(), 0);
        assert!(feed.ends_with('\n'));

        let index = site.read("index.html");
        assert!(index.contains("<h2>2023</h2>\n<p>[↗ Cool Thing](https://example.com)</p>"));
    }

    #[test]
    fn test_log_lines() {
        let site = Site::new();
        site.post("a", "A", "2023-01-05", false);
        site.write("links/x.json", r#"{"title": "X", "date": "2020-01-01", "url": "https://x.org"}"#);
        site.write("static/style.css", "body {}");

        let sink = MemorySink::new();
        site.build(&sink).unwrap();

        let out = site.out();
        assert_eq!(
            sink.messages("build"),
            vec![
                "found 1 posts and 1 links".to_string(),
                format!("generated {}", out.join("a/index.html").display()),
                format!("generated {}", out.join("index.html").display()),
                format!("generated {} (RSS feed)", out.join("index.xml").display()),
            ]
        );
        assert_eq!(
            sink.messages("assets"),
            vec![format!("copied {}", out.join("style.css").display())]
        );
    }

    #[test]
    fn test_missing_static_logs_no_copies() {
        let site = Site::new();
        site.post("a", "A", "2023-01-05", false);

        let sink = MemorySink::new();
        site.build(&sink).unwrap();

        assert!(sink.messages("assets").is_empty());
        assert!(site.out().join("index.xml").exists());
    }

    #[test]
    fn test_duplicate_slug_writes_nothing() {
        let site = Site::new();
        site.post("hello", "One", "2023-01-05", false);
        site.write(
            "posts/2024/hello/index.md",
            "---\ntitle: Two\ndate: 2024-01-05\n---\nTwo\n",
        );

        let renderer = FakeRenderer::new();
        let err = build_site(
            &site.config,
            &renderer,
            &WorkerPool::new(2).unwrap(),
            &SilentSink,
        )
        .unwrap_err();

        assert!(matches!(err, BuildError::DuplicateSlug { ref slug, .. } if slug == "hello"));
        assert_eq!(renderer.render_calls.load(Ordering::SeqCst), 0);
        assert!(!site.out().exists());
    }

    #[test]
    fn test_broken_post_fails_build() {
        let site = Site::new();
        site.post("a", "A", "2023-01-05", false);
        site.write("posts/broken/index.md", "---\ntitle: Broken\ndate: 2023-02-30\n---\n");

        let err = site.build(&SilentSink).unwrap_err();
        assert!(matches!(err, BuildError::Metadata { .. }));
        assert!(!site.out().join("index.html").exists());
    }

    #[test]
    fn test_render_failure_aborts_before_listings() {
        let site = Site::new();
        site.post("a", "A", "2023-01-05", false);
        site.post("bad", "Bad", "2023-01-06", false);

        let err = build_site(
            &site.config,
            &FakeRenderer::failing_on("bad/index.md"),
            &WorkerPool::new(1).unwrap(),
            &SilentSink,
        );

        // Metadata extraction hits the failing source first
        assert!(matches!(err, Err(BuildError::Render { .. })));
        assert!(!site.out().join("index.html").exists());
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let site = Site::new();
        site.post("a", "A", "2023-01-05", false);
        site.post("b", "B", "2021-06-01", false);
        site.write("posts/a/figure.png", "png");
        site.write("links/x.json", r#"{"title": "X", "date": "2022-01-01", "url": "https://x.org"}"#);
        site.write("static/css/site.css", "body {}");

        site.build(&SilentSink).unwrap();
        let first: Vec<String> = ["index.html", "index.xml", "a/index.html", "b/index.html"]
            .iter()
            .map(|rel| site.read(rel))
            .collect();

        site.build(&SilentSink).unwrap();
        let second: Vec<String> = ["index.html", "index.xml", "a/index.html", "b/index.html"]
            .iter()
            .map(|rel| site.read(rel))
            .collect();

        assert_eq!(first, second);
        assert_eq!(site.read("a/figure.png"), "png");
        assert_eq!(site.read("css/site.css"), "body {}");
    }

    #[test]
    fn test_empty_site() {
        let site = Site::new();
        let sink = MemorySink::new();
        site.build(&sink).unwrap();

        assert_eq!(sink.messages("build")[0], "found 0 posts and 0 links");
        assert!(site.read("index.xml").contains("<channel>"));
        assert!(site.out().join("index.html").exists());
    }
}
