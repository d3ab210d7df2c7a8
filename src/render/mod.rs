//! The seam between the builder and the text-rendering engine.
//!
//! The builder never looks inside markup. It asks a [`Renderer`] for two
//! things only: the metadata of a source file as a JSON object, and the
//! final HTML for a source file (or an in-memory document) wrapped in a
//! template.
//!
//! [`Pandoc`] is the production implementation; it shells out.

mod pandoc;

pub use pandoc::Pandoc;

use serde_json::{Map, Value};
use std::path::Path;

use crate::error::RenderFailure;

/// Front matter as returned by the metadata template.
pub type Metadata = Map<String, Value>;

/// What to render: a file on disk or a generated document.
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    File(&'a Path),
    Text(&'a str),
}

/// Named template variables, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateVars(Vec<(String, String)>);

impl TemplateVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.push((key.into(), value.into()));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Capability interface over the rendering engine.
pub trait Renderer: Send + Sync {
    /// Run `template` against `source` and parse the output as a JSON object.
    fn extract_metadata(&self, source: &Path, template: &Path) -> Result<Metadata, RenderFailure>;

    /// Render `source` to HTML through `template`, returning the raw bytes.
    fn render_content(
        &self,
        source: Source<'_>,
        template: &Path,
        vars: &TemplateVars,
    ) -> Result<Vec<u8>, RenderFailure>;
}

/// Parse renderer output that must be a single JSON object.
pub(crate) fn parse_metadata(stdout: &[u8]) -> Result<Metadata, RenderFailure> {
    match serde_json::from_slice::<Value>(stdout)? {
        Value::Object(map) => Ok(map),
        _ => Err(RenderFailure::NotAnObject),
    }
}

#[cfg(test)]
pub use fake::FakeRenderer;


#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_template_vars_keep_order() {
        let vars = TemplateVars::new()
            .set("nice_date", "March 2023")
            .set("draft", "true");

        let pairs: Vec<_> = vars.iter().collect();
        assert_eq!(pairs, vec![("nice_date", "March 2023"), ("draft", "true")]);
    }

    #[test]
    fn test_parse_metadata() {
        let meta = parse_metadata(br#"{"title":"Hello","date":"2023-01-05"}"#).unwrap();
        assert_eq!(meta["title"], "Hello");

        assert!(matches!(
            parse_metadata(b"[1, 2]"),
            Err(RenderFailure::NotAnObject)
        ));
        assert!(matches!(
            parse_metadata(b"title: Hello"),
            Err(RenderFailure::Json(_))
        ));
    }

    #[test]
    fn test_fake_renderer_round_trip() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("index.md");
        fs::write(&source, "---\ntitle: A\ndraft: true\n---\nBody text\n").unwrap();

        let renderer = FakeRenderer::new();
        let meta = renderer
            .extract_metadata(&source, Path::new("metadata.tmpl"))
            .unwrap();
        assert_eq!(meta["title"], "A");
        assert_eq!(meta["draft"], true);

        let html = renderer
            .render_content(
                Source::File(&source),
                Path::new("post.tmpl"),
                &TemplateVars::new().set("draft", "true"),
            )
            .unwrap();
        assert_eq!(
            String::from_utf8(html).unwrap(),
            "<html data-template=\"post.tmpl\" data-vars=\"draft=true\">Body text\n</html>\n"
        );
    }
}
