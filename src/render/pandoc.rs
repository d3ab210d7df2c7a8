//! Renderer backed by an external `pandoc` executable.

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::{Metadata, Renderer, Source, TemplateVars, parse_metadata};
use crate::config::RenderConfig;
use crate::error::RenderFailure;
use crate::utils::exec::Cmd;

/// Invokes pandoc once per request; holds no state between calls.
#[derive(Debug, Clone)]
pub struct Pandoc {
    program: PathBuf,
    from: String,
    to: String,
    highlight_style: String,
    timeout: Option<Duration>,
}

impl Pandoc {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            program: config.program.clone(),
            from: config.from.clone(),
            to: config.to.clone(),
            highlight_style: config.highlight_style.clone(),
            timeout: config.timeout(),
        }
    }

    fn command(&self) -> Cmd {
        Cmd::new(&self.program).timeout(self.timeout)
    }

    /// Arguments for content rendering, without the input file.
    fn content_args(&self, template: &Path, vars: &TemplateVars) -> Vec<String> {
        let mut args = vec![
            "--from".to_string(),
            self.from.clone(),
            "--to".to_string(),
            self.to.clone(),
        ];
        for (key, value) in vars.iter() {
            args.push("--variable".to_string());
            args.push(format!("{key}={value}"));
        }
        args.extend([
            "--highlight-style".to_string(),
            self.highlight_style.clone(),
            "--template".to_string(),
            template.display().to_string(),
        ]);
        args
    }
}

impl Renderer for Pandoc {
    fn extract_metadata(&self, source: &Path, template: &Path) -> Result<Metadata, RenderFailure> {
        let output = self
            .command()
            .arg("--template")
            .arg(template)
            .arg(source)
            .run()?;
        parse_metadata(&output.stdout)
    }

    fn render_content(
        &self,
        source: Source<'_>,
        template: &Path,
        vars: &TemplateVars,
    ) -> Result<Vec<u8>, RenderFailure> {
        let cmd = self.command().args(self.content_args(template, vars));
        let cmd = match source {
            Source::File(path) => cmd.arg(path),
            Source::Text(text) => cmd.stdin(text),
        };
        Ok(cmd.run()?.stdout)
    }
}
