//! Quire - a static site builder for a markdown blog rendered by pandoc.

mod cli;
mod config;
mod content;
mod error;
mod generator;
mod logger;
mod render;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, build::build_site};
use config::SiteConfig;
use logger::{LogSink, TerminalSink};
use render::Pandoc;
use std::process::ExitCode;
use utils::par::WorkerPool;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let sink = TerminalSink::new();

    match run(&cli, &sink) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log!(&sink, "error"; "{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, sink: &dyn LogSink) -> Result<()> {
    let config = SiteConfig::load(cli)?;
    let pool = WorkerPool::new(config.build.jobs).context("failed to start worker pool")?;
    let renderer = Pandoc::new(&config.render);

    build_site(&config, &renderer, &pool, sink).context("build failed")?;
    Ok(())
}
