//! Command-line interface definitions.

use clap::Parser;
use std::path::PathBuf;

/// Build the site from posts/, links/ and static/ in the current directory
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output directory (created if missing, never cleaned)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub outdir: PathBuf,
}
