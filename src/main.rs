use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use zenview::{Viewer, ViewerConfig};

/// Show a plain-text PPM (P3) image. Drop another file on the window to
/// replace it; Escape or q quits.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Image to show at startup
    path: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let viewer = Viewer::startup(ViewerConfig::default(), cli.path.as_deref());
    zenview::backend::run(viewer).context("viewer failed")?;
    Ok(())
}
