//! CLI entry-point for fetching and persisting the indicator window.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{
    config::Settings,
    data::{file, loader::SeriesLoader, remote::RemoteLoader},
};

/// Args for the `fetch` sub-command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Override the trailing window size.
    #[arg(long)]
    pub window: Option<usize>,
    /// Destination CSV (defaults to `<DATA_DIR>/series.csv`).
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let window = settings.window_or(args.window);
    let loader = RemoteLoader::new(&settings)?;
    info!(url = loader.url(), window, "fetching indicator window");

    let series = loader
        .load_series(window)
        .await
        .context("load remote series")?;

    let dest = args
        .output
        .unwrap_or_else(|| settings.join_data("series.csv"));
    let path = file::persist_series(&series, &dest)?;
    println!("{}", path.display());
    Ok(())
}
