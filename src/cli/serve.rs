//! CLI entry-point for serving the HTTP API.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{
    api::{self, AppState},
    config::Settings,
    data::loader::Source,
};

/// Run the Axum server.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Port to bind (default 8080).
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
    /// Host address, defaults to localhost.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,
    /// Serve from a persisted series instead of the remote source.
    #[arg(long)]
    pub input: Option<PathBuf>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let state = AppState {
        source: Source::resolve(args.input.as_deref(), &settings)?,
        window: settings.window,
    };
    api::serve(state, args.host, args.port).await
}
