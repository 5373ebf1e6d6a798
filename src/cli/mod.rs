//! Command-line interface wiring for sentiment-quadrant.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use crate::config::Settings;

pub mod analyze;
pub mod fetch;
pub mod serve;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Market sentiment quadrant from standardised strength and breadth", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Fetch(args) => fetch::run(args, settings).await,
            Commands::Analyze(args) => analyze::run(args, settings).await,
            Commands::Serve(args) => serve::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Download the indicator feeds and persist the joined window.
    Fetch(fetch::Args),
    /// Standardise a series and classify its latest point.
    Analyze(analyze::Args),
    /// Serve the JSON API.
    Serve(serve::Args),
}

/// Rendering of an analysis report.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON report.
    #[default]
    Json,
    /// One-paragraph human summary.
    Text,
}
