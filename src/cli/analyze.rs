//! CLI entry-point for standardising a series and classifying it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::{info, instrument, warn};

use crate::{
    cli::OutputFormat,
    config::Settings,
    data::loader::{SeriesLoader, Source},
    error::{FailureKind, PipelineError},
    sentiment::{self, SentimentReport},
};

/// Args for the `analyze` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Persisted series (CSV or JSON); fetched remotely when omitted.
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Override the trailing window size.
    #[arg(long)]
    pub window: Option<usize>,
    /// Report rendering.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
    /// Also write `report.json` to the outputs directory.
    #[arg(long)]
    pub save: bool,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let window = settings.window_or(args.window);
    let source = Source::resolve(args.input.as_deref(), &settings)?;

    let report = match load_and_analyze(&source, window).await {
        Ok(report) => report,
        Err(err) => {
            match err.kind() {
                FailureKind::RetryLater => {
                    warn!(tag = err.tag(), %err, "indicator data unavailable; try again later")
                }
                FailureKind::InsufficientData => {
                    warn!(tag = err.tag(), %err, "not enough variation to classify")
                }
            }
            return Err(err).context("analyze series");
        }
    };
    info!(
        quadrant = report.latest_quadrant.label(),
        z_breadth = report.latest_point.z_breadth,
        z_strength = report.latest_point.z_strength,
        "classified latest observation"
    );

    let json = serde_json::to_string_pretty(&report)?;
    if args.save {
        let path = settings.join_output("report.json");
        std::fs::write(&path, &json).with_context(|| format!("write {}", path.display()))?;
        info!(path = %path.display(), "wrote report");
    }

    match args.format {
        OutputFormat::Json => println!("{json}"),
        OutputFormat::Text => println!("{}", render_text(&report)),
    }
    Ok(())
}

pub async fn load_and_analyze<L: SeriesLoader>(
    loader: &L,
    window: usize,
) -> Result<SentimentReport, PipelineError> {
    let series = loader.load_series(window).await?;
    sentiment::analyze(&series)
}

/// Human summary of a report.
pub fn render_text(report: &SentimentReport) -> String {
    let as_of = report
        .as_of()
        .map(|ts| ts.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown".to_string());
    format!(
        "{label} as of {as_of}: {description} (z_breadth {zb:+.3}, z_strength {zs:+.3}, {n} observations)",
        label = report.latest_quadrant.label(),
        description = report.latest_quadrant.description(),
        zb = report.latest_point.z_breadth,
        zs = report.latest_point.z_strength,
        n = report.normalized.len(),
    )
}
