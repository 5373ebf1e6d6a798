//! Runtime configuration utilities for sentiment-quadrant.

use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{ensure, Context};
use serde::Deserialize;

use crate::data::remote::DEFAULT_SOURCE_URL;

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Endpoint serving the indicator document.
    pub source_url: String,
    /// Trailing number of observations standardised per run.
    pub window: usize,
    /// Upper bound on a single upstream request.
    pub http_timeout_secs: u64,
    /// Root folder for persisted series.
    pub data_dir: PathBuf,
    /// Root folder for reports.
    pub outputs_dir: PathBuf,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let source_url =
            env::var("SENTIMENT_SOURCE_URL").unwrap_or_else(|_| DEFAULT_SOURCE_URL.to_string());
        let window = env::var("SENTIMENT_WINDOW")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(20);
        let http_timeout_secs = env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(15);
        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));
        let outputs_dir = env::var("OUTPUTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./outputs"));

        let settings = Self {
            source_url,
            window,
            http_timeout_secs,
            data_dir,
            outputs_dir,
        };
        settings.validate()?;

        std::fs::create_dir_all(&settings.data_dir).context("creating data dir")?;
        std::fs::create_dir_all(&settings.outputs_dir).context("creating outputs dir")?;
        Ok(settings)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.window >= 1, "SENTIMENT_WINDOW must be at least 1");
        ensure!(self.http_timeout_secs >= 1, "HTTP_TIMEOUT_SECS must be at least 1");
        Ok(())
    }

    /// Pick the CLI override when present, otherwise the configured window.
    pub fn window_or(&self, window: Option<usize>) -> usize {
        window.unwrap_or(self.window)
    }

    /// Convenience helper for derived path segments.
    pub fn join_data<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.data_dir.join(path)
    }

    /// Convenience helper for derived output path segments.
    pub fn join_output<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.outputs_dir.join(path)
    }
}
