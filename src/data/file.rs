//! File-backed loader and persistence for offline runs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::{
    data::{
        loader::SeriesLoader,
        types::{ObservationRecord, Series},
    },
    error::PipelineError,
};

/// Reads a persisted series from CSV (`timestamp,strength,breadth`) or a JSON
/// array of records, picked by extension.
#[derive(Debug, Clone)]
pub struct FileLoader {
    path: PathBuf,
}

impl FileLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn is_json(&self) -> bool {
        self.path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    }
}

impl SeriesLoader for FileLoader {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load_series(&self, window_size: usize) -> Result<Series, PipelineError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|err| {
            PipelineError::unavailable(format!("read {}: {err}", self.path.display()))
        })?;
        let records = if self.is_json() {
            decode_json(&bytes)?
        } else {
            decode_csv(&bytes)?
        };
        let series = Series::from_records(records)?.trailing(window_size);
        info!(rows = series.len(), window = window_size, "loaded series from file");
        Ok(series)
    }
}

fn decode_json(bytes: &[u8]) -> Result<Vec<ObservationRecord>, PipelineError> {
    serde_json::from_slice(bytes)
        .map_err(|err| PipelineError::unavailable(format!("undecodable json series: {err}")))
}

fn decode_csv(bytes: &[u8]) -> Result<Vec<ObservationRecord>, PipelineError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);
    reader
        .deserialize::<ObservationRecord>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| PipelineError::unavailable(format!("undecodable csv series: {err}")))
}

/// Write `series` as CSV, creating parent directories as needed.
pub fn persist_series(series: &Series, path: &Path) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
    for record in series.to_records() {
        writer.serialize(record)?;
    }
    writer.flush()?;
    info!(rows = series.len(), path = %path.display(), "wrote series");
    Ok(path.to_path_buf())
}
