//! Standardisation and classification pipeline.

pub mod quadrant;
pub mod zscore;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::{data::types::Series, error::PipelineError};

use self::{
    quadrant::{LatestPoint, Quadrant},
    zscore::NormalizedObservation,
};

/// Result of one pipeline run, in the shape handed to renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentReport {
    pub normalized: Vec<NormalizedObservation>,
    pub latest_quadrant: Quadrant,
    pub latest_point: LatestPoint,
}

impl SentimentReport {
    /// Timestamp of the classified observation.
    pub fn as_of(&self) -> Option<DateTime<Utc>> {
        self.normalized.last().map(|obs| obs.timestamp)
    }
}

/// Normalise `series` and classify its latest point.
pub fn analyze(series: &Series) -> Result<SentimentReport, PipelineError> {
    let normalized = zscore::normalize(series)?;
    let (latest_quadrant, latest_point) = quadrant::classify(&normalized.observations)?;
    debug!(
        rows = normalized.observations.len(),
        mean_strength = normalized.strength.mean,
        std_strength = normalized.strength.std_dev,
        mean_breadth = normalized.breadth.mean,
        std_breadth = normalized.breadth.std_dev,
        quadrant = latest_quadrant.label(),
        "classified series"
    );
    Ok(SentimentReport {
        normalized: normalized.observations,
        latest_quadrant,
        latest_point,
    })
}
