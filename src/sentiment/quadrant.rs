//! Four-way sentiment regime from the signs of the standardised axes.

use serde::Serialize;

use crate::{error::PipelineError, sentiment::zscore::NormalizedObservation};

/// Sentiment regime of the latest observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Quadrant {
    /// Breadth >= 0, strength >= 0.
    Greed,
    /// Breadth < 0, strength >= 0.
    Mixed,
    /// Breadth < 0, strength < 0.
    Fear,
    /// Breadth >= 0, strength < 0.
    Recovery,
}

impl Quadrant {
    /// Zero is treated as non-negative on both axes.
    pub fn from_point(point: LatestPoint) -> Self {
        match (point.z_breadth >= 0.0, point.z_strength >= 0.0) {
            (true, true) => Self::Greed,
            (false, true) => Self::Mixed,
            (false, false) => Self::Fear,
            (true, false) => Self::Recovery,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Greed => "GREED",
            Self::Mixed => "MIXED",
            Self::Fear => "FEAR",
            Self::Recovery => "RECOVERY",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Greed => "Broad participation with strong prices",
            Self::Mixed => "Strong prices carried by narrowing participation",
            Self::Fear => "Weak prices and weak participation",
            Self::Recovery => "Participation improving while prices lag",
        }
    }
}

/// Coordinates of the latest point, breadth on x and strength on y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatestPoint {
    pub z_breadth: f64,
    pub z_strength: f64,
}

impl From<&NormalizedObservation> for LatestPoint {
    fn from(value: &NormalizedObservation) -> Self {
        Self {
            z_breadth: value.z_breadth,
            z_strength: value.z_strength,
        }
    }
}

/// Classify the last element of a normalised series.
pub fn classify(
    normalized: &[NormalizedObservation],
) -> Result<(Quadrant, LatestPoint), PipelineError> {
    let latest = normalized.last().ok_or(PipelineError::EmptySeries)?;
    let point = LatestPoint::from(latest);
    Ok((Quadrant::from_point(point), point))
}
