//! Raw observation and series types shared by loaders and the pipeline.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// One raw paired reading of the two sentiment sub-indicators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub timestamp: DateTime<Utc>,
    pub strength: f64,
    pub breadth: f64,
}

impl Observation {
    pub fn new(timestamp: DateTime<Utc>, strength: f64, breadth: f64) -> Self {
        Self {
            timestamp,
            strength,
            breadth,
        }
    }
}

/// Wire representation of an [`Observation`], timestamps in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservationRecord {
    pub timestamp: i64,
    pub strength: f64,
    pub breadth: f64,
}

impl ObservationRecord {
    pub fn into_observation(self) -> Result<Observation, PipelineError> {
        let timestamp = millis_to_utc(self.timestamp)?;
        Ok(Observation::new(timestamp, self.strength, self.breadth))
    }
}

impl From<&Observation> for ObservationRecord {
    fn from(value: &Observation) -> Self {
        Self {
            timestamp: value.timestamp.timestamp_millis(),
            strength: value.strength,
            breadth: value.breadth,
        }
    }
}

/// Convert epoch milliseconds into a UTC instant.
pub fn millis_to_utc(millis: i64) -> Result<DateTime<Utc>, PipelineError> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| PipelineError::malformed(format!("timestamp {millis} out of range")))
}

/// Ascending, validated sequence of observations.
///
/// Only constructible through [`Series::new`], so every value in the crate
/// has strictly increasing timestamps and finite readings. Empty series are
/// allowed; the pipeline reports them as [`PipelineError::EmptySeries`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    observations: Vec<Observation>,
}

impl Series {
    pub fn new(observations: Vec<Observation>) -> Result<Self, PipelineError> {
        for (idx, obs) in observations.iter().enumerate() {
            if !obs.strength.is_finite() || !obs.breadth.is_finite() {
                return Err(PipelineError::malformed(format!(
                    "non-finite reading at {}",
                    obs.timestamp.to_rfc3339()
                )));
            }
            if idx > 0 && observations[idx - 1].timestamp >= obs.timestamp {
                return Err(PipelineError::malformed(format!(
                    "timestamps not strictly increasing at position {idx} ({})",
                    obs.timestamp.to_rfc3339()
                )));
            }
        }
        Ok(Self { observations })
    }

    pub fn from_records(records: Vec<ObservationRecord>) -> Result<Self, PipelineError> {
        let observations = records
            .into_iter()
            .map(ObservationRecord::into_observation)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(observations)
    }

    /// Keep only the most recent `window` observations.
    pub fn trailing(&self, window: usize) -> Self {
        let start = self.observations.len().saturating_sub(window);
        Self {
            observations: self.observations[start..].to_vec(),
        }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn to_records(&self) -> Vec<ObservationRecord> {
        self.observations.iter().map(ObservationRecord::from).collect()
    }
}
