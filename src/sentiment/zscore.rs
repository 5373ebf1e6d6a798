//! Per-dimension z-score standardisation over a whole window.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    data::types::Series,
    error::{DegenerateCause, Dimension, PipelineError},
};

/// Standardised counterpart of an observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizedObservation {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub z_strength: f64,
    pub z_breadth: f64,
}

/// Sample mean and Bessel-corrected standard deviation of one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Moments {
    pub mean: f64,
    pub std_dev: f64,
}

impl Moments {
    /// Two-pass estimate; fails when the deviation is undefined, zero or
    /// outside the `f64` range.
    pub fn estimate(values: &[f64], dimension: Dimension) -> Result<Self, PipelineError> {
        if values.is_empty() {
            return Err(PipelineError::EmptySeries);
        }
        if values.len() < 2 {
            return Err(PipelineError::DegenerateSeries {
                dimension,
                cause: DegenerateCause::TooFewPoints,
            });
        }
        let degenerate = |cause| PipelineError::DegenerateSeries { dimension, cause };
        if values.iter().all(|value| *value == values[0]) {
            return Err(degenerate(DegenerateCause::ZeroVariance));
        }

        let n = values.len() as f64;
        let sum = values.iter().sum::<f64>();
        let mean = if sum.is_finite() {
            sum / n
        } else {
            values.iter().map(|value| value / n).sum::<f64>()
        };

        // Deviations are scaled by the largest one so squaring neither
        // underflows for tiny spreads nor overflows for huge ones.
        let scale = values
            .iter()
            .map(|value| (value - mean).abs())
            .fold(0.0_f64, f64::max);
        if !scale.is_finite() {
            return Err(degenerate(DegenerateCause::Overflow));
        }
        if scale == 0.0 {
            return Err(degenerate(DegenerateCause::ZeroVariance));
        }
        let scaled_variance = values
            .iter()
            .map(|value| {
                let centered = (value - mean) / scale;
                centered * centered
            })
            .sum::<f64>()
            / (n - 1.0);
        let std_dev = scale * scaled_variance.sqrt();
        if !std_dev.is_finite() {
            return Err(degenerate(DegenerateCause::Overflow));
        }
        Ok(Self { mean, std_dev })
    }

    pub fn z(&self, value: f64) -> f64 {
        (value - self.mean) / self.std_dev
    }
}

/// Output of [`normalize`]: z-scores plus the statistics used to derive them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Normalized {
    pub observations: Vec<NormalizedObservation>,
    pub strength: Moments,
    pub breadth: Moments,
}

/// Standardise both dimensions of `series`. All-or-nothing.
pub fn normalize(series: &Series) -> Result<Normalized, PipelineError> {
    if series.is_empty() {
        return Err(PipelineError::EmptySeries);
    }
    let strengths: Vec<f64> = series.observations().iter().map(|o| o.strength).collect();
    let breadths: Vec<f64> = series.observations().iter().map(|o| o.breadth).collect();

    let strength = Moments::estimate(&strengths, Dimension::Strength)?;
    let breadth = Moments::estimate(&breadths, Dimension::Breadth)?;

    let observations = series
        .observations()
        .iter()
        .map(|obs| NormalizedObservation {
            timestamp: obs.timestamp,
            z_strength: strength.z(obs.strength),
            z_breadth: breadth.z(obs.breadth),
        })
        .collect();

    Ok(Normalized {
        observations,
        strength,
        breadth,
    })
}
