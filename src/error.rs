//! Tagged failure taxonomy for the sentiment pipeline.

use std::fmt;

use thiserror::Error;

/// Raw dimension of an observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Strength,
    Breadth,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strength => f.write_str("strength"),
            Self::Breadth => f.write_str("breadth"),
        }
    }
}

/// Why a dimension could not be standardised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegenerateCause {
    /// Fewer than two observations, sample standard deviation undefined.
    TooFewPoints,
    /// Every reading in the window is identical.
    ZeroVariance,
    /// Spread of the readings exceeds the `f64` range.
    Overflow,
}

impl fmt::Display for DegenerateCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewPoints => f.write_str("fewer than two observations"),
            Self::ZeroVariance => f.write_str("zero variance"),
            Self::Overflow => f.write_str("spread exceeds floating-point range"),
        }
    }
}

/// Coarse classification callers use to pick their messaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Upstream data unavailable or malformed; try again later.
    RetryLater,
    /// Data present but unsuitable for standardisation.
    InsufficientData,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("series loader unavailable: {reason}")]
    LoaderUnavailable { reason: String },
    #[error("malformed series from loader: {reason}")]
    MalformedSeries { reason: String },
    #[error("series is empty; nothing to classify")]
    EmptySeries,
    #[error("cannot standardise {dimension}: {cause}")]
    DegenerateSeries {
        dimension: Dimension,
        cause: DegenerateCause,
    },
}

impl PipelineError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::LoaderUnavailable {
            reason: reason.into(),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedSeries {
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::LoaderUnavailable { .. } | Self::MalformedSeries { .. } => FailureKind::RetryLater,
            Self::EmptySeries | Self::DegenerateSeries { .. } => FailureKind::InsufficientData,
        }
    }

    /// Stable machine-readable tag.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::LoaderUnavailable { .. } => "loader_unavailable",
            Self::MalformedSeries { .. } => "malformed_series",
            Self::EmptySeries => "empty_series",
            Self::DegenerateSeries { .. } => "degenerate_series",
        }
    }
}
