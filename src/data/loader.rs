//! Loader seam between data sources and the pipeline.

use std::{future::Future, path::Path};

use crate::{
    config::Settings,
    data::{file::FileLoader, remote::RemoteLoader, types::Series},
    error::PipelineError,
};

/// Supplies the trailing window of joined, ascending observations.
///
/// Implementations either return a validated [`Series`] of at most
/// `window_size` points or a loader-class [`PipelineError`].
pub trait SeriesLoader {
    fn load_series(
        &self,
        window_size: usize,
    ) -> impl Future<Output = Result<Series, PipelineError>> + Send;
}

/// Closed set of loaders wired into the binary.
#[derive(Debug, Clone)]
pub enum Source {
    Remote(RemoteLoader),
    File(FileLoader),
}

impl SeriesLoader for Source {
    async fn load_series(&self, window_size: usize) -> Result<Series, PipelineError> {
        match self {
            Self::Remote(loader) => loader.load_series(window_size).await,
            Self::File(loader) => loader.load_series(window_size).await,
        }
    }
}

impl Source {
    /// File loader when `input` is given, remote loader otherwise.
    pub fn resolve(input: Option<&Path>, settings: &Settings) -> anyhow::Result<Self> {
        match input {
            Some(path) => Ok(Self::File(FileLoader::new(path))),
            None => Ok(Self::Remote(RemoteLoader::new(settings)?)),
        }
    }
}
