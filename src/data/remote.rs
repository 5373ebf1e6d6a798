//! Remote loader for the published fear & greed indicator document.

use std::{collections::BTreeMap, time::Duration};

use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::{
    config::Settings,
    data::{
        loader::SeriesLoader,
        types::{millis_to_utc, Observation, Series},
    },
    error::PipelineError,
};

pub const DEFAULT_SOURCE_URL: &str = "https://production.dataviz.cnn.io/index/feargreed/static/data";

/// Fetches both sub-indicator feeds in one request and joins them on timestamp.
#[derive(Debug, Clone)]
pub struct RemoteLoader {
    client: Client,
    url: String,
}

impl RemoteLoader {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("sentiment-quadrant/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(settings.http_timeout_secs))
            .gzip(true)
            .build()?;
        Ok(Self {
            client,
            url: settings.source_url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl SeriesLoader for RemoteLoader {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn load_series(&self, window_size: usize) -> Result<Series, PipelineError> {
        let resp = self.client.get(&self.url).send().await.map_err(|err| {
            warn!(%err, "indicator request failed");
            PipelineError::unavailable(format!("request failed: {err}"))
        })?;
        let status = resp.status();
        if !status.is_success() {
            warn!(%status, "indicator source refused request");
            return Err(PipelineError::unavailable(format!("upstream status {status}")));
        }
        let body = resp
            .bytes()
            .await
            .map_err(|err| PipelineError::unavailable(format!("reading body failed: {err}")))?;
        let series = series_from_payload(&body, window_size)?;
        info!(rows = series.len(), window = window_size, "loaded remote series");
        Ok(series)
    }
}

#[derive(Debug, Deserialize)]
struct Payload {
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    stock_price_strength: Feed,
    stock_price_breadth: Feed,
}

#[derive(Debug, Deserialize)]
struct Feed {
    data: Vec<Point>,
}

#[derive(Debug, Deserialize)]
struct Point {
    x: f64,
    y: f64,
}

/// Decode the indicator document, inner-join the two feeds on `x` and keep
/// the most recent `window_size` joined points.
pub fn series_from_payload(body: &[u8], window_size: usize) -> Result<Series, PipelineError> {
    let payload: Payload = serde_json::from_slice(body)
        .map_err(|err| PipelineError::unavailable(format!("undecodable payload: {err}")))?;

    let strength = index_feed(&payload.indicators.stock_price_strength)?;
    let breadth = index_feed(&payload.indicators.stock_price_breadth)?;

    let mut joined = Vec::with_capacity(strength.len().min(breadth.len()));
    for (millis, strength_value) in &strength {
        if let Some(breadth_value) = breadth.get(millis) {
            joined.push(Observation::new(
                millis_to_utc(*millis)?,
                *strength_value,
                *breadth_value,
            ));
        }
    }
    if joined.len() < strength.len().max(breadth.len()) {
        info!(
            strength = strength.len(),
            breadth = breadth.len(),
            joined = joined.len(),
            "dropped unmatched timestamps"
        );
    }

    Ok(Series::new(joined)?.trailing(window_size))
}

// Later duplicates of a timestamp replace earlier ones.
fn index_feed(feed: &Feed) -> Result<BTreeMap<i64, f64>, PipelineError> {
    let mut out = BTreeMap::new();
    for point in &feed.data {
        if !point.x.is_finite() {
            return Err(PipelineError::malformed("non-finite timestamp in feed"));
        }
        out.insert(point.x.round() as i64, point.y);
    }
    Ok(out)
}
