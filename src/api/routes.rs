//! HTTP route handlers for Axum.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tracing::warn;

use crate::{
    api::types::ApiError,
    data::loader::SeriesLoader,
    sentiment::{self, SentimentReport},
};

use super::AppState;

type ApiResult<T> = Result<Json<T>, ApiError>;

#[derive(Debug, Deserialize)]
pub struct SentimentQuery {
    pub window: Option<usize>,
}

pub async fn sentiment(
    State(state): State<AppState>,
    Query(query): Query<SentimentQuery>,
) -> ApiResult<SentimentReport> {
    let window = query.window.unwrap_or(state.window);
    let series = state.source.load_series(window).await?;
    let report = sentiment::analyze(&series).map_err(|err| {
        warn!(%err, window, "series unsuitable for classification");
        err
    })?;
    Ok(Json(report))
}

pub async fn healthz() -> &'static str {
    "ok"
}
