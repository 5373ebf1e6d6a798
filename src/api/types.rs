//! Shared DTOs for JSON responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::PipelineError;

#[derive(Debug, Clone, Serialize)]
pub struct ErrorDto {
    pub error: &'static str,
    pub message: String,
}

/// Pipeline failure carried out of a handler.
#[derive(Debug)]
pub struct ApiError(pub PipelineError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            PipelineError::LoaderUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            PipelineError::MalformedSeries { .. } => StatusCode::BAD_GATEWAY,
            PipelineError::EmptySeries | PipelineError::DegenerateSeries { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
        }
    }
}

impl From<PipelineError> for ApiError {
    fn from(value: PipelineError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorDto {
            error: self.0.tag(),
            message: self.0.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
