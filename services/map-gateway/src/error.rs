//! Error responses for the sample route.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use worker_protocol::{ValidationError, WorkerError};

/// Body of every error the gateway reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub detail: String,
}

/// Failure surfaced to the caller.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body was not valid JSON or lacked required fields.
    #[error("{0}")]
    MalformedRequest(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Worker(#[from] WorkerError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MalformedRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Worker(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Stable, human-readable summary placed in the `error` field.
    pub fn title(&self) -> &'static str {
        match self {
            ApiError::MalformedRequest(_) | ApiError::Validation(_) => "Invalid sample request",
            ApiError::Worker(e) if e.is_unreachable() => "Python worker not reachable",
            ApiError::Worker(_) => "Python worker returned an error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.title().to_string(),
            detail: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
