//! Error types for the worker protocol.

use std::time::Duration;

use thiserror::Error;

use crate::bounds::BoundsError;

/// Result type alias using WorkerError.
pub type WorkerResult<T> = Result<T, WorkerError>;

/// Failure of a single forwarded call to the worker.
#[derive(Debug, Error)]
pub enum WorkerError {
    /// Connection refused, DNS failure, or transport-level timeout.
    #[error("Worker unreachable: {0}")]
    Unreachable(String),

    /// The worker answered with a non-2xx status.
    #[error("Worker responded with HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The worker answered 2xx but the body does not satisfy the contract.
    #[error("Invalid worker response: {0}")]
    InvalidResponse(String),

    /// The caller's deadline expired before the worker answered.
    #[error("Worker did not answer within {0:?}")]
    Timeout(Duration),
}

impl WorkerError {
    /// True when the worker could not be reached at all (or not in time).
    pub fn is_unreachable(&self) -> bool {
        matches!(self, WorkerError::Unreachable(_) | WorkerError::Timeout(_))
    }

    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            WorkerError::Unreachable(_) => "unreachable",
            WorkerError::Status { .. } => "status",
            WorkerError::InvalidResponse(_) => "invalid_response",
            WorkerError::Timeout(_) => "timeout",
        }
    }
}

impl From<reqwest::Error> for WorkerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() || err.is_request() {
            WorkerError::Unreachable(err.to_string())
        } else if err.is_decode() {
            WorkerError::InvalidResponse(err.to_string())
        } else if let Some(status) = err.status() {
            WorkerError::Status {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            WorkerError::Unreachable(err.to_string())
        }
    }
}

impl From<serde_json::Error> for WorkerError {
    fn from(err: serde_json::Error) -> Self {
        WorkerError::InvalidResponse(format!("JSON error: {}", err))
    }
}

impl From<BoundsError> for WorkerError {
    fn from(err: BoundsError) -> Self {
        WorkerError::InvalidResponse(format!("bounds: {}", err))
    }
}

/// Inbound request field that cannot be forwarded.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Empty date string")]
    EmptyDate,

    #[error("Invalid date format: {0}. Use YYYY-MM-DD or YYYYMMDD")]
    InvalidDate(String),

    #[error("Hour out of range [0, 23]: {0}")]
    InvalidHour(u32),

    #[error("Invalid hour; must be an integer: {0}")]
    InvalidHourFormat(String),

    #[error("pressure_level is required")]
    MissingPressureLevel,

    #[error("Invalid pressure_level; must be integer: {0}")]
    InvalidPressureLevel(String),

    #[error("Latitude out of range [-90, 90]: {0}")]
    InvalidLatitude(f64),

    #[error("Longitude out of range [-180, 180]: {0}")]
    InvalidLongitude(f64),
}
