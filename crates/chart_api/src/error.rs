use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chart_engine::{ChartError, REQUIRED_DATA_FILES};
use ephemeris::EngineError;
use serde_json::{json, Value};
use thiserror::Error;

use crate::response::JsonPayload;

pub type Result<T> = std::result::Result<T, ApiError>;

pub const DATETIME_HINT: &str = "Expected ISO string like 1990-05-15T14:30:00Z.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Ephemeris engine is not available: {0}")]
    EngineUnavailable(String),

    #[error("Invalid JSON body: {0}")]
    MalformedRequestBody(String),

    #[error("Missing or invalid utc_datetime")]
    InvalidDatetime,

    #[error("Ephemeris data directory not found: {}", expected_path.display())]
    DataDirectoryMissing { expected_path: PathBuf },

    #[error("Ephemeris data files are missing or incomplete in {}", expected_path.display())]
    DataFilesIncomplete {
        expected_path: PathBuf,
        found_files_sample: Vec<String>,
    },

    #[error("Computation failed: {0}")]
    Computation(String),

    #[error("No route for {0}")]
    NotFound(String),

    #[error("Method {0} not allowed")]
    MethodNotAllowed(String),
}

impl From<ChartError> for ApiError {
    fn from(err: ChartError) -> Self {
        match err {
            ChartError::InvalidDatetime => ApiError::InvalidDatetime,
            ChartError::DataDirectoryMissing { expected_path } => {
                ApiError::DataDirectoryMissing { expected_path }
            }
            ChartError::DataFilesIncomplete {
                expected_path,
                found_files_sample,
            } => ApiError::DataFilesIncomplete {
                expected_path,
                found_files_sample,
            },
            ChartError::Engine(EngineError::Unavailable(details)) => {
                ApiError::EngineUnavailable(details)
            }
            other => ApiError::Computation(other.to_string()),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedRequestBody(_) | ApiError::InvalidDatetime => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::EngineUnavailable(_)
            | ApiError::DataDirectoryMissing { .. }
            | ApiError::DataFilesIncomplete { .. }
            | ApiError::Computation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> Value {
        match self {
            ApiError::EngineUnavailable(details) => json!({
                "error": "Ephemeris engine is not available in this environment.",
                "details": details,
            }),
            ApiError::MalformedRequestBody(details) => json!({
                "error": "Invalid JSON body.",
                "details": details,
            }),
            ApiError::InvalidDatetime => json!({
                "error": "Missing or invalid `utc_datetime`.",
                "code": chart_engine::error::INVALID_DATETIME_KEY,
                "hint": DATETIME_HINT,
            }),
            ApiError::DataDirectoryMissing { expected_path } => json!({
                "error": "Ephemeris data directory not found.",
                "expected_path": expected_path.display().to_string(),
                "hint": "Create this folder and add Swiss Ephemeris data files (e.g. swe_deltat.txt, sepl_*.se1).",
            }),
            ApiError::DataFilesIncomplete {
                expected_path,
                found_files_sample,
            } => json!({
                "error": "Ephemeris data files are missing or incomplete.",
                "expected_path": expected_path.display().to_string(),
                "found_files_sample": found_files_sample,
                "required": REQUIRED_DATA_FILES,
            }),
            ApiError::Computation(details) => json!({
                "error": "Unhandled ephemeris error.",
                "details": details,
            }),
            ApiError::NotFound(_) | ApiError::MethodNotAllowed(_) => json!({
                "error": self.to_string(),
                "hint": "Use GET / for health or POST / with a chart request.",
            }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("{}", self);
        }

        JsonPayload(status, self.body()).into_response()
    }
}
