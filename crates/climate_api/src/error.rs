//! HTTP error mapping.
//!
//! Every failure is a server-side failure: the API never rejects client
//! input, so all variants answer 500 with a JSON `{"error": ...}` body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use climate_core::{DbError, RepoError};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use tokio::task::JoinError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub enum ApiError {
    /// The dataset could not be opened or failed the schema check.
    Dataset(DbError),
    /// The query failed or returned invalid persisted data.
    Query(RepoError),
    /// The blocking query task panicked or was cancelled.
    Task(JoinError),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    /// Stable code used in `error_code=` log fields.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Dataset(_) => "dataset_unavailable",
            Self::Query(_) => "query_failed",
            Self::Task(_) => "query_task_failed",
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dataset(err) => write!(f, "dataset unavailable: {err}"),
            Self::Query(err) => write!(f, "query failed: {err}"),
            Self::Task(err) => write!(f, "query task failed: {err}"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Dataset(err) => Some(err),
            Self::Query(err) => Some(err),
            Self::Task(err) => Some(err),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(value: DbError) -> Self {
        Self::Dataset(value)
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        Self::Query(value)
    }
}

impl From<JoinError> for ApiError {
    fn from(value: JoinError) -> Self {
        Self::Task(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
