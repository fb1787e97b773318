//! Request-level errors. Only a body that is not a JSON object is a hard
//! failure; every other grading outcome is a soft `Verdict`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::protocol::ErrorOut;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid json")]
    BadRequest,

    /// Page payload could not be built (serialization or compression).
    #[error("failed to render page: {0}")]
    Render(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(ErrorOut { detail: self.to_string() })).into_response()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Render(e.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(e: std::io::Error) -> Self {
        ApiError::Render(e.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
