//! API Request/Response Types

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::models::errors::AppError;

/// JSON body extractor whose rejections render as [`ErrorBody`]
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Path extractor whose rejections render as [`ErrorBody`]
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}

/// Error body, `{"detail": ..., "code": ...}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
    pub code: String,
}

/// Plain acknowledgement, `{"detail": "Success"}`
#[derive(Debug, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub detail: String,
}

impl Acknowledgement {
    pub fn success() -> Self {
        Self {
            detail: "Success".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub products: usize,
    /// `memory` or `sqlite`
    pub storage: String,
    pub timestamp: i64,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(code = self.code_str(), "{}", self.message);
        }

        let body = ErrorBody {
            detail: self.message,
            code: self.code.as_str().to_string(),
        };
        (status, Json(body)).into_response()
    }
}
