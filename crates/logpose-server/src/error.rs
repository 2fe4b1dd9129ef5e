//! HTTP mapping for core errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use logpose_core::{proto::ErrorResponse, LogPoseError};

#[derive(Debug)]
pub struct AppError(pub LogPoseError);

impl From<LogPoseError> for AppError {
    fn from(e: LogPoseError) -> Self {
        Self(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!("request failed: {}", self.0);
        }
        (status, Json(ErrorResponse::new(self.0.detail()))).into_response()
    }
}
