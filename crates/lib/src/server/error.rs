//! Error rendering for the HTTP surface.
//!
//! Every library error funnels through [`ApiError`], which maps the
//! structured error classes onto status codes and a uniform JSON body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use crate::Error;

/// An error on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl ApiError {
    fn status(&self) -> StatusCode {
        let err = &self.0;
        if err.is_not_found() {
            StatusCode::NOT_FOUND
        } else if err.is_unauthorized() {
            StatusCode::UNAUTHORIZED
        } else if err.is_permission_denied() {
            StatusCode::FORBIDDEN
        } else if err.is_conflict() {
            StatusCode::CONFLICT
        } else if err.is_validation_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(module = self.0.module(), "internal error: {}", self.0);
        }
        let body = json!({
            "statusCode": status.as_u16(),
            "error": self.0.module(),
            "message": self.0.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

impl<E: Into<Error>> From<E> for ApiError {
    fn from(err: E) -> Self {
        ApiError(err.into())
    }
}
