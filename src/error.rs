use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::api::ApiError;

/// AppError
///
/// Failures that escape a blog handler. Authentication failures are not here:
/// a wrong password re-renders the gate instead of erroring.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("failed to render page: {0}")]
    Render(#[from] askama::Error),
    #[error("failed to issue session: {0}")]
    Session(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Api(ApiError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Api(_) => StatusCode::BAD_GATEWAY,
            AppError::Render(_) | AppError::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        } else {
            tracing::warn!("request failed: {}", self);
        }

        // Plain markup so a template failure cannot cascade.
        let body = format!(
            "<!doctype html><html><head><title>Error</title></head>\
             <body><h1>{}</h1><p><a href=\"/blog\">Back to the blog</a></p></body></html>",
            status.canonical_reason().unwrap_or("Error")
        );
        (status, Html(body)).into_response()
    }
}
