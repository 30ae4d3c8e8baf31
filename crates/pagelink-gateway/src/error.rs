use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pagelink_core::{CoreError, LinkError, PageId};
use tracing::error;

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    /// A short link that no document answers to.
    UnknownPageId(PageId),
    Link(LinkError),
}

impl From<LinkError> for AppError {
    fn from(value: LinkError) -> Self {
        AppError::Link(value)
    }
}

impl From<CoreError> for AppError {
    fn from(value: CoreError) -> Self {
        AppError::Link(value.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::UnknownPageId(page_id) => {
                return (
                    StatusCode::NOT_FOUND,
                    format!("No document is associated to the given ID: [{}]", page_id),
                )
                    .into_response();
            }
            AppError::Link(LinkError::NotFound(message)) => (StatusCode::NOT_FOUND, message),
            AppError::Link(LinkError::AccessDenied(message)) => (StatusCode::UNAUTHORIZED, message),
            AppError::Link(LinkError::InvalidRequest(message)) => (StatusCode::BAD_REQUEST, message),
            AppError::Link(e @ (LinkError::LookupFailed(_) | LinkError::GenerationFailed(_))) => {
                let cause = std::error::Error::source(&e).map(ToString::to_string);
                error!(error = %e, cause = ?cause, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
