use crate::files::{ErrorResponse, StorageError};
use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Path parameter is required")]
    MissingPath,

    #[error("{0}")]
    Query(#[from] QueryRejection),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::MissingPath | ApiError::Query(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage(err) => match err {
                StorageError::Inaccessible { .. } | StorageError::ReadDir(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
                StorageError::AccessDenied
                | StorageError::NotFound
                | StorageError::NotADirectory
                | StorageError::NotAFile
                | StorageError::Io(_) => StatusCode::BAD_REQUEST,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            // Source chain goes to the log only; the body keeps the short message.
            tracing::error!(error = ?self, "File request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Rejected file request");
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
