use super::{error::ApiError, AppState};
use crate::files::DirectoryResponse;
use axum::{
    body::Body,
    extract::{FromRequestParts, Query, State},
    http::{header, request::Parts},
    response::{IntoResponse, Response},
    Json,
};
use tokio_util::io::ReaderStream;

/// The `path` query parameter; empty when absent, first value when repeated.
pub struct PathParam(pub String);

impl<S> FromRequestParts<S> for PathParam
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state).await?;
        let path = pairs
            .into_iter()
            .find(|(key, _)| key == "path")
            .map(|(_, value)| value)
            .unwrap_or_default();
        Ok(PathParam(path))
    }
}

/// `GET /api/files/list?path=`
pub async fn list_files(
    State(state): State<AppState>,
    PathParam(path): PathParam,
) -> Result<Json<DirectoryResponse>, ApiError> {
    let files = state.storage.list(&path).await?;
    tracing::debug!(path = %path, count = files.len(), "Listed directory");
    Ok(Json(DirectoryResponse { files }))
}

/// `GET /api/files?path=`, streamed as an attachment.
pub async fn serve_file(
    State(state): State<AppState>,
    PathParam(path): PathParam,
) -> Result<Response, ApiError> {
    if path.is_empty() {
        return Err(ApiError::MissingPath);
    }

    let stored = state.storage.open(&path).await?;
    tracing::info!(path = %path, size = stored.size, "Serving file");

    let disposition = format!(
        "attachment; filename=\"{}\"",
        stored.name.replace(['"', '\\'], "_")
    );
    let body = Body::from_stream(ReaderStream::new(stored.file));

    Ok((
        [
            (header::CONTENT_TYPE, stored.mime_type),
            (header::CONTENT_DISPOSITION, disposition),
            (header::CONTENT_LENGTH, stored.size.to_string()),
        ],
        body,
    )
        .into_response())
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
