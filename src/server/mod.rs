//! HTTP file server: directory listings, downloads and static assets.

mod error;
mod handlers;

pub use error::ApiError;

use crate::config::ServerConfig;
use crate::files::FileStorage;
use anyhow::{Context, Result};
use axum::{routing::get, Router};
use std::path::Path;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<FileStorage>,
}

pub fn router(storage: FileStorage, public_dir: &Path) -> Router {
    let state = AppState {
        storage: Arc::new(storage),
    };

    Router::new()
        .route(
            "/api/files/list",
            get(handlers::list_files).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/files",
            get(handlers::serve_file).fallback(handlers::method_not_allowed),
        )
        .fallback_service(ServeDir::new(public_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until Ctrl-C.
pub async fn run(config: &ServerConfig) -> Result<()> {
    let storage = FileStorage::new(&config.root)?;
    let base_dir = storage.base_dir().display().to_string();
    let app = router(storage, &config.public_dir);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!(addr = %addr, root = %base_dir, "File server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("File server failed")?;

    tracing::info!("File server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::{DirectoryResponse, ErrorResponse};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use tempfile::TempDir;

    struct Fixture {
        root: TempDir,
        _public: TempDir,
        server: TestServer,
    }

    fn fixture() -> Fixture {
        let root = TempDir::new().unwrap();
        std::fs::create_dir(root.path().join("photos")).unwrap();
        std::fs::write(root.path().join("notes.txt"), "remember the milk").unwrap();
        std::fs::write(root.path().join("Archive.ZIP"), [0u8, 1, 2]).unwrap();

        let public = TempDir::new().unwrap();
        std::fs::write(public.path().join("index.html"), "<h1>browser</h1>").unwrap();

        let storage = FileStorage::new(root.path().to_str().unwrap()).unwrap();
        let server = TestServer::new(router(storage, public.path())).unwrap();
        Fixture {
            root,
            _public: public,
            server,
        }
    }

    #[tokio::test]
    async fn lists_root_directories_first() {
        let fx = fixture();
        let response = fx.server.get("/api/files/list").add_query_param("path", "/").await;
        response.assert_status_ok();

        let listing: DirectoryResponse = response.json();
        let names: Vec<&str> = listing.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["photos", "Archive.ZIP", "notes.txt"]);
        assert_eq!(listing.files[1].extension.as_deref(), Some("zip"));
        assert_eq!(listing.files[2].size, Some(17));
    }

    #[tokio::test]
    async fn missing_path_lists_root() {
        let fx = fixture();
        let response = fx.server.get("/api/files/list").await;
        response.assert_status_ok();
        assert_eq!(response.json::<DirectoryResponse>().files.len(), 3);
    }

    #[tokio::test]
    async fn repeated_path_uses_first_value() {
        let fx = fixture();
        let response = fx.server.get("/api/files/list?path=/&path=/photos").await;
        response.assert_status_ok();
        assert_eq!(response.json::<DirectoryResponse>().files.len(), 3);

        let response = fx
            .server
            .get("/api/files?path=/notes.txt&path=/photos")
            .await;
        response.assert_status_ok();
        response.assert_text("remember the milk");
    }

    #[tokio::test]
    async fn listing_rejects_traversal() {
        let fx = fixture();
        let response = fx
            .server
            .get("/api/files/list")
            .add_query_param("path", "../../etc")
            .expect_failure()
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<ErrorResponse>().error,
            "access denied: path is outside the allowed directory"
        );
    }

    #[tokio::test]
    async fn listing_a_file_is_rejected() {
        let fx = fixture();
        let response = fx
            .server
            .get("/api/files/list")
            .add_query_param("path", "/notes.txt")
            .expect_failure()
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<ErrorResponse>().error, "Not a directory");
    }

    #[tokio::test]
    async fn listing_missing_directory() {
        let fx = fixture();
        let response = fx
            .server
            .get("/api/files/list")
            .add_query_param("path", "/missing")
            .expect_failure()
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<ErrorResponse>().error, "path does not exist");
    }

    #[tokio::test]
    async fn non_get_is_method_not_allowed() {
        let fx = fixture();
        let response = fx.server.post("/api/files/list").expect_failure().await;
        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.json::<ErrorResponse>().error, "Method not allowed");

        let response = fx.server.delete("/api/files").expect_failure().await;
        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn download_sets_attachment_headers() {
        let fx = fixture();
        let response = fx.server.get("/api/files").add_query_param("path", "notes.txt").await;
        response.assert_status_ok();
        response.assert_text("remember the milk");
        assert_eq!(
            response.header("content-disposition"),
            "attachment; filename=\"notes.txt\""
        );
        assert_eq!(response.header("content-type"), "text/plain; charset=utf-8");
        assert_eq!(response.header("content-length"), "17");
    }

    #[tokio::test]
    async fn download_unknown_type_is_octet_stream() {
        let fx = fixture();
        let response = fx.server.get("/api/files").add_query_param("path", "/Archive.ZIP").await;
        response.assert_status_ok();
        assert_eq!(response.header("content-type"), "application/zip");

        std::fs::write(fx.root.path().join("blob.qqqzz"), "x").unwrap();
        let response = fx.server.get("/api/files").add_query_param("path", "/blob.qqqzz").await;
        assert_eq!(response.header("content-type"), "application/octet-stream");
    }

    #[tokio::test]
    async fn download_requires_path() {
        let fx = fixture();
        let response = fx.server.get("/api/files").expect_failure().await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<ErrorResponse>().error, "Path parameter is required");
    }

    #[tokio::test]
    async fn download_of_directory_is_rejected() {
        let fx = fixture();
        let response = fx
            .server
            .get("/api/files")
            .add_query_param("path", "/photos")
            .expect_failure()
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<ErrorResponse>().error, "Not a file");
    }

    #[tokio::test]
    async fn static_assets_are_served() {
        let fx = fixture();
        let response = fx.server.get("/").await;
        response.assert_status_ok();
        response.assert_text("<h1>browser</h1>");
    }
}
