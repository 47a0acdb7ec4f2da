use super::mime::guess_mime_type;
use super::index;
use super::schema::FileInfo;
use anyhow::{Context, Result};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

/// Failures of sandboxed path resolution and file access.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("access denied: path is outside the allowed directory")]
    AccessDenied,

    #[error("path does not exist")]
    NotFound,

    #[error("Not a directory")]
    NotADirectory,

    #[error("Not a file")]
    NotAFile,

    /// The path resolved but could not be inspected afterwards.
    #[error("Failed to access {what}")]
    Inaccessible {
        what: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read directory")]
    ReadDir(#[source] io::Error),

    /// Any other failure while resolving; the message is surfaced as is.
    #[error("{0}")]
    Io(#[from] io::Error),
}

/// A regular file inside the sandbox, opened for streaming.
#[derive(Debug)]
pub struct StoredFile {
    pub file: fs::File,
    pub name: String,
    pub size: u64,
    pub mime_type: String,
}

/// Serves files from a single base directory and refuses anything outside it.
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_dir: PathBuf,
}

impl FileStorage {
    /// Create the base directory if needed and pin it to its canonical form.
    pub fn new(base_dir: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(base_dir).to_string();
        std::fs::create_dir_all(&expanded)
            .with_context(|| format!("Failed to create base directory {expanded}"))?;
        let base = std::fs::canonicalize(&expanded)
            .with_context(|| format!("Failed to resolve base directory {expanded}"))?;
        Ok(Self { base_dir: base })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Map a request path onto an existing path inside the base directory.
    ///
    /// An empty path is the base itself. `..` may not climb out of a relative
    /// path, and a rooted path is clamped at the root. Symlinks are followed
    /// and must still land inside the base directory.
    pub async fn resolve(&self, request_path: &str) -> Result<PathBuf, StorageError> {
        let relative = clean_relative(request_path)?;
        let full = self.base_dir.join(relative);

        let resolved = match fs::canonicalize(&full).await {
            Ok(resolved) => resolved,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(StorageError::NotFound),
            Err(e) => return Err(StorageError::Io(e)),
        };

        if !resolved.starts_with(&self.base_dir) {
            tracing::warn!(
                requested = request_path,
                resolved = %resolved.display(),
                "Rejected path escaping the base directory"
            );
            return Err(StorageError::AccessDenied);
        }

        Ok(resolved)
    }

    /// List the directory at `request_path`, directories first.
    pub async fn list(&self, request_path: &str) -> Result<Vec<FileInfo>, StorageError> {
        let dir = self.resolve(request_path).await?;
        let metadata = fs::metadata(&dir)
            .await
            .map_err(|source| StorageError::Inaccessible { what: "path", source })?;
        if !metadata.is_dir() {
            return Err(StorageError::NotADirectory);
        }

        let mut files = index::read_entries(&dir).await.map_err(StorageError::ReadDir)?;
        index::sort_entries(&mut files);
        Ok(files)
    }

    /// Open the regular file at `request_path` for download.
    pub async fn open(&self, request_path: &str) -> Result<StoredFile, StorageError> {
        let path = self.resolve(request_path).await?;
        let metadata = fs::metadata(&path)
            .await
            .map_err(|source| StorageError::Inaccessible { what: "file", source })?;
        if metadata.is_dir() {
            return Err(StorageError::NotAFile);
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file = fs::File::open(&path)
            .await
            .map_err(|source| StorageError::Inaccessible { what: "file", source })?;

        Ok(StoredFile {
            file,
            mime_type: guess_mime_type(&name),
            name,
            size: metadata.len(),
        })
    }
}

/// Lexically clean a request path into a base-relative path.
fn clean_relative(request_path: &str) -> Result<PathBuf, StorageError> {
    let normalized = request_path.replace('\\', "/");
    let rooted = normalized.is_empty() || normalized.starts_with('/');

    let mut parts: Vec<&str> = Vec::new();
    for segment in normalized.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if parts.pop().is_none() && !rooted {
                    return Err(StorageError::AccessDenied);
                }
            }
            name => parts.push(name),
        }
    }

    Ok(parts.iter().collect())
}
