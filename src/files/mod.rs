//! Sandboxed file access behind the file server.
//!
//! Resolves request paths against a single base directory, lists one
//! directory level at a time and opens files for download.

pub mod index;
pub mod mime;
pub mod schema;
pub mod storage;

pub use schema::{DirectoryResponse, EntryType, ErrorResponse, FileInfo};
pub use storage::{FileStorage, StorageError, StoredFile};
