use serde::{Deserialize, Serialize};

/// Kind of a listed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Directory,
    File,
}

/// One entry of a directory listing, as emitted by the file server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Lowercased extension without the dot; `None` for directories and bare names.
    pub extension: Option<String>,
    /// Size in bytes; `None` for directories.
    pub size: Option<u64>,
    #[serde(rename = "modifiedAt")]
    pub modified_at: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl FileInfo {
    pub fn is_dir(&self) -> bool {
        self.entry_type == EntryType::Directory
    }
}

/// Envelope of the listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryResponse {
    pub files: Vec<FileInfo>,
}

/// Body of every error the file server returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
