use super::schema::{EntryType, FileInfo};
use chrono::{DateTime, Local, SecondsFormat};
use std::fs::Metadata;
use std::io;
use std::path::Path;
use std::time::SystemTime;
use tokio::fs;

/// Read one level of `dir` into listing entries.
///
/// Entries whose metadata cannot be read are skipped rather than failing the
/// whole listing.
pub async fn read_entries(dir: &Path) -> io::Result<Vec<FileInfo>> {
    let mut reader = fs::read_dir(dir).await?;
    let mut files = Vec::new();

    while let Some(entry) = reader.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        let metadata = match entry.metadata().await {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::debug!(name = %name, error = %e, "Skipping unreadable entry");
                continue;
            }
        };
        files.push(entry_info(name, &metadata));
    }

    Ok(files)
}

/// Directories before files, then by name.
pub fn sort_entries(files: &mut [FileInfo]) {
    files.sort_by(|a, b| match (a.is_dir(), b.is_dir()) {
        (true, false) => std::cmp::Ordering::Less,
        (false, true) => std::cmp::Ordering::Greater,
        _ => a.name.cmp(&b.name),
    });
}

fn entry_info(name: String, metadata: &Metadata) -> FileInfo {
    // Birth time is not portable; both timestamps carry the modification time.
    let modified = metadata
        .modified()
        .map(format_timestamp)
        .unwrap_or_default();

    if metadata.is_dir() {
        return FileInfo {
            name,
            entry_type: EntryType::Directory,
            extension: None,
            size: None,
            created_at: modified.clone(),
            modified_at: modified,
        };
    }

    FileInfo {
        extension: extension_of(&name),
        name,
        entry_type: EntryType::File,
        size: Some(metadata.len()),
        created_at: modified.clone(),
        modified_at: modified,
    }
}

fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .filter(|ext| !ext.is_empty())
}

fn format_timestamp(time: SystemTime) -> String {
    DateTime::<Local>::from(time).to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(name: &str, entry_type: EntryType) -> FileInfo {
        FileInfo {
            name: name.into(),
            entry_type,
            extension: None,
            size: None,
            modified_at: String::new(),
            created_at: String::new(),
        }
    }

    #[test]
    fn sort_puts_directories_first_then_bytewise_names() {
        let mut files = vec![
            info("b.txt", EntryType::File),
            info("zdir", EntryType::Directory),
            info("B.txt", EntryType::File),
            info("adir", EntryType::Directory),
        ];
        sort_entries(&mut files);
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["adir", "zdir", "B.txt", "b.txt"]);
    }

    #[test]
    fn extension_is_lowercased_without_dot() {
        assert_eq!(extension_of("Photo.JPG").as_deref(), Some("jpg"));
        assert_eq!(extension_of("archive.tar.gz").as_deref(), Some("gz"));
        assert_eq!(extension_of("Makefile"), None);
        assert_eq!(extension_of(".bashrc"), None);
    }

    #[tokio::test]
    async fn read_entries_reports_sizes_and_timestamps() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(temp.path().join("data.csv"), "a,b\n1,2\n").unwrap();
        std::fs::create_dir(temp.path().join("sub")).unwrap();

        let mut files = read_entries(temp.path()).await.unwrap();
        sort_entries(&mut files);

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].name, "sub");
        assert_eq!(files[0].size, None);
        assert_eq!(files[1].size, Some(8));
        assert_eq!(files[1].extension.as_deref(), Some("csv"));
        assert!(DateTime::parse_from_rfc3339(&files[1].modified_at).is_ok());
        assert_eq!(files[1].modified_at, files[1].created_at);
    }
}
