//! Local filesystem backend.
//!
//! Maps the bucket layout onto a directory tree so the pipeline can run
//! against a folder of documents with no credentials at all. Listings are
//! sorted by file name to match the hosted backend's ordering.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use groundwork_core::error::StorageError;
use groundwork_core::storage::{ObjectInfo, ObjectStore};
use std::path::PathBuf;
use tracing::debug;

pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

fn io_error(e: std::io::Error, path: &str) -> StorageError {
    match e.kind() {
        std::io::ErrorKind::NotFound => StorageError::NotFound(path.to_string()),
        std::io::ErrorKind::PermissionDenied => StorageError::AuthenticationFailed(e.to_string()),
        _ => StorageError::Io(e.to_string()),
    }
}

#[async_trait]
impl ObjectStore for LocalStore {
    fn name(&self) -> &str {
        "local"
    }

    async fn list(&self, prefix: &str) -> std::result::Result<Vec<ObjectInfo>, StorageError> {
        let folder = self.root.join(prefix);
        debug!(folder = %folder.display(), "Listing local folder");

        let mut reader = tokio::fs::read_dir(&folder)
            .await
            .map_err(|e| io_error(e, prefix))?;

        let mut entries = Vec::new();
        while let Some(entry) = reader.next_entry().await.map_err(|e| io_error(e, prefix))? {
            let metadata = entry.metadata().await.map_err(|e| io_error(e, prefix))?;
            if !metadata.is_file() {
                continue;
            }
            entries.push(ObjectInfo {
                name: entry.file_name().to_string_lossy().into_owned(),
                size: Some(metadata.len()),
                created_at: metadata.created().ok().map(DateTime::<Utc>::from),
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    async fn download(&self, path: &str) -> std::result::Result<Vec<u8>, StorageError> {
        tokio::fs::read(self.root.join(path))
            .await
            .map_err(|e| io_error(e, path))
    }

    async fn health_check(&self) -> std::result::Result<bool, StorageError> {
        match tokio::fs::metadata(&self.root).await {
            Ok(metadata) => Ok(metadata.is_dir()),
            Err(_) => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seed(dir: &std::path::Path, name: &str, contents: &[u8]) {
        tokio::fs::write(dir.join(name), contents).await.unwrap();
    }

    #[tokio::test]
    async fn listing_is_sorted_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let docs = dir.path().join("docs");
        tokio::fs::create_dir(&docs).await.unwrap();
        seed(&docs, "b.txt", b"beta").await;
        seed(&docs, "a.txt", b"alpha").await;
        seed(&docs, "c.md", b"gamma").await;

        let store = LocalStore::new(dir.path());
        let entries = store.list("docs").await.unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["a.txt", "b.txt", "c.md"]);
        assert_eq!(entries[0].size, Some(5));
    }

    #[tokio::test]
    async fn subdirectories_are_not_listed_as_objects() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path(), "top.txt", b"top").await;
        tokio::fs::create_dir(dir.path().join("nested")).await.unwrap();

        let store = LocalStore::new(dir.path());
        let entries = store.list("").await.unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["top.txt"]);
    }

    #[tokio::test]
    async fn download_round_trips_bytes() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path(), "doc.txt", b"hello").await;

        let store = LocalStore::new(dir.path());
        assert_eq!(store.download("doc.txt").await.unwrap(), b"hello");
    }

    #[tokio::test]
    async fn missing_objects_are_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());

        let err = store.download("ghost.txt").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));

        let err = store.list("no_such_folder").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn health_check_requires_the_root_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        assert!(store.health_check().await.unwrap());

        let gone = LocalStore::new(dir.path().join("missing"));
        assert!(!gone.health_check().await.unwrap());
    }
}
