//! In-memory store for testing without a storage service.
//!
//! Keeps objects in a plain vector so listings come back in insertion
//! order, which makes ordering-sensitive tests deterministic. Not meant
//! for production use.

use async_trait::async_trait;
use groundwork_core::error::StorageError;
use groundwork_core::storage::{ObjectInfo, ObjectStore};
use tokio::sync::RwLock;

/// Object store that lives entirely in memory.
///
/// Keys are full object paths (e.g. `"Knowledge_Base/a.txt"`). `list`
/// returns the entries directly under a prefix, in insertion order.
#[derive(Default)]
pub struct MemoryStore {
    objects: RwLock<Vec<(String, Vec<u8>)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an object, replacing any existing one at the same path.
    pub async fn insert(&self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        let path = path.into();
        let bytes = bytes.into();
        let mut objects = self.objects.write().await;
        if let Some(slot) = objects.iter_mut().find(|(p, _)| *p == path) {
            slot.1 = bytes;
        } else {
            objects.push((path, bytes));
        }
    }

    /// Builder-style insert for test setup.
    pub async fn with_object(self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(path, bytes).await;
        self
    }
}

/// The part of `path` directly under `prefix`, if any.
///
/// `entry_name("Knowledge_Base/a.txt", "Knowledge_Base")` is `Some("a.txt")`;
/// deeper paths and paths outside the prefix yield `None`.
fn entry_name<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = if prefix.is_empty() {
        path
    } else {
        path.strip_prefix(prefix)?.strip_prefix('/')?
    };
    (!rest.is_empty() && !rest.contains('/')).then_some(rest)
}

#[async_trait]
impl ObjectStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn list(&self, prefix: &str) -> std::result::Result<Vec<ObjectInfo>, StorageError> {
        let objects = self.objects.read().await;
        Ok(objects
            .iter()
            .filter_map(|(path, bytes)| {
                entry_name(path, prefix).map(|name| ObjectInfo {
                    name: name.to_string(),
                    size: Some(bytes.len() as u64),
                    created_at: None,
                })
            })
            .collect())
    }

    async fn download(&self, path: &str) -> std::result::Result<Vec<u8>, StorageError> {
        let objects = self.objects.read().await;
        objects
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, bytes)| bytes.clone())
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn listing_preserves_insertion_order() {
        let store = MemoryStore::new()
            .with_object("kb/zebra.txt", "z")
            .await
            .with_object("kb/apple.txt", "a")
            .await;

        let entries = store.list("kb").await.unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["zebra.txt", "apple.txt"]);
    }

    #[tokio::test]
    async fn listing_skips_nested_and_foreign_paths() {
        let store = MemoryStore::new()
            .with_object("kb/a.txt", "a")
            .await
            .with_object("kb/deep/b.txt", "b")
            .await
            .with_object("other/c.txt", "c")
            .await;

        let entries = store.list("kb").await.unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["a.txt"]);
    }

    #[tokio::test]
    async fn download_finds_exact_paths_only() {
        let store = MemoryStore::new().with_object("kb/a.txt", "alpha").await;

        assert_eq!(store.download("kb/a.txt").await.unwrap(), b"alpha");
        let err = store.download("kb/missing.txt").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn insert_replaces_existing_objects() {
        let store = MemoryStore::new();
        store.insert("kb/a.txt", "one").await;
        store.insert("kb/a.txt", "two").await;

        assert_eq!(store.download("kb/a.txt").await.unwrap(), b"two");
        assert_eq!(store.list("kb").await.unwrap().len(), 1);
    }
}
