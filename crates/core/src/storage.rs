//! ObjectStore trait — the abstraction over blob storage backends.
//!
//! The pipeline treats storage as a simple key/value blob store with
//! `list` and `download`. Implementations: Supabase storage, local
//! filesystem, in-memory.

use crate::error::StorageError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry in a folder listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectInfo {
    /// Entry name relative to the listed folder (e.g., "handbook.pdf")
    pub name: String,

    /// Object size in bytes, when the backend reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// Creation timestamp, when the backend reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ObjectInfo {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: None,
            created_at: None,
        }
    }
}

/// The core ObjectStore trait.
///
/// Listing order is the backend's order and is preserved by callers: the
/// corpus loader keys its re-sequencing and the scorer its tie-breaking
/// off the order `list` returns.
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// A human-readable name for this backend (e.g., "supabase", "local").
    fn name(&self) -> &str;

    /// List entries directly under `prefix`.
    async fn list(&self, prefix: &str) -> std::result::Result<Vec<ObjectInfo>, StorageError>;

    /// Download the object at `path` (full path, folder included).
    async fn download(&self, path: &str) -> std::result::Result<Vec<u8>, StorageError>;

    /// Health check — can we reach the backend?
    async fn health_check(&self) -> std::result::Result<bool, StorageError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_info_omits_absent_fields_from_json() {
        let info = ObjectInfo::named("a.txt");
        let json = serde_json::to_string(&info).unwrap();
        assert_eq!(json, r#"{"name":"a.txt"}"#);
    }

    #[test]
    fn object_info_parses_backend_timestamps() {
        let json = r#"{"name":"b.pdf","size":1024,"created_at":"2024-05-01T12:00:00Z"}"#;
        let info: ObjectInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.size, Some(1024));
        assert!(info.created_at.is_some());
    }
}
