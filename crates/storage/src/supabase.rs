//! Supabase Storage backend.
//!
//! Talks to the Storage REST API directly rather than through an SDK:
//! - `POST {url}/storage/v1/object/list/{bucket}` lists a folder
//! - `GET {url}/storage/v1/object/{bucket}/{path}` downloads an object
//!
//! Listings are requested sorted by name ascending, so every run of the
//! corpus loader sees the same order.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use groundwork_core::error::StorageError;
use groundwork_core::storage::{ObjectInfo, ObjectStore};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const LIST_PAGE_LIMIT: u32 = 1000;

/// Object store backed by a Supabase Storage bucket.
pub struct SupabaseStore {
    base_url: String,
    service_key: String,
    bucket: String,
    client: reqwest::Client,
}

impl SupabaseStore {
    /// Create a new store for one bucket.
    pub fn new(
        base_url: impl Into<String>,
        service_key: impl Into<String>,
        bucket: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service_key: service_key.into(),
            bucket: bucket.into(),
            client,
        }
    }

    fn list_url(&self) -> String {
        format!("{}/storage/v1/object/list/{}", self.base_url, self.bucket)
    }

    fn object_url(&self, path: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, path)
    }

    fn bucket_url(&self) -> String {
        format!("{}/storage/v1/bucket/{}", self.base_url, self.bucket)
    }
}

fn request_error(e: reqwest::Error) -> StorageError {
    if e.is_timeout() {
        StorageError::Timeout(e.to_string())
    } else {
        StorageError::Network(e.to_string())
    }
}

#[async_trait]
impl ObjectStore for SupabaseStore {
    fn name(&self) -> &str {
        "supabase"
    }

    async fn list(&self, prefix: &str) -> std::result::Result<Vec<ObjectInfo>, StorageError> {
        let body = ApiListRequest {
            prefix: prefix.to_string(),
            limit: LIST_PAGE_LIMIT,
            offset: 0,
            sort_by: ApiSortBy {
                column: "name".into(),
                order: "asc".into(),
            },
        };

        debug!(bucket = %self.bucket, prefix, "Listing storage folder");

        let response = self
            .client
            .post(self.list_url())
            .header("Authorization", format!("Bearer {}", self.service_key))
            .header("apikey", &self.service_key)
            .json(&body)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(StorageError::RateLimited);
        }

        if status == 401 || status == 403 {
            return Err(StorageError::AuthenticationFailed(
                "storage backend rejected the service key".into(),
            ));
        }

        if status == 404 {
            return Err(StorageError::NotFound(format!(
                "{}/{prefix}",
                self.bucket
            )));
        }

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Storage listing returned error");
            return Err(StorageError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let entries: Vec<ApiObject> = response
            .json()
            .await
            .map_err(|e| StorageError::InvalidResponse(format!("Failed to parse listing: {e}")))?;

        Ok(entries.into_iter().map(ObjectInfo::from).collect())
    }

    async fn download(&self, path: &str) -> std::result::Result<Vec<u8>, StorageError> {
        debug!(bucket = %self.bucket, path, "Downloading object");

        let response = self
            .client
            .get(self.object_url(path))
            .header("Authorization", format!("Bearer {}", self.service_key))
            .header("apikey", &self.service_key)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(StorageError::RateLimited);
        }

        if status == 401 || status == 403 {
            return Err(StorageError::AuthenticationFailed(
                "storage backend rejected the service key".into(),
            ));
        }

        if status == 404 {
            return Err(StorageError::NotFound(path.to_string()));
        }

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, path, body = %error_body, "Object download returned error");
            return Err(StorageError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| StorageError::Network(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    async fn health_check(&self) -> std::result::Result<bool, StorageError> {
        let response = self
            .client
            .get(self.bucket_url())
            .header("Authorization", format!("Bearer {}", self.service_key))
            .header("apikey", &self.service_key)
            .send()
            .await
            .map_err(request_error)?;

        Ok(response.status().is_success())
    }
}

// --- Supabase Storage API types (internal) ---

#[derive(Debug, Serialize)]
struct ApiListRequest {
    prefix: String,
    limit: u32,
    offset: u32,
    #[serde(rename = "sortBy")]
    sort_by: ApiSortBy,
}

#[derive(Debug, Serialize)]
struct ApiSortBy {
    column: String,
    order: String,
}

/// One entry from the list endpoint. Folder placeholders come back with
/// null `metadata` and `created_at`.
#[derive(Debug, Deserialize)]
struct ApiObject {
    name: String,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    metadata: Option<ApiObjectMetadata>,
}

#[derive(Debug, Deserialize)]
struct ApiObjectMetadata {
    #[serde(default)]
    size: Option<u64>,
}

impl From<ApiObject> for ObjectInfo {
    fn from(entry: ApiObject) -> Self {
        ObjectInfo {
            name: entry.name,
            size: entry.metadata.and_then(|m| m.size),
            created_at: entry.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_built_from_a_trimmed_base() {
        let store = SupabaseStore::new("https://proj.supabase.co/", "sk", "docs");
        assert_eq!(
            store.list_url(),
            "https://proj.supabase.co/storage/v1/object/list/docs"
        );
        assert_eq!(
            store.object_url("Knowledge_Base/a.txt"),
            "https://proj.supabase.co/storage/v1/object/docs/Knowledge_Base/a.txt"
        );
        assert_eq!(
            store.bucket_url(),
            "https://proj.supabase.co/storage/v1/bucket/docs"
        );
    }

    #[test]
    fn list_request_serializes_with_camel_case_sort() {
        let body = ApiListRequest {
            prefix: "Knowledge_Base".into(),
            limit: 1000,
            offset: 0,
            sort_by: ApiSortBy {
                column: "name".into(),
                order: "asc".into(),
            },
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains(r#""sortBy":{"column":"name","order":"asc"}"#));
        assert!(json.contains(r#""prefix":"Knowledge_Base""#));
    }

    #[test]
    fn parse_listing_with_files_and_folder_placeholders() {
        let data = r#"[
            {
                "name": "a.txt",
                "id": "4b7a...",
                "updated_at": "2024-05-01T12:00:00.000Z",
                "created_at": "2024-05-01T12:00:00.000Z",
                "last_accessed_at": "2024-05-01T12:00:00.000Z",
                "metadata": {"size": 17, "mimetype": "text/plain"}
            },
            {
                "name": "archive",
                "id": null,
                "updated_at": null,
                "created_at": null,
                "last_accessed_at": null,
                "metadata": null
            }
        ]"#;
        let entries: Vec<ApiObject> = serde_json::from_str(data).unwrap();
        let infos: Vec<ObjectInfo> = entries.into_iter().map(ObjectInfo::from).collect();

        assert_eq!(infos.len(), 2);
        assert_eq!(infos[0].name, "a.txt");
        assert_eq!(infos[0].size, Some(17));
        assert!(infos[0].created_at.is_some());
        assert_eq!(infos[1].name, "archive");
        assert_eq!(infos[1].size, None);
        assert!(infos[1].created_at.is_none());
    }

    #[test]
    fn store_reports_its_backend_name() {
        let store = SupabaseStore::new("https://proj.supabase.co", "sk", "docs");
        assert_eq!(store.name(), "supabase");
    }
}
