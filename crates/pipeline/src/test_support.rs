//! Shared fakes for pipeline tests: a provider that records its calls
//! and a store wrapper that fails on demand.

use async_trait::async_trait;
use groundwork_core::error::{ProviderError, StorageError};
use groundwork_core::provider::{CompletionRequest, CompletionResponse, Provider};
use groundwork_core::storage::{ObjectInfo, ObjectStore};
use groundwork_storage::MemoryStore;
use std::collections::HashSet;
use std::sync::Mutex;

/// Records every completion request and answers with a canned reply,
/// or fails every call when built with `failing()`.
pub(crate) struct RecordingProvider {
    reply: Option<String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl RecordingProvider {
    pub(crate) fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            reply: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Provider for RecordingProvider {
    fn name(&self) -> &str {
        "recording"
    }

    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<CompletionResponse, ProviderError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Some(reply) => Ok(CompletionResponse {
                content: reply.clone(),
                model: request.model,
                usage: None,
            }),
            None => Err(ProviderError::ApiError {
                status_code: 500,
                message: "canned provider failure".to_string(),
            }),
        }
    }
}

/// `MemoryStore` wrapper where chosen downloads, or the listing itself,
/// fail with a storage error.
pub(crate) struct UnreliableStore {
    inner: MemoryStore,
    poisoned: HashSet<String>,
    fail_listing: bool,
}

impl UnreliableStore {
    pub(crate) fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            poisoned: HashSet::new(),
            fail_listing: false,
        }
    }

    /// Make downloads of `path` fail with a network error.
    pub(crate) fn poison(mut self, path: impl Into<String>) -> Self {
        self.poisoned.insert(path.into());
        self
    }

    /// Make every listing fail with an API error.
    pub(crate) fn fail_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }
}

#[async_trait]
impl ObjectStore for UnreliableStore {
    fn name(&self) -> &str {
        "unreliable"
    }

    async fn list(&self, prefix: &str) -> std::result::Result<Vec<ObjectInfo>, StorageError> {
        if self.fail_listing {
            return Err(StorageError::ApiError {
                status_code: 503,
                message: "listing unavailable".to_string(),
            });
        }
        self.inner.list(prefix).await
    }

    async fn download(&self, path: &str) -> std::result::Result<Vec<u8>, StorageError> {
        if self.poisoned.contains(path) {
            return Err(StorageError::Network("connection reset".to_string()));
        }
        self.inner.download(path).await
    }
}
