//! Corpus loading: list, download, extract.
//!
//! Listing the knowledge folder is all-or-nothing; a listing failure
//! aborts the whole request. Individual documents fail softly: a bad
//! download or extraction drops that entry with a warning and the rest
//! of the corpus goes through.
//!
//! Downloads and extractions fan out with a bounded number in flight
//! and re-sequence into listing order at the join, so the scorer's
//! stable tie-breaking sees the same order on every run no matter how
//! the downloads interleave.

use futures::StreamExt;
use groundwork_core::document::{ExtractedDocument, RawDocument};
use groundwork_core::error::{Error, ExtractError, Result, StorageError};
use groundwork_core::extract::{ExtractorRegistry, extension_of};
use groundwork_core::storage::ObjectStore;
use std::sync::Arc;
use thiserror::Error as ThisError;
use tracing::{debug, info, warn};

/// Why one corpus entry was dropped. Never escalates past a warning.
#[derive(Debug, ThisError)]
enum DocumentFailure {
    #[error("download failed: {0}")]
    Download(#[from] StorageError),

    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),
}

pub struct CorpusLoader {
    store: Arc<dyn ObjectStore>,
    registry: Arc<ExtractorRegistry>,
    knowledge_dir: String,
    concurrency: usize,
}

impl CorpusLoader {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        registry: Arc<ExtractorRegistry>,
        knowledge_dir: impl Into<String>,
        concurrency: usize,
    ) -> Self {
        Self {
            store,
            registry,
            knowledge_dir: knowledge_dir.into().trim_end_matches('/').to_string(),
            concurrency: concurrency.max(1),
        }
    }

    /// Load every supported, non-empty document under the knowledge folder.
    ///
    /// The returned order is the storage listing's order.
    pub async fn load(&self) -> Result<Vec<ExtractedDocument>> {
        let entries = self
            .store
            .list(&self.knowledge_dir)
            .await
            .map_err(Error::CorpusListing)?;

        let total = entries.len();

        // Entries without a registered extractor drop out here; the
        // listing order of the survivors is what re-sequencing restores.
        let supported: Vec<(String, String)> = entries
            .into_iter()
            .filter_map(|entry| {
                extension_of(&entry.name)
                    .filter(|ext| self.registry.supports(ext))
                    .map(|ext| (entry.name, ext))
            })
            .collect();

        info!(
            listed = total,
            supported = supported.len(),
            folder = %self.knowledge_dir,
            "Corpus listing complete"
        );

        let mut outcomes: Vec<(usize, String, std::result::Result<String, DocumentFailure>)> =
            futures::stream::iter(supported.into_iter().enumerate().map(|(index, (name, ext))| {
                let store = Arc::clone(&self.store);
                let registry = Arc::clone(&self.registry);
                let path = self.object_path(&name);
                async move {
                    let outcome = fetch_and_extract(&*store, &registry, &path, &name, &ext).await;
                    (index, name, outcome)
                }
            }))
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        // Join barrier: back into listing order before anyone scores.
        outcomes.sort_by_key(|(index, _, _)| *index);

        let mut documents = Vec::with_capacity(outcomes.len());
        for (_, name, outcome) in outcomes {
            match outcome {
                Ok(text) if !text.is_empty() => {
                    documents.push(ExtractedDocument::new(name, text));
                }
                Ok(_) => {
                    debug!(document = %name, "Skipping document with empty extraction");
                }
                Err(e) => {
                    warn!(document = %name, error = %e, "Skipping document");
                }
            }
        }

        Ok(documents)
    }

    fn object_path(&self, name: &str) -> String {
        if self.knowledge_dir.is_empty() {
            name.to_string()
        } else {
            format!("{}/{name}", self.knowledge_dir)
        }
    }
}

async fn fetch_and_extract(
    store: &dyn ObjectStore,
    registry: &ExtractorRegistry,
    path: &str,
    name: &str,
    extension: &str,
) -> std::result::Result<String, DocumentFailure> {
    let bytes = store.download(path).await?;
    let raw = RawDocument::new(name, bytes);
    let text = registry.extract(extension, &raw.bytes).await?;
    Ok(text)
}
