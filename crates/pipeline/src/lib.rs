//! # Groundwork Pipeline
//!
//! The grounded-answer flow: list the knowledge folder, download and
//! extract every supported document, rank the corpus against the query,
//! assemble a capped context block, and request one completion.
//!
//! Hard failures (configuration, corpus listing) abort the request.
//! A single document failing to download or parse only drops that
//! document. Completion errors are surfaced as-is and never retried.

use groundwork_config::AppConfig;
use groundwork_core::document::ExtractedDocument;
use groundwork_core::error::{Error, Result};
use groundwork_core::extract::ExtractorRegistry;
use groundwork_core::provider::{CompletionRequest, Provider};
use groundwork_core::storage::ObjectStore;
use std::sync::Arc;
use tracing::{debug, info};

pub mod assembler;
pub mod corpus;
pub mod prompt;
pub mod scorer;

#[cfg(test)]
pub(crate) mod test_support;

pub use assembler::ContextAssembler;
pub use corpus::CorpusLoader;

/// The grounded-answer pipeline.
///
/// One instance is shared across requests; every call re-reads the
/// corpus, so edits to the bucket show up without a restart.
pub struct Pipeline {
    /// Storage holding the instructions file and the knowledge folder.
    store: Arc<dyn ObjectStore>,
    /// Completion backend.
    provider: Arc<dyn Provider>,
    /// Lists, downloads, and extracts the corpus.
    loader: CorpusLoader,
    /// Applies the per-document and total context caps.
    assembler: ContextAssembler,
    /// Path of the operator instructions inside the store.
    instructions_path: String,
    /// Model identifier sent with every completion request.
    model: String,
    /// Sampling temperature.
    temperature: f32,
    /// Reply-length cap (provider default when absent).
    max_tokens: Option<u32>,
    /// How many documents the scorer keeps.
    top_k: usize,
}

impl Pipeline {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        provider: Arc<dyn Provider>,
        registry: Arc<ExtractorRegistry>,
        config: &AppConfig,
    ) -> Self {
        let loader = CorpusLoader::new(
            Arc::clone(&store),
            registry,
            config.corpus.knowledge_dir.clone(),
            config.corpus.download_concurrency,
        );
        Self {
            store,
            provider,
            loader,
            assembler: ContextAssembler::new(
                config.retrieval.doc_char_limit,
                config.retrieval.context_char_limit,
            ),
            instructions_path: config.corpus.instructions_path.clone(),
            model: config.completion.model.clone(),
            temperature: config.completion.temperature,
            max_tokens: config.completion.max_tokens,
            top_k: config.retrieval.top_k,
        }
    }

    /// Answer one query grounded in the knowledge folder.
    ///
    /// Returns the reply text, or the first hard error. Never both.
    pub async fn answer(&self, query: &str) -> Result<String> {
        info!(model = %self.model, "Answering query");

        // ── Step 1: Load operator instructions ──
        let instructions = self.load_instructions().await?;

        // ── Step 2: Load and extract the corpus ──
        let corpus = self.loader.load().await?;
        debug!(documents = corpus.len(), "Corpus extracted");

        // ── Step 3: Rank documents against the query ──
        let ranked = scorer::rank(corpus, query, self.top_k);

        // ── Step 4: Assemble the context block ──
        let context = self.assembler.assemble(&ranked);
        debug!(
            selected = ranked.len(),
            context_chars = context.chars().count(),
            "Context assembled"
        );

        // ── Step 5: Generate the grounded reply ──
        let payload = prompt::build(&instructions, &context, query);
        let request = CompletionRequest {
            model: self.model.clone(),
            messages: payload.messages(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };
        let response = self.provider.complete(request).await?;

        info!(
            selected = ranked.len(),
            reply_chars = response.content.chars().count(),
            "Reply generated"
        );
        Ok(response.content)
    }

    /// Load and extract the corpus without generating a reply.
    pub async fn load_corpus(&self) -> Result<Vec<ExtractedDocument>> {
        self.loader.load().await
    }

    async fn load_instructions(&self) -> Result<String> {
        let bytes = self
            .store
            .download(&self.instructions_path)
            .await
            .map_err(|e| Error::Config {
                message: format!(
                    "instructions file missing: {} ({e})",
                    self.instructions_path
                ),
            })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
