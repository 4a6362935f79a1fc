//! Configuration loading and validation for groundwork.
//!
//! Loads configuration from `groundwork.toml` (or `GROUNDWORK_CONFIG`) with
//! environment variable overrides. Validates all settings at startup.
//!
//! Presence of credentials is deliberately not validated here: the storage
//! and provider factories report missing keys when they are actually needed,
//! so read-only commands keep working without any secrets configured.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `groundwork.toml`. Every field has a default, so an
/// absent file (or a partial one) is always usable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Object storage backend settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Corpus layout inside the storage bucket
    #[serde(default)]
    pub corpus: CorpusConfig,

    /// Completion service settings
    #[serde(default)]
    pub completion: CompletionConfig,

    /// Retrieval and context budgets
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Which backend to use: "supabase" or "local"
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Base URL of the storage service (supabase backend)
    #[serde(default)]
    pub url: String,

    /// Service key used as the bearer token (supabase backend)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_key: Option<String>,

    /// Bucket holding the corpus (supabase backend)
    #[serde(default)]
    pub bucket: String,

    /// Directory root (local backend)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_root: Option<String>,
}

fn default_backend() -> String {
    "supabase".into()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            url: String::new(),
            service_key: None,
            bucket: String::new(),
            local_root: None,
        }
    }
}

impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("backend", &self.backend)
            .field("url", &self.url)
            .field("service_key", &redact(&self.service_key))
            .field("bucket", &self.bucket)
            .field("local_root", &self.local_root)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Path of the instructions file inside the bucket
    #[serde(default = "default_instructions_path")]
    pub instructions_path: String,

    /// Folder holding the knowledge-base documents
    #[serde(default = "default_knowledge_dir")]
    pub knowledge_dir: String,

    /// How many documents to download/extract concurrently
    #[serde(default = "default_download_concurrency")]
    pub download_concurrency: usize,
}

fn default_instructions_path() -> String {
    "Instructions/instructions.txt".into()
}
fn default_knowledge_dir() -> String {
    "Knowledge_Base".into()
}
fn default_download_concurrency() -> usize {
    4
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            instructions_path: default_instructions_path(),
            knowledge_dir: default_knowledge_dir(),
            download_concurrency: default_download_concurrency(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// API key for the completion service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible endpoint
    #[serde(default = "default_completion_url")]
    pub base_url: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens per reply (provider default when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

fn default_completion_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_model() -> String {
    "gpt-4o-mini".into()
}
fn default_temperature() -> f32 {
    0.2
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_completion_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: None,
        }
    }
}

impl std::fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("api_key", &redact(&self.api_key))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// How many documents the scorer selects
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Per-document character cap before assembly
    #[serde(default = "default_doc_char_limit")]
    pub doc_char_limit: usize,

    /// Hard cap on the assembled context, applied last
    #[serde(default = "default_context_char_limit")]
    pub context_char_limit: usize,
}

fn default_top_k() -> usize {
    3
}
fn default_doc_char_limit() -> usize {
    4000
}
fn default_context_char_limit() -> usize {
    12000
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            doc_char_limit: default_doc_char_limit(),
            context_char_limit: default_context_char_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    8080
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path.
    ///
    /// The path is `$GROUNDWORK_CONFIG` when set, `./groundwork.toml`
    /// otherwise. A missing file yields defaults. Environment overrides are
    /// applied after the file:
    /// - `GROUNDWORK_STORAGE_URL` / `SUPABASE_URL`
    /// - `GROUNDWORK_SERVICE_KEY` / `SUPABASE_SERVICE_ROLE_KEY`
    /// - `GROUNDWORK_BUCKET`
    /// - `GROUNDWORK_API_KEY` / `OPENAI_API_KEY`
    /// - `GROUNDWORK_MODEL`
    /// - `GROUNDWORK_KNOWLEDGE_DIR`, `GROUNDWORK_INSTRUCTIONS_PATH`
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("GROUNDWORK_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("groundwork.toml"));
        let mut config = Self::load_from(&path)?;
        config.apply_env_from(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides through a lookup function.
    ///
    /// Taking the lookup as a parameter keeps this testable without touching
    /// the process environment.
    pub fn apply_env_from(&mut self, get: impl Fn(&str) -> Option<String>) {
        if self.storage.url.is_empty() {
            if let Some(url) = get("GROUNDWORK_STORAGE_URL").or_else(|| get("SUPABASE_URL")) {
                self.storage.url = url;
            }
        }
        if self.storage.service_key.is_none() {
            self.storage.service_key =
                get("GROUNDWORK_SERVICE_KEY").or_else(|| get("SUPABASE_SERVICE_ROLE_KEY"));
        }
        if self.storage.bucket.is_empty() {
            if let Some(bucket) = get("GROUNDWORK_BUCKET") {
                self.storage.bucket = bucket;
            }
        }
        if self.completion.api_key.is_none() {
            self.completion.api_key =
                get("GROUNDWORK_API_KEY").or_else(|| get("OPENAI_API_KEY"));
        }
        if let Some(model) = get("GROUNDWORK_MODEL") {
            self.completion.model = model;
        }
        if let Some(dir) = get("GROUNDWORK_KNOWLEDGE_DIR") {
            self.corpus.knowledge_dir = dir;
        }
        if let Some(path) = get("GROUNDWORK_INSTRUCTIONS_PATH") {
            self.corpus.instructions_path = path;
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.backend != "supabase" && self.storage.backend != "local" {
            return Err(ConfigError::ValidationError(format!(
                "storage.backend must be \"supabase\" or \"local\", got \"{}\"",
                self.storage.backend
            )));
        }

        if self.completion.temperature < 0.0 || self.completion.temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "completion.temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.retrieval.top_k == 0 {
            return Err(ConfigError::ValidationError(
                "retrieval.top_k must be at least 1".into(),
            ));
        }

        if self.retrieval.doc_char_limit == 0 || self.retrieval.context_char_limit == 0 {
            return Err(ConfigError::ValidationError(
                "retrieval character limits must be at least 1".into(),
            ));
        }

        if self.corpus.download_concurrency == 0 {
            return Err(ConfigError::ValidationError(
                "corpus.download_concurrency must be at least 1".into(),
            ));
        }

        Ok(())
    }

    /// Generate a default config TOML string (for `init`).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
