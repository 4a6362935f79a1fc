//! Error types for the groundwork domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum; the pipeline-level
//! distinction between hard and soft failures lives in the callers.

use thiserror::Error;

/// The top-level error type for all groundwork operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Configuration errors (hard, abort before any corpus work) ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Corpus listing errors (hard, abort the request) ---
    #[error("Corpus listing failed: {0}")]
    CorpusListing(#[source] StorageError),

    // --- Completion service errors (surfaced as-is, never retried) ---
    #[error("Completion error: {0}")]
    Completion(#[from] ProviderError),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Rate limited by storage backend")]
    RateLimited,

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// A single document's extraction failure. Always a soft failure at the
/// corpus boundary: logged and skipped, never escalated.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("No extractor registered for extension: {0}")]
    Unsupported(String),

    #[error("Parse failed: {0}")]
    Parse(String),

    #[error("Archive read failed: {0}")]
    Archive(String),

    #[error("Extraction task failed: {0}")]
    TaskFailed(String),
}

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Provider returned no completion choices")]
    EmptyResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_displays_correctly() {
        let err = Error::Config {
            message: "instructions file missing: Instructions/instructions.txt".into(),
        };
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("instructions.txt"));
    }

    #[test]
    fn corpus_listing_error_displays_correctly() {
        let err = Error::CorpusListing(StorageError::ApiError {
            status_code: 503,
            message: "Service unavailable".into(),
        });
        assert!(err.to_string().contains("Corpus listing failed"));
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn provider_error_converts_into_completion() {
        let err: Error = ProviderError::RateLimited { retry_after_secs: 30 }.into();
        assert!(matches!(err, Error::Completion(_)));
        assert!(err.to_string().contains("30"));
    }

    #[test]
    fn extract_error_displays_extension() {
        let err = ExtractError::Unsupported("exe".into());
        assert!(err.to_string().contains("exe"));
    }
}
