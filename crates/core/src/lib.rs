//! # Groundwork Core
//!
//! Domain types, traits, and error definitions for the groundwork
//! grounded-context pipeline. This crate has **zero framework dependencies** —
//! it defines the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every external collaborator (object storage, completion service) and every
//! extension point (format extractors) is defined as a trait here.
//! Implementations live in their respective crates. This enables:
//! - Swapping backends via configuration
//! - Easy testing with in-memory stubs
//! - Clean dependency graph (all crates depend inward on core)

pub mod document;
pub mod error;
pub mod extract;
pub mod prompt;
pub mod provider;
pub mod storage;

// Re-export key types at crate root for ergonomics
pub use document::{ExtractedDocument, RawDocument, ScoredDocument};
pub use error::{Error, ExtractError, ProviderError, Result, StorageError};
pub use extract::{Extractor, ExtractorRegistry, extension_of};
pub use prompt::PromptPayload;
pub use provider::{ChatMessage, CompletionRequest, CompletionResponse, Provider, Role, Usage};
pub use storage::{ObjectInfo, ObjectStore};
