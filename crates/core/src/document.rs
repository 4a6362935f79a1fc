//! Documents as they move through the pipeline.
//!
//! A corpus entry starts as a [`RawDocument`] (bytes fresh off storage),
//! becomes an [`ExtractedDocument`] once an extractor has reduced it to plain
//! text, and picks up a relevance score as a [`ScoredDocument`] during
//! ranking. None of these outlive a single request.

use serde::{Deserialize, Serialize};

/// A raw object fetched from storage, before extraction.
///
/// Owned transiently by the corpus loader and dropped as soon as the
/// extractor has produced text from it.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl RawDocument {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// A document reduced to plain text.
///
/// Immutable once created. `name` is unique within one corpus load (the
/// storage listing contract guarantees unique entry names per folder).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    pub name: String,
    pub text: String,
}

impl ExtractedDocument {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Character length of the extracted text (not bytes).
    pub fn chars(&self) -> usize {
        self.text.chars().count()
    }
}

/// An extracted document plus its keyword-overlap score.
///
/// Derived per query, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredDocument {
    pub document: ExtractedDocument,
    pub score: usize,
}
