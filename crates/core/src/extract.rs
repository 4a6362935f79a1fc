//! Extractor trait and the extension-keyed registry.
//!
//! Extractors are what turn heterogeneous corpus bytes into scoreable plain
//! text: one strategy per document format. The registry maps a file
//! extension to the extractor that handles it — an interface table, so new
//! formats plug in without touching the corpus loader.

use crate::error::ExtractError;
use std::collections::HashMap;
use std::sync::Arc;

/// The core Extractor trait.
///
/// Each format (plain text, PDF, spreadsheets, slide decks, ...) implements
/// this trait. Extractors are registered in the [`ExtractorRegistry`] and
/// invoked by the corpus loader. An error from `extract` is always a
/// per-document soft failure at the loader boundary.
#[async_trait::async_trait]
pub trait Extractor: Send + Sync {
    /// Short name for logging (e.g., "pdf", "spreadsheet").
    fn name(&self) -> &str;

    /// Lower-case file extensions this extractor handles, without dots.
    fn extensions(&self) -> &[&str];

    /// Convert raw document bytes into plain text.
    ///
    /// `extension` is the lower-cased extension the registry dispatched on;
    /// extractors covering several formats branch on it.
    async fn extract(
        &self,
        bytes: &[u8],
        extension: &str,
    ) -> std::result::Result<String, ExtractError>;
}

/// A registry of available extractors, keyed by file extension.
///
/// The corpus loader uses this to:
/// 1. Decide whether an entry is worth downloading at all
/// 2. Dispatch downloaded bytes to the matching extractor
pub struct ExtractorRegistry {
    by_extension: HashMap<String, Arc<dyn Extractor>>,
}

impl ExtractorRegistry {
    pub fn new() -> Self {
        Self {
            by_extension: HashMap::new(),
        }
    }

    /// Register an extractor under every extension it declares.
    /// Replaces any existing registration for the same extension.
    pub fn register(&mut self, extractor: Arc<dyn Extractor>) {
        for ext in extractor.extensions() {
            self.by_extension
                .insert(ext.to_ascii_lowercase(), extractor.clone());
        }
    }

    /// Look up the extractor for an extension (case-insensitive).
    pub fn get(&self, extension: &str) -> Option<Arc<dyn Extractor>> {
        self.by_extension
            .get(&extension.to_ascii_lowercase())
            .cloned()
    }

    /// Whether any extractor is registered for this extension.
    pub fn supports(&self, extension: &str) -> bool {
        self.by_extension
            .contains_key(&extension.to_ascii_lowercase())
    }

    /// All registered extensions, sorted.
    pub fn extensions(&self) -> Vec<String> {
        let mut exts: Vec<String> = self.by_extension.keys().cloned().collect();
        exts.sort();
        exts
    }

    /// Extract `bytes` using the extractor registered for `extension`.
    pub async fn extract(
        &self,
        extension: &str,
        bytes: &[u8],
    ) -> std::result::Result<String, ExtractError> {
        let extension = extension.to_ascii_lowercase();
        let extractor = self
            .get(&extension)
            .ok_or_else(|| ExtractError::Unsupported(extension.clone()))?;
        extractor.extract(bytes, &extension).await
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// File extension of an entry name, lower-cased and without the dot.
///
/// Returns `None` for names with no usable extension: bare names, dotfiles,
/// and folder placeholders all land here and get skipped by the loader.
pub fn extension_of(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || ext.contains('/') {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct UpperExtractor;

    #[async_trait::async_trait]
    impl Extractor for UpperExtractor {
        fn name(&self) -> &str {
            "upper"
        }

        fn extensions(&self) -> &[&str] {
            &["up", "shout"]
        }

        async fn extract(
            &self,
            bytes: &[u8],
            _extension: &str,
        ) -> std::result::Result<String, ExtractError> {
            Ok(String::from_utf8_lossy(bytes).to_ascii_uppercase())
        }
    }

    #[test]
    fn register_covers_every_declared_extension() {
        let mut registry = ExtractorRegistry::new();
        registry.register(Arc::new(UpperExtractor));
        assert!(registry.supports("up"));
        assert!(registry.supports("SHOUT"));
        assert!(!registry.supports("pdf"));
        assert_eq!(registry.extensions(), vec!["shout", "up"]);
    }

    #[tokio::test]
    async fn extract_dispatches_by_extension() {
        let mut registry = ExtractorRegistry::new();
        registry.register(Arc::new(UpperExtractor));
        let text = registry.extract("UP", b"hello").await.unwrap();
        assert_eq!(text, "HELLO");
    }

    #[tokio::test]
    async fn extract_rejects_unknown_extension() {
        let registry = ExtractorRegistry::new();
        let err = registry.extract("exe", b"MZ").await.unwrap_err();
        assert!(matches!(err, ExtractError::Unsupported(ref ext) if ext == "exe"));
    }

    #[test]
    fn extension_of_handles_common_names() {
        assert_eq!(extension_of("a.txt"), Some("txt".into()));
        assert_eq!(extension_of("Deck.PPTX"), Some("pptx".into()));
        assert_eq!(extension_of("archive.tar.gz"), Some("gz".into()));
        assert_eq!(extension_of("noext"), None);
        assert_eq!(extension_of(".emptyFolderPlaceholder"), None);
        assert_eq!(extension_of("trailing."), None);
    }
}
