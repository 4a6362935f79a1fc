//! PDF text extraction, page by page.
//!
//! Walks the page tree in document order and pulls each page's text layer.
//! A page without extractable text (scans, pure vector art) contributes an
//! empty string rather than an error.

use groundwork_core::error::ExtractError;
use groundwork_core::extract::Extractor;
use lopdf::Document;

pub struct PdfExtractor;

#[async_trait::async_trait]
impl Extractor for PdfExtractor {
    fn name(&self) -> &str {
        "pdf"
    }

    fn extensions(&self) -> &[&str] {
        &["pdf"]
    }

    async fn extract(
        &self,
        bytes: &[u8],
        _extension: &str,
    ) -> std::result::Result<String, ExtractError> {
        let bytes = bytes.to_vec();
        tokio::task::spawn_blocking(move || extract_pages(&bytes))
            .await
            .map_err(|e| ExtractError::TaskFailed(format!("pdf task join error: {e}")))?
    }
}

fn extract_pages(bytes: &[u8]) -> std::result::Result<String, ExtractError> {
    let doc = Document::load_mem(bytes)
        .map_err(|e| ExtractError::Parse(format!("PDF load failed: {e}")))?;

    let mut pages = Vec::new();
    for page_number in doc.get_pages().keys() {
        // Pages whose content cannot be decoded contribute an empty string.
        let text = doc.extract_text(&[*page_number]).unwrap_or_default();
        pages.push(text);
    }
    Ok(pages.join("\n"))
}
