//! Word-processor documents: raw paragraph text only.
//!
//! Walks the docx-rs tree (Document, then Paragraph, Run, Text) and keeps
//! nothing but the words. Runs within a paragraph concatenate without a
//! separator since they are parts of the same sentence; paragraphs join
//! with a newline; empty paragraphs are dropped. Tables, styling, and
//! embedded objects are ignored.

use docx_rs::{DocumentChild, ParagraphChild, RunChild, read_docx};
use groundwork_core::error::ExtractError;
use groundwork_core::extract::Extractor;

pub struct DocxExtractor;

#[async_trait::async_trait]
impl Extractor for DocxExtractor {
    fn name(&self) -> &str {
        "docx"
    }

    fn extensions(&self) -> &[&str] {
        &["docx"]
    }

    async fn extract(
        &self,
        bytes: &[u8],
        _extension: &str,
    ) -> std::result::Result<String, ExtractError> {
        let bytes = bytes.to_vec();
        tokio::task::spawn_blocking(move || extract_paragraphs(&bytes))
            .await
            .map_err(|e| ExtractError::TaskFailed(format!("docx task join error: {e}")))?
    }
}

fn extract_paragraphs(bytes: &[u8]) -> std::result::Result<String, ExtractError> {
    let docx =
        read_docx(bytes).map_err(|e| ExtractError::Parse(format!("DOCX parse failed: {e}")))?;

    let mut paragraphs: Vec<String> = Vec::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(para) = child {
            let text = paragraph_text(para);
            if !text.trim().is_empty() {
                paragraphs.push(text);
            }
        }
    }
    Ok(paragraphs.join("\n"))
}

fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for child in &para.children {
        if let ParagraphChild::Run(run) = child {
            for rc in &run.children {
                if let RunChild::Text(t) = rc {
                    parts.push(&t.text);
                }
            }
        }
    }
    parts.join("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run};
    use std::io::Cursor;

    fn sample_docx(paragraphs: &[&str]) -> Vec<u8> {
        let mut docx = Docx::new();
        for text in paragraphs {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
        }
        let mut cursor = Cursor::new(Vec::new());
        docx.build().pack(&mut cursor).unwrap();
        cursor.into_inner()
    }

    #[tokio::test]
    async fn paragraphs_join_with_newlines() {
        let bytes = sample_docx(&["Alpha paragraph.", "Beta paragraph."]);
        let text = DocxExtractor.extract(&bytes, "docx").await.unwrap();
        assert_eq!(text, "Alpha paragraph.\nBeta paragraph.");
    }

    #[tokio::test]
    async fn empty_paragraphs_are_dropped() {
        let bytes = sample_docx(&["First.", "", "   ", "Last."]);
        let text = DocxExtractor.extract(&bytes, "docx").await.unwrap();
        assert_eq!(text, "First.\nLast.");
    }

    #[tokio::test]
    async fn garbage_bytes_are_a_parse_error() {
        let err = DocxExtractor
            .extract(b"definitely not a zip", "docx")
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Parse(_)));
    }
}
