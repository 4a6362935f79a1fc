//! Plain-text formats: bytes decoded as text verbatim.
//!
//! Covers `.txt`, `.md`, and `.json`. JSON passes through unchanged:
//! no re-parse, no key reordering.

use groundwork_core::error::ExtractError;
use groundwork_core::extract::Extractor;

pub struct PlainTextExtractor;

#[async_trait::async_trait]
impl Extractor for PlainTextExtractor {
    fn name(&self) -> &str {
        "plain"
    }

    fn extensions(&self) -> &[&str] {
        &["txt", "md", "json"]
    }

    async fn extract(
        &self,
        bytes: &[u8],
        _extension: &str,
    ) -> std::result::Result<String, ExtractError> {
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn utf8_passes_through_verbatim() {
        let text = PlainTextExtractor
            .extract("héllo\nwörld".as_bytes(), "txt")
            .await
            .unwrap();
        assert_eq!(text, "héllo\nwörld");
    }

    #[tokio::test]
    async fn invalid_utf8_is_decoded_lossily() {
        let text = PlainTextExtractor
            .extract(b"ok \xff ok", "txt")
            .await
            .unwrap();
        assert!(text.starts_with("ok "));
        assert!(text.contains('\u{FFFD}'));
    }

    #[tokio::test]
    async fn json_is_not_reformatted() {
        let raw = r#"{"b":1,"a":2}"#;
        let text = PlainTextExtractor
            .extract(raw.as_bytes(), "json")
            .await
            .unwrap();
        assert_eq!(text, raw);
    }
}
