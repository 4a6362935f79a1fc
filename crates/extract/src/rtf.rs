//! RTF documents stripped down to their visible text.
//!
//! Good enough for grounding context: control words and group braces are
//! removed with regular expressions rather than a full RTF parse, so
//! exotic constructs (embedded objects, hex escapes) may leave residue.

use groundwork_core::error::ExtractError;
use groundwork_core::extract::Extractor;
use regex::Regex;
use std::sync::LazyLock;

static CONTROL_WORDS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\[a-z]+\d* ?").unwrap());
static GROUP_BRACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[{}]").unwrap());
static BLANK_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n+").unwrap());

pub struct RtfExtractor;

#[async_trait::async_trait]
impl Extractor for RtfExtractor {
    fn name(&self) -> &str {
        "rtf"
    }

    fn extensions(&self) -> &[&str] {
        &["rtf"]
    }

    async fn extract(
        &self,
        bytes: &[u8],
        _extension: &str,
    ) -> std::result::Result<String, ExtractError> {
        Ok(strip_markup(&String::from_utf8_lossy(bytes)))
    }
}

fn strip_markup(raw: &str) -> String {
    let without_controls = CONTROL_WORDS.replace_all(raw, "");
    let without_braces = GROUP_BRACES.replace_all(&without_controls, "");
    BLANK_RUNS.replace_all(&without_braces, "\n").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_words_and_braces_disappear() {
        assert_eq!(
            strip_markup(r"{\rtf1\ansi\deff0 Hello World}"),
            "Hello World"
        );
    }

    #[test]
    fn control_words_eat_one_trailing_space() {
        assert_eq!(strip_markup(r"\b bold\b0 text"), "boldtext");
    }

    #[test]
    fn newline_runs_collapse() {
        assert_eq!(strip_markup("alpha\n\n\nbeta"), "alpha\nbeta");
    }

    #[tokio::test]
    async fn extract_never_fails_on_odd_bytes() {
        let text = RtfExtractor.extract(b"\xffplain", "rtf").await.unwrap();
        assert_eq!(text, "\u{fffd}plain");
    }
}
