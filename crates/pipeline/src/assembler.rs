//! Context assembly: ranked documents rendered into one bounded string.
//!
//! Two separate budgets apply, both in characters. Each document's text
//! is cut to the per-document cap first; the rendered sections are then
//! joined and the whole block cut to the total cap. Applying the total
//! cap last bounds the worst case no matter how many documents were
//! selected. Cuts are hard cutoffs with no word-boundary awareness.

use groundwork_core::document::ScoredDocument;

pub struct ContextAssembler {
    doc_char_limit: usize,
    context_char_limit: usize,
}

impl ContextAssembler {
    pub fn new(doc_char_limit: usize, context_char_limit: usize) -> Self {
        Self {
            doc_char_limit,
            context_char_limit,
        }
    }

    /// Render the selected documents as a single context block.
    ///
    /// Each document becomes a `---` header section with its name and
    /// truncated text; sections are separated by a blank line. An empty
    /// selection yields an empty string.
    pub fn assemble(&self, documents: &[ScoredDocument]) -> String {
        let sections: Vec<String> = documents
            .iter()
            .map(|scored| {
                format!(
                    "---\n{}\n{}",
                    scored.document.name,
                    truncate_chars(&scored.document.text, self.doc_char_limit)
                )
            })
            .collect();

        let joined = sections.join("\n\n");
        truncate_chars(&joined, self.context_char_limit).to_string()
    }
}

/// The longest prefix of `text` holding at most `limit` characters.
///
/// Counts characters, not bytes, and never splits inside a code point.
fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((boundary, _)) => &text[..boundary],
        None => text,
    }
}
