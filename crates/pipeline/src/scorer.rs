//! Keyword relevance scoring.
//!
//! Scoring flags keyword presence, not frequency or position: a document
//! either contains a keyword or it does not. Ranking is fully
//! deterministic; scoring the same corpus and query twice yields the
//! same order.

use groundwork_core::document::{ExtractedDocument, ScoredDocument};

/// Extract scoring keywords from a query.
///
/// Lower-cases the query, splits on runs of non-word characters, drops
/// tokens of one or two characters, and collapses duplicates, keeping
/// first-occurrence order.
pub fn keywords(query: &str) -> Vec<String> {
    let lowered = query.to_lowercase();
    let mut keywords: Vec<String> = Vec::new();
    for token in lowered.split(|c: char| !c.is_alphanumeric() && c != '_') {
        if token.chars().count() <= 2 {
            continue;
        }
        if !keywords.iter().any(|k| k == token) {
            keywords.push(token.to_string());
        }
    }
    keywords
}

/// Rank documents by how many distinct keywords their text contains.
///
/// Each keyword counts at most once per document, however often it
/// occurs. The sort is stable, so equal scores keep their corpus order;
/// the first `k` survivors are returned.
pub fn rank(documents: Vec<ExtractedDocument>, query: &str, k: usize) -> Vec<ScoredDocument> {
    let keywords = keywords(query);

    let mut scored: Vec<ScoredDocument> = documents
        .into_iter()
        .map(|document| {
            let text = document.text.to_lowercase();
            let score = keywords
                .iter()
                .filter(|keyword| text.contains(keyword.as_str()))
                .count();
            ScoredDocument { document, score }
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(k);
    scored
}
