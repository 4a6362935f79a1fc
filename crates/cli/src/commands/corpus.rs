//! `groundwork corpus` — Inspect the extracted corpus.
//!
//! Without a query, lists every extracted document. With one, shows the
//! derived keywords and the ranked selection the pipeline would ground
//! an answer in. Needs storage access but no completion credentials.

use groundwork_core::extension_of;
use groundwork_pipeline::{CorpusLoader, scorer};
use std::path::PathBuf;
use std::sync::Arc;

pub async fn run(
    config_path: Option<PathBuf>,
    query: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path.as_deref())?;

    let store = groundwork_storage::build_store(&config)?;
    let registry = Arc::new(groundwork_extract::default_registry());
    let loader = CorpusLoader::new(
        store,
        Arc::clone(&registry),
        config.corpus.knowledge_dir.clone(),
        config.corpus.download_concurrency,
    );

    let corpus = loader.load().await?;
    println!("Corpus: {} documents", corpus.len());
    println!();
    for doc in &corpus {
        let extractor = extension_of(&doc.name)
            .and_then(|ext| registry.get(&ext))
            .map(|e| e.name().to_string())
            .unwrap_or_default();
        println!(
            "  {:<42} {:<12} {:>9} chars",
            doc.name,
            extractor,
            doc.text.chars().count()
        );
    }

    if let Some(query) = query {
        let keywords = scorer::keywords(&query);
        println!();
        println!("Query:    {query}");
        println!("Keywords: {}", keywords.join(", "));
        println!();

        let ranked = scorer::rank(corpus, &query, config.retrieval.top_k);
        println!("Selected (top {}):", config.retrieval.top_k);
        for (i, scored) in ranked.iter().enumerate() {
            println!(
                "  {}. {:<40} score {}",
                i + 1,
                scored.document.name,
                scored.score
            );
        }
    }

    Ok(())
}
