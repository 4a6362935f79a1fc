//! `groundwork ask` — Answer one question grounded in the corpus.

use std::path::PathBuf;

pub async fn run(
    config_path: Option<PathBuf>,
    query: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path.as_deref())?;
    let pipeline = super::build_pipeline(&config)?;

    let reply = pipeline.answer(&query).await?;
    println!("{reply}");

    Ok(())
}
