//! Command implementations plus the setup shared between them.

use groundwork_config::AppConfig;
use groundwork_pipeline::Pipeline;
use std::path::Path;
use std::sync::Arc;

pub mod ask;
pub mod config_cmd;
pub mod corpus;
pub mod serve;

/// Load configuration, honoring a `--config` override.
///
/// An explicit path still gets environment overrides applied, same as
/// the default lookup.
pub(crate) fn load_config(path: Option<&Path>) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => {
            let mut config = AppConfig::load_from(path)
                .map_err(|e| format!("Failed to load config: {e}"))?;
            config.apply_env_from(|key| std::env::var(key).ok());
            config
        }
        None => AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?,
    };
    Ok(config)
}

/// Build the full pipeline: store, provider, and extractor registry.
pub(crate) fn build_pipeline(config: &AppConfig) -> Result<Pipeline, Box<dyn std::error::Error>> {
    let store = groundwork_storage::build_store(config)?;
    let provider = groundwork_providers::build_provider(config)?;
    let registry = Arc::new(groundwork_extract::default_registry());
    Ok(Pipeline::new(store, provider, registry, config))
}
