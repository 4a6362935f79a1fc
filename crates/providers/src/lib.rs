//! Completion service clients for groundwork.
//!
//! All clients implement the `groundwork_core::Provider` trait.
//! `build_provider` constructs the client described by the configuration.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatProvider;

use groundwork_config::AppConfig;
use groundwork_core::error::{Error, Result};
use groundwork_core::provider::Provider;
use std::sync::Arc;

/// Build the completion client from configuration.
///
/// The API key must be present; everything else has usable defaults.
pub fn build_provider(config: &AppConfig) -> Result<Arc<dyn Provider>> {
    let api_key = config
        .completion
        .api_key
        .as_deref()
        .filter(|k| !k.is_empty())
        .ok_or_else(|| Error::Config {
            message: "completion.api_key is required (set OPENAI_API_KEY)".into(),
        })?;

    Ok(Arc::new(OpenAiCompatProvider::new(
        &config.completion.base_url,
        api_key,
    )))
}
