//! `groundwork config` — Show the effective configuration.

use groundwork_config::AppConfig;
use std::path::PathBuf;

pub async fn run(config_path: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path.as_deref())?;

    println!("{}", redacted_toml(&config)?);

    let mut warnings = Vec::new();
    if config.completion.api_key.is_none() {
        warnings.push("No completion API key set (set OPENAI_API_KEY)");
    }
    if config.storage.backend == "supabase" && config.storage.url.is_empty() {
        warnings.push("Supabase backend selected but storage.url is empty (set SUPABASE_URL)");
    }
    if config.storage.backend == "local" && config.storage.local_root.is_none() {
        warnings.push("Local backend selected but storage.local_root is not set");
    }

    for w in &warnings {
        println!("  warning: {w}");
    }

    Ok(())
}

/// The config as TOML with secrets blanked out.
fn redacted_toml(config: &AppConfig) -> Result<String, toml::ser::Error> {
    let mut display = config.clone();
    if display.storage.service_key.is_some() {
        display.storage.service_key = Some("[REDACTED]".into());
    }
    if display.completion.api_key.is_some() {
        display.completion.api_key = Some("[REDACTED]".into());
    }
    toml::to_string_pretty(&display)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printed_config_never_contains_secrets() {
        let mut config = AppConfig::default();
        config.storage.service_key = Some("sbp_secret".into());
        config.completion.api_key = Some("sk-secret".into());

        let toml_str = redacted_toml(&config).unwrap();
        assert!(!toml_str.contains("sbp_secret"));
        assert!(!toml_str.contains("sk-secret"));
        assert!(toml_str.contains("[REDACTED]"));
    }
}
