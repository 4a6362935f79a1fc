//! Object store backends for groundwork.
//!
//! All backends implement the `groundwork_core::ObjectStore` trait.
//! `build_store` selects the backend named in the configuration.

pub mod local;
pub mod memory;
pub mod supabase;

pub use local::LocalStore;
pub use memory::MemoryStore;
pub use supabase::SupabaseStore;

use groundwork_config::AppConfig;
use groundwork_core::error::{Error, Result};
use groundwork_core::storage::ObjectStore;
use std::sync::Arc;

/// Build the object store named by `config.storage.backend`.
///
/// Credentials are checked here, not during config validation, so that
/// commands which never touch storage keep working without them.
pub fn build_store(config: &AppConfig) -> Result<Arc<dyn ObjectStore>> {
    match config.storage.backend.as_str() {
        "supabase" => {
            let url = require(&config.storage.url, "storage.url", "SUPABASE_URL")?;
            let key = require(
                config.storage.service_key.as_deref().unwrap_or_default(),
                "storage.service_key",
                "SUPABASE_SERVICE_ROLE_KEY",
            )?;
            let bucket = require(&config.storage.bucket, "storage.bucket", "GROUNDWORK_BUCKET")?;
            Ok(Arc::new(SupabaseStore::new(url, key, bucket)))
        }
        "local" => {
            let root = config
                .storage
                .local_root
                .as_deref()
                .filter(|r| !r.is_empty())
                .ok_or_else(|| Error::Config {
                    message: "storage.local_root is required for the local backend".into(),
                })?;
            Ok(Arc::new(LocalStore::new(root)))
        }
        other => Err(Error::Config {
            message: format!("unknown storage backend: {other}"),
        }),
    }
}

fn require<'a>(value: &'a str, field: &str, env_var: &str) -> Result<&'a str> {
    if value.is_empty() {
        return Err(Error::Config {
            message: format!("{field} is required for the supabase backend (set {env_var})"),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supabase_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.storage.url = "https://proj.supabase.co".into();
        config.storage.service_key = Some("sbp_secret".into());
        config.storage.bucket = "docs".into();
        config
    }

    #[test]
    fn builds_a_supabase_store_when_fully_configured() {
        let store = build_store(&supabase_config()).unwrap();
        assert_eq!(store.name(), "supabase");
    }

    #[test]
    fn missing_supabase_credentials_are_config_errors() {
        let mut config = supabase_config();
        config.storage.service_key = None;
        let err = build_store(&config).err().unwrap();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("SUPABASE_SERVICE_ROLE_KEY"));

        let mut config = supabase_config();
        config.storage.url.clear();
        let err = build_store(&config).err().unwrap();
        assert!(err.to_string().contains("storage.url"));
    }

    #[test]
    fn builds_a_local_store_with_a_root() {
        let mut config = AppConfig::default();
        config.storage.backend = "local".into();
        config.storage.local_root = Some("/tmp/corpus".into());
        let store = build_store(&config).unwrap();
        assert_eq!(store.name(), "local");
    }

    #[test]
    fn local_backend_without_a_root_is_a_config_error() {
        let mut config = AppConfig::default();
        config.storage.backend = "local".into();
        let err = build_store(&config).err().unwrap();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn unknown_backends_are_rejected() {
        let mut config = AppConfig::default();
        config.storage.backend = "s3".into();
        let err = build_store(&config).err().unwrap();
        assert!(err.to_string().contains("s3"));
    }
}
