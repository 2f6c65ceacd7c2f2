//! Configuration schema for snapcache
//!
//! Configuration is stored at `~/.config/snapcache/config.toml`

use crate::config::target::DEFAULT_ARTIFACT_NAME;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// GitHub REST API version sent with every catalog request
pub const DEFAULT_API_VERSION: &str = "2022-11-28";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Remote artifact catalog settings
    pub catalog: CatalogSettings,

    /// Local cache settings
    pub cache: CacheSettings,
}

/// Remote artifact catalog settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Base URL of the REST API
    pub api_url: String,

    /// Value of the `X-GitHub-Api-Version` header
    pub api_version: String,

    /// User agent sent with catalog and download requests
    pub user_agent: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            user_agent: format!("snapcache/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Local cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Root directory; each target extracts into
    /// `<directory>/<owner>/<repository>/<artifact_name>`
    pub directory: PathBuf,

    /// Artifact name used when none is given on the command line
    pub artifact_name: String,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            directory: default_cache_root(),
            artifact_name: DEFAULT_ARTIFACT_NAME.to_string(),
        }
    }
}

/// Default cache root (`<cache dir>/snapcache`, or `.snapcache` when the
/// platform has no cache directory)
pub fn default_cache_root() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("snapcache"))
        .unwrap_or_else(|| PathBuf::from(".snapcache"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_serialize() {
        let settings = Settings::default();
        let toml = toml::to_string_pretty(&settings).unwrap();
        assert!(toml.contains("[catalog]"));
        assert!(toml.contains("[cache]"));
    }

    #[test]
    fn settings_deserialize_empty() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings.catalog.api_url, "https://api.github.com");
        assert_eq!(settings.cache.artifact_name, DEFAULT_ARTIFACT_NAME);
    }

    #[test]
    fn settings_deserialize_partial() {
        let toml = r#"
            [catalog]
            api_url = "https://ghe.example.com/api/v3"
        "#;
        let settings: Settings = toml::from_str(toml).unwrap();
        assert_eq!(settings.catalog.api_url, "https://ghe.example.com/api/v3");
        assert_eq!(settings.catalog.api_version, DEFAULT_API_VERSION); // default preserved
    }

    #[test]
    fn default_cache_root_is_snapcache() {
        let root = default_cache_root();
        assert!(root.ends_with("snapcache") || root.ends_with(".snapcache"));
    }
}
