use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::SeriesConfig;

/// The name of the site configuration file, relative to the site root.
pub const CONFIG_FILE_NAME: &str = "site.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    pub base_url: String,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub series: SeriesConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            title: None,
            series: SeriesConfig::default(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config '{path}': {source}")]
    Invalid {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl SiteConfig {
    /// Loads `site.toml` from the given site root, falling back to the
    /// defaults when the file does not exist.
    pub fn load(root_path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = root_path.as_ref().join(CONFIG_FILE_NAME);

        if !path.exists() {
            debug!(?path, "config file not found, using defaults");
            return Ok(Self::default());
        }

        Self::from_path(&path)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Invalid {
            path: path.to_owned(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_config() {
        let config: SiteConfig = toml::from_str(indoc! {r#"
            base_url = "https://example.com"
            title = "Notes"

            [series]
            rewrite_slug = "sequence"
        "#})
        .unwrap();

        assert_eq!(config.base_url, "https://example.com");
        assert_eq!(config.title.as_deref(), Some("Notes"));
        assert_eq!(config.series.rewrite_slug, "sequence");
        assert_eq!(config.series.stylesheet, "post-series/css/style.css");
    }

    #[test]
    fn test_load_missing_config() {
        let root = tempfile::tempdir().unwrap();

        let config = SiteConfig::load(root.path()).unwrap();

        assert_eq!(config.base_url, "http://127.0.0.1:3000");
        assert_eq!(config.series.rewrite_slug, "series");
    }

    #[test]
    fn test_load_invalid_config() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join(CONFIG_FILE_NAME), "base_url = 42").unwrap();

        let err = SiteConfig::load(root.path()).unwrap_err();

        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
