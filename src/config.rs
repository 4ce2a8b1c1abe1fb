//! Catalog configuration.
//!
//! Stored as TOML at `$XDG_CONFIG_HOME/discovery-catalog/config.toml`
//! (or the platform config dir). A missing file means defaults.
//!
//! # Example Configuration
//!
//! ```toml
//! data_path = "discoveries.json"
//! output_dir = "site"
//! site_title = "Discovery Registry"
//! score_policy = "clamp"
//!
//! [filters]
//! show_high = true
//! show_medium = true
//! show_low = false
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::model::ScorePolicy;
use crate::view::TierToggles;

const APP_DIR: &str = "discovery-catalog";
const CONFIG_FILE: &str = "config.toml";

/// Errors that can occur when loading or saving configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Dataset file (`discoveries.json`, a bare array, or `discoveries-data.js`).
    pub data_path: PathBuf,

    /// Where `generate` writes the static site.
    pub output_dir: PathBuf,

    /// Page title for the generated site.
    pub site_title: String,

    pub score_policy: ScorePolicy,

    /// Initial tier toggles for `query`, `render` and the generated page.
    pub filters: TierToggles,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("discoveries.json"),
            output_dir: PathBuf::from("site"),
            site_title: "Discovery Registry".to_string(),
            score_policy: ScorePolicy::default(),
            filters: TierToggles::default(),
        }
    }
}

impl CatalogConfig {
    /// Load from the default location, or defaults if nothing is there.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    /// `$XDG_CONFIG_HOME/discovery-catalog/config.toml`, falling back to the
    /// platform config dir.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return Ok(PathBuf::from(xdg_config).join(APP_DIR).join(CONFIG_FILE));
        }

        dirs::config_dir()
            .map(|p| p.join(APP_DIR).join(CONFIG_FILE))
            .ok_or(ConfigError::NoConfigDir)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site_title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site_title cannot be empty".into(),
            ));
        }

        if self.data_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation("data_path cannot be empty".into()));
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "output_dir cannot be empty".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = CatalogConfig::default();
        assert_eq!(config.data_path, PathBuf::from("discoveries.json"));
        assert_eq!(config.score_policy, ScorePolicy::Reject);
        assert!(config.filters.show_low);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = CatalogConfig::load_from(&tmp.path().join("nope.toml")).unwrap();
        assert_eq!(config, CatalogConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            "score_policy = \"clamp\"\n\n[filters]\nshow_low = false\n",
        )
        .unwrap();

        let config = CatalogConfig::load_from(&path).unwrap();
        assert_eq!(config.score_policy, ScorePolicy::Clamp);
        assert!(!config.filters.show_low);
        assert!(config.filters.show_high);
        assert_eq!(config.output_dir, PathBuf::from("site"));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "score_policy = \"sometimes\"").unwrap();
        assert!(matches!(
            CatalogConfig::load_from(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_empty_title_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "site_title = \"  \"").unwrap();
        assert!(matches!(
            CatalogConfig::load_from(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_full_file_loads_every_field() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("config.toml");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(
            &path,
            r#"data_path = "data/discoveries.json"
output_dir = "public"
site_title = "My Registry"
score_policy = "clamp"

[filters]
show_high = true
show_medium = false
show_low = true
"#,
        )
        .unwrap();

        let config = CatalogConfig::load_from(&path).unwrap();
        assert_eq!(config.data_path, PathBuf::from("data/discoveries.json"));
        assert_eq!(config.output_dir, PathBuf::from("public"));
        assert_eq!(config.site_title, "My Registry");
        assert_eq!(config.score_policy, ScorePolicy::Clamp);
        assert!(!config.filters.show_medium);
    }
}
