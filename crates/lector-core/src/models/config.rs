//! Configuration structures for the lector pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{LectorError, Result};

/// Main configuration for the lector tools.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LectorConfig {
    /// Detail-extraction configuration.
    pub extraction: ExtractionConfig,

    /// Letter-rendering configuration.
    pub render: RenderConfig,

    /// Remote document-store configuration.
    pub store: StoreConfig,
}

/// Detail-extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Placeholder used for fields missing from the source document.
    pub placeholder: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            placeholder: crate::models::summary::PLACEHOLDER.to_string(),
        }
    }
}

/// Letter-rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Directory with the TTF font family used for PDF output.
    pub fonts_dir: PathBuf,

    /// Directory where generated letters are written.
    pub output_dir: PathBuf,

    /// Optional JSON file overriding the built-in letter template.
    pub template_path: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fonts_dir: PathBuf::from("fonts"),
            output_dir: PathBuf::from("."),
            template_path: None,
        }
    }
}

/// Remote document-store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Base URL of the per-collection document API.
    pub base_url: String,

    /// Base URL of the path-addressed object storage.
    pub storage_url: String,

    /// URL of the auxiliary `generate-docx` endpoint.
    pub docgen_url: String,

    /// Optional bearer token sent with every request.
    pub api_key: Option<String>,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            storage_url: "http://localhost:8080/storage".to_string(),
            docgen_url: "http://localhost:8080/generate-docx".to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

impl LectorConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| LectorError::Config(e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| LectorError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LectorConfig::default();
        assert_eq!(config.extraction.placeholder, "N/A");
        assert_eq!(config.store.timeout_secs, 30);
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = LectorConfig::default();
        config.store.base_url = "https://store.example.com".to_string();
        config.save(&path).unwrap();

        let loaded = LectorConfig::from_file(&path).unwrap();
        assert_eq!(loaded.store.base_url, "https://store.example.com");
    }

    #[test]
    fn test_invalid_json_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            LectorConfig::from_file(&path),
            Err(LectorError::Config(_))
        ));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");

        assert!(matches!(
            LectorConfig::from_file(&path),
            Err(LectorError::Io(_))
        ));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let partial: LectorConfig =
            serde_json::from_str(r#"{ "render": { "fonts_dir": "/usr/share/fonts" } }"#).unwrap();
        assert_eq!(partial.render.fonts_dir, PathBuf::from("/usr/share/fonts"));
        assert_eq!(partial.extraction.placeholder, "N/A");
    }
}
