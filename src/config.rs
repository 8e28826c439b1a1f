use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants;
use crate::utils;

/// Application configuration loaded from docsift.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub ocr: OcrConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

/// Paths of the external executables wrapped by the extractor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    #[serde(default = "default_tesseract")]
    pub tesseract: String,
    #[serde(default = "default_pdftoppm")]
    pub pdftoppm: String,
    #[serde(default = "default_antiword")]
    pub antiword: String,
}

fn default_tesseract() -> String {
    "tesseract".to_string()
}

fn default_pdftoppm() -> String {
    "pdftoppm".to_string()
}

// antiword has no standard install location; these are the conventional
// drop-in paths per platform.
#[cfg(windows)]
fn default_antiword() -> String {
    "C:/antiword/antiword.exe".to_string()
}

#[cfg(not(windows))]
fn default_antiword() -> String {
    "~/antiword/antiword".to_string()
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            tesseract: default_tesseract(),
            pdftoppm: default_pdftoppm(),
            antiword: default_antiword(),
        }
    }
}

impl ToolsConfig {
    pub fn tesseract_path(&self) -> PathBuf {
        utils::expand_path(&self.tesseract)
    }

    pub fn pdftoppm_path(&self) -> PathBuf {
        utils::expand_path(&self.pdftoppm)
    }

    pub fn antiword_path(&self) -> PathBuf {
        utils::expand_path(&self.antiword)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    /// Rasterization resolution for PDF pages
    #[serde(default = "default_dpi")]
    pub dpi: u32,
    /// Tesseract language code (e.g. "fra"); tesseract's default when unset
    #[serde(default)]
    pub lang: Option<String>,
}

fn default_dpi() -> u32 {
    constants::DEFAULT_OCR_DPI
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            dpi: default_dpi(),
            lang: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Extension filter for directory walks; empty disables filtering
    #[serde(default = "default_filetypes")]
    pub filetypes: Vec<String>,
    /// Allowed languages (ISO 639-3) for the gibberish gate; empty disables
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    /// Minimum detection confidence for the gate
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,
}

fn default_filetypes() -> Vec<String> {
    constants::DEFAULT_FILETYPES
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_languages() -> Vec<String> {
    constants::DEFAULT_LANGUAGES
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_min_confidence() -> f64 {
    constants::DEFAULT_MIN_CONFIDENCE
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            filetypes: default_filetypes(),
            languages: default_languages(),
            min_confidence: default_min_confidence(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tools: ToolsConfig::default(),
            ocr: OcrConfig::default(),
            extraction: ExtractionConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration from default locations or return defaults
    pub fn load() -> Result<Self> {
        let default_paths = [
            PathBuf::from("docsift.toml"),
            utils::expand_path("~/.config/docsift/settings.toml"),
        ];

        for path in &default_paths {
            if path.exists() {
                return Self::from_file(path);
            }
        }

        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.tools.tesseract, "tesseract");
        assert_eq!(config.ocr.dpi, 300);
        assert_eq!(config.extraction.filetypes, vec!["pdf", "docx", "doc"]);
        assert_eq!(config.extraction.languages, vec!["eng", "fra", "nld"]);
        assert!(config.extraction.min_confidence > 0.8);
    }

    #[test]
    fn test_config_from_file() {
        let temp_file = std::env::temp_dir().join("docsift_test_config.toml");
        std::fs::write(
            &temp_file,
            r#"
[tools]
tesseract = "/opt/tesseract/bin/tesseract"

[ocr]
dpi = 150
lang = "fra"

[extraction]
filetypes = ["pdf"]
languages = []
"#,
        )
        .unwrap();

        let config = Config::from_file(&temp_file).unwrap();
        assert_eq!(config.tools.tesseract, "/opt/tesseract/bin/tesseract");
        assert_eq!(config.tools.pdftoppm, "pdftoppm");
        assert_eq!(config.ocr.dpi, 150);
        assert_eq!(config.ocr.lang.as_deref(), Some("fra"));
        assert_eq!(config.extraction.filetypes, vec!["pdf"]);
        assert!(config.extraction.languages.is_empty());
    }

    #[test]
    fn test_config_rejects_invalid_toml() {
        let temp_file = std::env::temp_dir().join("docsift_test_bad_config.toml");
        std::fs::write(&temp_file, "tools = 12").unwrap();
        assert!(Config::from_file(&temp_file).is_err());
    }
}
