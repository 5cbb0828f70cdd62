//! Configuration loading.
//!
//! Settings come from an optional TOML file, then environment variables
//! (after `.env` has been loaded). The result is read once at start-up and
//! handed to the pipeline; nothing here is mutated afterwards.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::llm::LlmConfig;
use crate::ocr::DEFAULT_DPI;

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILENAME: &str = "contract-digest.toml";

/// Errors raised while reading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// OCR and rasterization settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrConfig {
    /// Tesseract executable name or path.
    #[serde(default = "default_tesseract_cmd")]
    pub tesseract_cmd: String,
    /// Tesseract language (e.g., "eng", "eng+deu").
    #[serde(default = "default_language")]
    pub language: String,
    /// Resolution pages are rendered at before OCR.
    #[serde(default = "default_dpi")]
    pub dpi: u32,
}

fn default_tesseract_cmd() -> String {
    "tesseract".to_string()
}

fn default_language() -> String {
    "eng".to_string()
}

fn default_dpi() -> u32 {
    DEFAULT_DPI
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tesseract_cmd: default_tesseract_cmd(),
            language: default_language(),
            dpi: default_dpi(),
        }
    }
}

impl OcrConfig {
    /// Apply overrides from `TESSERACT_CMD`, `OCR_LANGUAGE` and `OCR_DPI`.
    pub fn with_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(cmd) = var("TESSERACT_CMD") {
            self.tesseract_cmd = cmd;
        }
        if let Some(lang) = var("OCR_LANGUAGE") {
            self.language = lang;
        }
        if let Some(dpi) = var("OCR_DPI").and_then(|v| v.parse().ok()) {
            self.dpi = dpi;
        }
        self
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Text-generation service settings.
    #[serde(default)]
    pub llm: LlmConfig,
    /// OCR settings.
    #[serde(default)]
    pub ocr: OcrConfig,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration with environment overrides.
    ///
    /// An explicit path must exist. Without one, `contract-digest.toml` in
    /// the working directory and then the user config directory are tried;
    /// if neither exists, defaults are used.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                Self::load_from_path(path)?
            }
            None => match Self::discover() {
                Some(path) => Self::load_from_path(&path)?,
                None => Self::default(),
            },
        };
        Ok(config.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Parse a TOML config file without applying overrides.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded config from {}", path.display());
        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Apply environment-style overrides to every section.
    pub fn with_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        self.llm = self.llm.with_overrides(&var);
        self.ocr = self.ocr.with_overrides(&var);
        self
    }

    /// Candidate config files, in lookup order.
    pub fn candidate_paths() -> Vec<PathBuf> {
        [
            Some(PathBuf::from(LOCAL_CONFIG_FILENAME)),
            dirs::config_dir().map(|d| d.join("contract-digest").join("config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn discover() -> Option<PathBuf> {
        Self::candidate_paths().into_iter().find(|p| p.is_file())
    }

    /// TOML rendering with secrets masked.
    pub fn to_redacted_toml(&self) -> Result<String, toml::ser::Error> {
        let redacted = Config {
            llm: self.llm.redacted(),
            ocr: self.ocr.clone(),
            source_path: None,
        };
        toml::to_string_pretty(&redacted)
    }
}
