use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::Path;

use crate::consts::{
    DEFAULT_DISTRIBUTION_TOP_K, DEFAULT_LOG_LEVEL, DEFAULT_NGRAM_SIZE, DEFAULT_OVERLAP_TOP_K,
};
use crate::errors::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Metrics {
    pub ngram_size: Option<usize>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TokenizerBackendKind {
    #[serde(rename = "segmenter")]
    Segmenter,
    #[serde(rename = "fallback")]
    Fallback,
}

/// The segmenter when it is compiled in, otherwise the regex fallback
impl Default for TokenizerBackendKind {
    fn default() -> Self {
        if cfg!(feature = "lindera-chinese") {
            TokenizerBackendKind::Segmenter
        } else {
            TokenizerBackendKind::Fallback
        }
    }
}

impl Display for TokenizerBackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenizerBackendKind::Segmenter => write!(f, "segmenter"),
            TokenizerBackendKind::Fallback => write!(f, "fallback"),
        }
    }
}

impl std::str::FromStr for TokenizerBackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "segmenter" => Ok(TokenizerBackendKind::Segmenter),
            "fallback" => Ok(TokenizerBackendKind::Fallback),
            _ => Err(format!(
                "invalid tokenizer backend '{}': expected segmenter or fallback",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Tokenizer {
    pub backend: Option<TokenizerBackendKind>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Report {
    pub distribution_top_k: Option<usize>,
    pub overlap_top_k: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Logging {
    pub level: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Configuration {
    pub version: Option<String>,
    pub metrics: Option<Metrics>,
    pub tokenizer: Option<Tokenizer>,
    /// Replaces the built-in refusal catalog when present
    pub refusal_phrases: Option<Vec<String>>,
    pub report: Option<Report>,
    pub logging: Option<Logging>,
}

impl Configuration {
    pub fn from_yaml(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Configuration =
            serde_yaml::from_str(contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&contents, path)
    }

    /// Loads `path` when it exists, otherwise returns defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ngram_size() == 0 {
            return Err(ConfigError::Invalid {
                why: "metrics.ngram_size must be >= 1".to_string(),
            });
        }
        if let Some(phrases) = &self.refusal_phrases {
            if phrases.iter().any(|p| p.is_empty()) {
                return Err(ConfigError::Invalid {
                    why: "refusal_phrases must not contain empty phrases".to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn ngram_size(&self) -> usize {
        self.metrics
            .as_ref()
            .and_then(|m| m.ngram_size)
            .unwrap_or(DEFAULT_NGRAM_SIZE)
    }

    pub fn tokenizer_backend(&self) -> TokenizerBackendKind {
        self.tokenizer
            .as_ref()
            .and_then(|t| t.backend)
            .unwrap_or_default()
    }

    pub fn distribution_top_k(&self) -> usize {
        self.report
            .as_ref()
            .and_then(|r| r.distribution_top_k)
            .unwrap_or(DEFAULT_DISTRIBUTION_TOP_K)
    }

    pub fn overlap_top_k(&self) -> usize {
        self.report
            .as_ref()
            .and_then(|r| r.overlap_top_k)
            .unwrap_or(DEFAULT_OVERLAP_TOP_K)
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }
}
