use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

// -----------------------------------------------------------------------------
// Metric Errors
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MetricError {
    #[error("{why}")]
    InvalidInput { why: String },
}

impl MetricError {
    pub fn no_assistant_turns() -> Self {
        MetricError::InvalidInput {
            why: "no assistant turns to analyze".to_string(),
        }
    }

    pub fn invalid_ngram_size(size: usize) -> Self {
        MetricError::InvalidInput {
            why: format!("ngram size must be a positive integer, got {size}"),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            MetricError::InvalidInput { .. } => ErrorKind::InvalidInput,
        }
    }

    pub fn to_payload(&self) -> ErrorPayload {
        ErrorPayload {
            kind: self.kind(),
            message: self.to_string(),
        }
    }
}

/// Serializable form of a failed computation, displayed verbatim by callers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorPayload {
    pub kind: ErrorKind,
    pub message: String,
}

// -----------------------------------------------------------------------------
// Configuration Errors
// -----------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file `{path}`: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid configuration: {why}")]
    Invalid { why: String },
}
