//! Tokenizer adapter
//!
//! Maps raw text to an ordered sequence of lower-cased, non-empty tokens.
//! The metric engine depends only on the [`Tokenizer`] trait, never on which
//! backend produced the tokens.

pub mod adaptive;
pub mod fallback;
pub mod segmenter;

pub use adaptive::AdaptiveTokenizer;
pub use common::configuration::TokenizerBackendKind;
pub use fallback::RegexTokenizer;
pub use segmenter::SegmentingTokenizer;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenizerError {
    #[error("tokenizer backend unavailable: {0}")]
    BackendUnavailable(String),
    #[error("failed to initialize tokenizer backend: {0}")]
    Initialization(String),
    #[error("segmentation failed: {0}")]
    Segmentation(String),
}

/// Synchronous, deterministic text segmentation
pub trait Tokenizer: Send + Sync {
    /// Split `text` into lower-cased, non-empty tokens, preserving order
    fn tokenize(&self, text: &str) -> Vec<String>;

    /// Backend that serves `tokenize` right now
    fn backend(&self) -> TokenizerBackendKind;
}

/// Lower-case, trim and drop empty surfaces.
pub(crate) fn normalize_surfaces<I, S>(surfaces: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    surfaces
        .into_iter()
        .map(|s| s.as_ref().to_lowercase().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
