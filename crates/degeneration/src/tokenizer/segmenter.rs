//! Dictionary-based Chinese word segmentation.
//!
//! Uses lindera with the embedded CC-CEDICT dictionary when the
//! `lindera-chinese` feature is enabled; otherwise construction fails and
//! callers stay on the regex fallback.

#[cfg(feature = "lindera-chinese")]
use lindera::dictionary::{load_embedded_dictionary, DictionaryKind};
#[cfg(feature = "lindera-chinese")]
use lindera::mode::Mode;
#[cfg(feature = "lindera-chinese")]
use lindera::segmenter::Segmenter;
#[cfg(feature = "lindera-chinese")]
use lindera::tokenizer::Tokenizer as LinderaTokenizer;

use tracing::warn;

#[cfg(feature = "lindera-chinese")]
use super::normalize_surfaces;
use super::{RegexTokenizer, Tokenizer, TokenizerBackendKind, TokenizerError};

pub struct SegmentingTokenizer {
    #[cfg(feature = "lindera-chinese")]
    inner: LinderaTokenizer,
}

impl SegmentingTokenizer {
    /// Load the dictionary and build the segmenter. Expensive; call once.
    #[cfg(feature = "lindera-chinese")]
    pub fn new() -> Result<Self, TokenizerError> {
        let dictionary = load_embedded_dictionary(DictionaryKind::CcCedict)
            .map_err(|e| TokenizerError::Initialization(e.to_string()))?;
        let segmenter = Segmenter::new(Mode::Normal, dictionary, None);
        Ok(Self {
            inner: LinderaTokenizer::new(segmenter),
        })
    }

    #[cfg(not(feature = "lindera-chinese"))]
    pub fn new() -> Result<Self, TokenizerError> {
        Err(TokenizerError::BackendUnavailable(
            "built without the `lindera-chinese` feature".to_string(),
        ))
    }

    #[cfg(feature = "lindera-chinese")]
    pub fn try_tokenize(&self, text: &str) -> Result<Vec<String>, TokenizerError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let tokens = self
            .inner
            .tokenize(text)
            .map_err(|e| TokenizerError::Segmentation(e.to_string()))?;
        Ok(normalize_surfaces(tokens.iter().map(|t| t.surface.to_string())))
    }

    #[cfg(not(feature = "lindera-chinese"))]
    pub fn try_tokenize(&self, text: &str) -> Result<Vec<String>, TokenizerError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        Err(TokenizerError::BackendUnavailable(
            "built without the `lindera-chinese` feature".to_string(),
        ))
    }
}

impl Tokenizer for SegmentingTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        self.try_tokenize(text).unwrap_or_else(|e| {
            warn!(error = %e, "segmenter failed, falling back to regex tokenizer");
            RegexTokenizer.tokenize(text)
        })
    }

    fn backend(&self) -> TokenizerBackendKind {
        TokenizerBackendKind::Segmenter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(feature = "lindera-chinese"))]
    #[test]
    fn test_unavailable_without_feature() {
        assert!(matches!(
            SegmentingTokenizer::new(),
            Err(TokenizerError::BackendUnavailable(_))
        ));
    }

    #[cfg(feature = "lindera-chinese")]
    #[test]
    fn test_segments_chinese_words() {
        let tokenizer = SegmentingTokenizer::new().expect("Failed to create segmenter");
        let text = "为什么程序员讨厌大自然？";
        let tokens = tokenizer.tokenize(text);
        println!("Tokens: {:?}", tokens);

        // a real segmentation splits the clause the fallback keeps whole
        assert!(tokens.len() >= 3);
        assert!(tokens.len() < text.chars().count());
    }

    #[cfg(feature = "lindera-chinese")]
    #[test]
    fn test_lowercases_latin_tokens() {
        let tokenizer = SegmentingTokenizer::new().expect("Failed to create segmenter");
        let tokens = tokenizer.tokenize("作为一个AI语言模型");
        assert!(tokens.iter().all(|t| t.to_lowercase() == *t));
        assert!(tokens.iter().all(|t| !t.trim().is_empty()));
    }
}
