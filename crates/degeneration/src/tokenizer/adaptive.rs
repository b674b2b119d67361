use std::sync::OnceLock;
use tracing::{debug, error, info, warn};

use super::{
    RegexTokenizer, SegmentingTokenizer, Tokenizer, TokenizerBackendKind, TokenizerError,
};

/// Tokenizer handle that serves the segmenter once it has been warmed up and
/// the regex fallback before that (or for good, if warm-up failed).
///
/// `tokenize` never blocks on dictionary loading; only `warm_up` does.
pub struct AdaptiveTokenizer {
    preferred: TokenizerBackendKind,
    primary: OnceLock<SegmentingTokenizer>,
    fallback: RegexTokenizer,
}

impl AdaptiveTokenizer {
    pub fn new(preferred: TokenizerBackendKind) -> Self {
        Self {
            preferred,
            primary: OnceLock::new(),
            fallback: RegexTokenizer,
        }
    }

    pub fn fallback_only() -> Self {
        Self::new(TokenizerBackendKind::Fallback)
    }

    /// Initialize the segmenter. Idempotent; a no-op when the fallback was requested.
    pub fn warm_up(&self) -> Result<(), TokenizerError> {
        if self.preferred == TokenizerBackendKind::Fallback || self.is_ready() {
            return Ok(());
        }

        match SegmentingTokenizer::new() {
            Ok(segmenter) => {
                // a concurrent warm-up may have won the race; either instance is equivalent
                let _ = self.primary.set(segmenter);
                info!("segmenter ready");
                Ok(())
            }
            Err(e @ TokenizerError::BackendUnavailable(_)) => {
                debug!(error = %e, "segmenter not compiled in, staying on fallback tokenizer");
                Err(e)
            }
            Err(e) => {
                error!(error = %e, "failed to warm up segmenter, staying on fallback tokenizer");
                Err(e)
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        self.primary.get().is_some()
    }
}

impl Default for AdaptiveTokenizer {
    fn default() -> Self {
        Self::new(TokenizerBackendKind::default())
    }
}

impl Tokenizer for AdaptiveTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        match self.primary.get() {
            Some(segmenter) => segmenter.try_tokenize(text).unwrap_or_else(|e| {
                warn!(error = %e, "segmenter failed, falling back to regex tokenizer");
                self.fallback.tokenize(text)
            }),
            None => self.fallback.tokenize(text),
        }
    }

    fn backend(&self) -> TokenizerBackendKind {
        if self.is_ready() {
            TokenizerBackendKind::Segmenter
        } else {
            TokenizerBackendKind::Fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cold_handle_uses_fallback() {
        let tokenizer = AdaptiveTokenizer::default();
        assert!(!tokenizer.is_ready());
        assert_eq!(tokenizer.backend(), TokenizerBackendKind::Fallback);

        let text = "为什么程序员讨厌大自然？因为到处都是 bug！";
        assert_eq!(tokenizer.tokenize(text), RegexTokenizer.tokenize(text));
    }

    #[test]
    fn test_fallback_only_warm_up_is_noop() {
        let tokenizer = AdaptiveTokenizer::fallback_only();
        assert!(tokenizer.warm_up().is_ok());
        assert!(!tokenizer.is_ready());
        assert_eq!(tokenizer.backend(), TokenizerBackendKind::Fallback);
    }

    #[cfg(not(feature = "lindera-chinese"))]
    #[test]
    fn test_failed_warm_up_keeps_fallback() {
        let tokenizer = AdaptiveTokenizer::new(TokenizerBackendKind::Segmenter);
        assert!(matches!(
            tokenizer.warm_up(),
            Err(TokenizerError::BackendUnavailable(_))
        ));
        assert_eq!(tokenizer.backend(), TokenizerBackendKind::Fallback);
        assert_eq!(tokenizer.tokenize("Hello World"), vec!["hello", "world"]);
    }

    #[cfg(not(feature = "lindera-chinese"))]
    #[test]
    fn test_default_handle_prefers_fallback() {
        let tokenizer = AdaptiveTokenizer::default();
        assert!(tokenizer.warm_up().is_ok());
        assert_eq!(tokenizer.backend(), TokenizerBackendKind::Fallback);
    }

    #[cfg(feature = "lindera-chinese")]
    #[test]
    fn test_warm_up_switches_backend() {
        let tokenizer = AdaptiveTokenizer::default();
        tokenizer.warm_up().expect("segmenter warm-up");
        assert!(tokenizer.is_ready());
        assert_eq!(tokenizer.backend(), TokenizerBackendKind::Segmenter);
        // second call is a no-op
        assert!(tokenizer.warm_up().is_ok());
    }
}
