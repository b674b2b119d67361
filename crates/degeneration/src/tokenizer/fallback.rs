use regex::Regex;
use std::sync::LazyLock;

use super::{normalize_surfaces, Tokenizer, TokenizerBackendKind};

/// CJK symbols & punctuation, half/full-width forms and whitespace collapse to one space
static SYMBOL_RUNS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("[\u{3000}-\u{303F}\u{FF00}-\u{FFEF}\\s]+").expect("valid symbol-run pattern")
});

static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[\s,，。！!?？“”'"（）()【】\[\]、\\/]+"#).expect("valid separator pattern")
});

/// Rule-based tokenizer used whenever the segmenter is not available.
///
/// CJK runs are not segmented: a clause between two punctuation marks comes
/// back as a single token.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexTokenizer;

impl RegexTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let lowered = text.to_lowercase();
        let collapsed = SYMBOL_RUNS.replace_all(&lowered, " ");
        normalize_surfaces(SEPARATORS.split(&collapsed))
    }

    fn backend(&self) -> TokenizerBackendKind {
        TokenizerBackendKind::Fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_blank_input() {
        let tokenizer = RegexTokenizer::new();
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize("  \n\t ").is_empty());
    }

    #[test]
    fn test_chinese_clauses() {
        let tokens = RegexTokenizer.tokenize("为什么程序员讨厌大自然？因为到处都是 bug！");
        assert_eq!(tokens, vec!["为什么程序员讨厌大自然", "因为到处都是", "bug"]);
    }

    #[test]
    fn test_lowercases_and_splits_ascii_punctuation() {
        let tokens = RegexTokenizer.tokenize("Hello, World! (AI) [model] a/b");
        assert_eq!(tokens, vec!["hello", "world", "ai", "model", "a", "b"]);
    }

    #[test]
    fn test_refusal_clause_is_one_token() {
        let tokens =
            RegexTokenizer.tokenize("作为一个AI语言模型，我无法提供完整的文章，但可以给你一些建议。");
        assert_eq!(
            tokens,
            vec!["作为一个ai语言模型", "我无法提供完整的文章", "但可以给你一些建议"]
        );
    }

    #[test]
    fn test_punctuation_only() {
        assert!(RegexTokenizer.tokenize("？！。，「」").is_empty());
    }

    #[test]
    fn test_deterministic() {
        let text = "好的！为什么程序员喜欢黑暗模式？因为光会吸引 bug。";
        assert_eq!(RegexTokenizer.tokenize(text), RegexTokenizer.tokenize(text));
    }
}
