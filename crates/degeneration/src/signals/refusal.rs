use serde::{Deserialize, Serialize};

// ============================================================================
// Default Catalog
// ============================================================================

/// Templated refusal openers typical of a failing assistant.
///
/// Matched by case-sensitive substring containment against the raw turn
/// content, so a phrase embedded in a longer word still counts.
pub const DEFAULT_REFUSAL_PHRASES: &[&str] = &[
    "作为一个AI语言模型",
    "作为一个人工智能",
    "作为AI助手",
    "我只是一个AI",
    "我无法",
    "我不能",
    "很抱歉",
    "对不起，我",
    "我没有能力",
    "超出了我的能力范围",
    "As an AI language model",
    "I'm sorry, but",
    "I cannot",
    "I can't help with",
    "I am unable to",
];

// ============================================================================
// Catalog Matcher
// ============================================================================

/// Ordered set of refusal phrases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefusalCatalog {
    phrases: Vec<String>,
}

impl RefusalCatalog {
    /// Build a catalog, dropping empty and duplicate phrases while keeping
    /// first-seen order.
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for phrase in phrases {
            let phrase = phrase.into();
            if !phrase.is_empty() && !unique.contains(&phrase) {
                unique.push(phrase);
            }
        }
        Self { phrases: unique }
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Catalog phrases contained in `content`, in catalog order
    pub fn matches(&self, content: &str) -> Vec<String> {
        self.phrases
            .iter()
            .filter(|phrase| content.contains(phrase.as_str()))
            .cloned()
            .collect()
    }
}

impl Default for RefusalCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_REFUSAL_PHRASES.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_catalog_hit() {
        let catalog = RefusalCatalog::default();
        let matches =
            catalog.matches("作为一个AI语言模型，我无法提供完整的文章，但可以给你一些建议。");
        assert_eq!(matches, vec!["作为一个AI语言模型", "我无法"]);
    }

    #[test]
    fn test_no_hit_on_normal_reply() {
        let catalog = RefusalCatalog::default();
        assert!(catalog
            .matches("为什么程序员讨厌大自然？因为到处都是 bug！")
            .is_empty());
    }

    #[test]
    fn test_case_sensitive() {
        let catalog = RefusalCatalog::default();
        assert!(catalog.matches("作为一个ai语言模型").is_empty());
        assert!(catalog.matches("as an ai language model").is_empty());
        assert_eq!(catalog.matches("As an AI language model, no."), vec!["As an AI language model"]);
    }

    #[test]
    fn test_matches_inside_longer_text() {
        let catalog = RefusalCatalog::new(["cannot"]);
        assert_eq!(catalog.matches("Icannotdo"), vec!["cannot"]);
    }

    #[test]
    fn test_matches_follow_catalog_order() {
        let catalog = RefusalCatalog::new(["B", "A", "C"]);
        assert_eq!(catalog.matches("A then B"), vec!["B", "A"]);
    }

    #[test]
    fn test_custom_catalog_dedupes_and_drops_empty() {
        let catalog = RefusalCatalog::new(["抱歉", "", "抱歉", "不行"]);
        assert_eq!(catalog.phrases(), &["抱歉".to_string(), "不行".to_string()]);
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_empty_catalog_never_hits() {
        let catalog = RefusalCatalog::new(Vec::<String>::new());
        assert!(catalog.is_empty());
        assert!(catalog.matches("作为一个AI语言模型").is_empty());
    }
}
