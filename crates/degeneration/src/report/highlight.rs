use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::signals::is_non_semantic_token;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanKind {
    /// Text between tokens
    Plain,
    /// A token that feeds the signals
    Analysis,
    /// A punctuation token dropped before analysis
    Filtered,
}

/// A slice of the original content, in original casing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightSpan {
    pub text: String,
    pub kind: SpanKind,
}

fn fold(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// Char range of the first case-insensitive occurrence of `token` at or after
/// char position `from`.
fn find_folded(chars: &[(usize, char)], token: &[char], from: usize) -> Option<(usize, usize)> {
    if token.is_empty() || chars.len() < token.len() {
        return None;
    }
    (from..=chars.len() - token.len())
        .find(|&start| {
            token
                .iter()
                .enumerate()
                .all(|(i, &t)| fold(chars[start + i].1) == fold(t))
        })
        .map(|start| (start, start + token.len()))
}

/// Align raw tokens with the content left to right.
///
/// Each token is searched case-insensitively from the end of the previous
/// match; tokens that cannot be located are skipped. Concatenating the span
/// texts reproduces `content` exactly.
pub fn highlight_spans(content: &str, tokens: &[String]) -> Vec<HighlightSpan> {
    let chars: Vec<(usize, char)> = content.char_indices().collect();
    let byte_at = |pos: usize| chars.get(pos).map(|(b, _)| *b).unwrap_or(content.len());

    let mut spans = Vec::new();
    let mut cursor = 0;
    for token in tokens {
        let token_chars: Vec<char> = token.chars().collect();
        let Some((start, end)) = find_folded(&chars, &token_chars, cursor) else {
            debug!(token = %token, "token not found in content, skipping");
            continue;
        };

        if start > cursor {
            spans.push(HighlightSpan {
                text: content[byte_at(cursor)..byte_at(start)].to_string(),
                kind: SpanKind::Plain,
            });
        }
        let kind = if is_non_semantic_token(token) {
            SpanKind::Filtered
        } else {
            SpanKind::Analysis
        };
        spans.push(HighlightSpan {
            text: content[byte_at(start)..byte_at(end)].to_string(),
            kind,
        });
        cursor = end;
    }

    if cursor < chars.len() {
        spans.push(HighlightSpan {
            text: content[byte_at(cursor)..].to_string(),
            kind: SpanKind::Plain,
        });
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    fn joined(spans: &[HighlightSpan]) -> String {
        spans.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_keeps_original_casing() {
        let content = "Hello, World";
        let spans = highlight_spans(content, &strings(&["hello", ",", "world"]));
        assert_eq!(
            spans,
            vec![
                HighlightSpan { text: "Hello".into(), kind: SpanKind::Analysis },
                HighlightSpan { text: ",".into(), kind: SpanKind::Filtered },
                HighlightSpan { text: " ".into(), kind: SpanKind::Plain },
                HighlightSpan { text: "World".into(), kind: SpanKind::Analysis },
            ]
        );
    }

    #[test]
    fn test_unfound_tokens_skipped() {
        let content = "我无法回答。";
        let spans = highlight_spans(content, &strings(&["我", "不存在", "回答"]));
        assert_eq!(joined(&spans), content);
        assert_eq!(spans[0].kind, SpanKind::Analysis);
        assert_eq!(spans[1], HighlightSpan { text: "无法".into(), kind: SpanKind::Plain });
        assert_eq!(spans.last().map(|s| s.text.as_str()), Some("。"));
    }

    #[test]
    fn test_matches_advance_left_to_right() {
        let content = "ab ab";
        let spans = highlight_spans(content, &strings(&["ab", "ab"]));
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[2].text, "ab");
        assert_eq!(joined(&spans), content);
    }

    #[test]
    fn test_no_tokens() {
        let spans = highlight_spans("   ", &[]);
        assert_eq!(spans, vec![HighlightSpan { text: "   ".into(), kind: SpanKind::Plain }]);
        assert!(highlight_spans("", &[]).is_empty());
    }
}
