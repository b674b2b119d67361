/// True for characters that carry no lexical meaning on their own:
/// whitespace, ASCII punctuation, general punctuation (dashes, curly quotes,
/// ellipsis), CJK symbols and full-width punctuation.
fn is_non_semantic_char(c: char) -> bool {
    c.is_whitespace()
        || c.is_ascii_punctuation()
        || matches!(
            c,
            '\u{00A1}'
                | '\u{00A7}'
                | '\u{00AB}'
                | '\u{00B6}'
                | '\u{00B7}'
                | '\u{00BB}'
                | '\u{00BF}'
                | '\u{2010}'..='\u{2027}'
                | '\u{2030}'..='\u{205E}'
                | '\u{3000}'..='\u{303F}'
                | '\u{FE10}'..='\u{FE1F}'
                | '\u{FE30}'..='\u{FE4F}'
                | '\u{FF01}'..='\u{FF0F}'
                | '\u{FF1A}'..='\u{FF20}'
                | '\u{FF3B}'..='\u{FF40}'
                | '\u{FF5B}'..='\u{FF65}'
        )
}

/// A token made only of punctuation, whitespace or symbols.
pub fn is_non_semantic_token(token: &str) -> bool {
    token.chars().all(is_non_semantic_char)
}

/// Derive the analysis tokens: order and duplicates preserved, punctuation dropped.
pub fn filter_punctuation(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .filter(|t| !is_non_semantic_token(t))
        .cloned()
        .collect()
}
