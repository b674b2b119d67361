use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NgramCount {
    /// Window tokens joined by a single space
    pub ngram: String,
    pub count: usize,
}

/// Per-turn n-gram frequency table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NgramStats {
    pub n: usize,
    /// Fewer tokens than the window width; no windows were formed
    pub insufficient: bool,
    /// Distinct windows
    pub total_patterns: usize,
    /// Distinct windows seen at least twice
    pub repeated_patterns: usize,
    pub repetition_ratio: f64,
    /// Sorted by count descending, ties in first-occurrence order
    pub frequencies: Vec<NgramCount>,
}

/// Count stride-1 windows of width `n`, keyed by the window slice itself so no
/// delimiter can collide with token content. Distinct windows come back in
/// first-occurrence order.
fn count_windows(tokens: &[String], n: usize) -> Vec<(&[String], usize)> {
    if n == 0 || tokens.len() < n {
        return Vec::new();
    }

    let mut index: HashMap<&[String], usize> = HashMap::new();
    let mut counts: Vec<(&[String], usize)> = Vec::new();
    for window in tokens.windows(n) {
        match index.get(window) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(window, counts.len());
                counts.push((window, 1));
            }
        }
    }
    counts
}

fn ratio(repeated: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        repeated as f64 / total as f64
    }
}

/// Fraction of distinct windows that occur more than once.
///
/// Measures pattern reuse, not raw window count. Returns 0 when the sequence is
/// shorter than `n`.
pub fn repetition_ratio(tokens: &[String], n: usize) -> f64 {
    let counts = count_windows(tokens, n);
    let repeated = counts.iter().filter(|(_, c)| *c >= 2).count();
    ratio(repeated, counts.len())
}

pub fn ngram_stats(tokens: &[String], n: usize) -> NgramStats {
    let counts = count_windows(tokens, n);
    let total_patterns = counts.len();
    let repeated_patterns = counts.iter().filter(|(_, c)| *c >= 2).count();

    let mut frequencies: Vec<NgramCount> = counts
        .into_iter()
        .map(|(window, count)| NgramCount {
            ngram: window.join(" "),
            count,
        })
        .collect();
    // stable sort keeps first-occurrence order among equal counts
    frequencies.sort_by(|a, b| b.count.cmp(&a.count));

    NgramStats {
        n,
        insufficient: n == 0 || tokens.len() < n,
        total_patterns,
        repeated_patterns,
        repetition_ratio: ratio(repeated_patterns, total_patterns),
        frequencies,
    }
}
