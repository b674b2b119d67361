use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Jaccard index of the token-type sets of two consecutive assistant turns.
///
/// `previous` is `None` for the first assistant turn. Returns 0 when there is
/// no predecessor or when the union is empty.
pub fn jaccard_overlap(previous: Option<&[String]>, current: &[String]) -> f64 {
    let Some(previous) = previous else {
        return 0.0;
    };

    let set_a: HashSet<&str> = previous.iter().map(String::as_str).collect();
    let set_b: HashSet<&str> = current.iter().map(String::as_str).collect();

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();

    if union == 0 {
        return 0.0;
    }

    intersection as f64 / union as f64
}

/// A token type present in both turns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedToken {
    pub token: String,
    pub previous_count: usize,
    pub current_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlapBreakdown {
    pub intersection: usize,
    pub union: usize,
    pub overlap: f64,
    /// Sorted by combined count descending, ties by token; at most `top_k` entries
    pub shared: Vec<SharedToken>,
}

fn frequencies(tokens: &[String]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }
    counts
}

pub fn overlap_breakdown(previous: &[String], current: &[String], top_k: usize) -> OverlapBreakdown {
    let previous_counts = frequencies(previous);
    let current_counts = frequencies(current);

    let mut shared: Vec<SharedToken> = previous_counts
        .iter()
        .filter_map(|(token, &previous_count)| {
            current_counts.get(token).map(|&current_count| SharedToken {
                token: token.to_string(),
                previous_count,
                current_count,
            })
        })
        .collect();

    let intersection = shared.len();
    let union = previous_counts.len() + current_counts.len() - intersection;

    shared.sort_by(|a, b| {
        (b.previous_count + b.current_count)
            .cmp(&(a.previous_count + a.current_count))
            .then_with(|| a.token.cmp(&b.token))
    });
    shared.truncate(top_k);

    OverlapBreakdown {
        intersection,
        union,
        overlap: jaccard_overlap(Some(previous), current),
        shared,
    }
}
