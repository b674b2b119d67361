use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Empirical Shannon entropy of one turn's analysis tokens
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntropyStats {
    /// H = -Σ p_i log2 p_i, in bits
    pub entropy: f64,
    /// log2(V) for V distinct tokens; 0 when V <= 1
    pub entropy_max: f64,
    /// H / H_max in [0, 1]; 1 when H_max = 0
    pub entropy_normalized: f64,
    /// 1 - entropy_normalized, the low-diversity feature
    pub diversity_loss: f64,
}

impl EntropyStats {
    /// Value for distributions with no uncertainty (zero or one distinct token).
    /// Short or empty turns are not flagged as low-diversity.
    const DEGENERATE: EntropyStats = EntropyStats {
        entropy: 0.0,
        entropy_max: 0.0,
        entropy_normalized: 1.0,
        diversity_loss: 0.0,
    };
}

pub fn estimate_entropy(tokens: &[String]) -> EntropyStats {
    // BTreeMap keeps the summation order stable across runs
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }

    let vocabulary_size = counts.len();
    if vocabulary_size <= 1 {
        return EntropyStats::DEGENERATE;
    }

    let entropy_max = (vocabulary_size as f64).log2();

    // uniform counts sit exactly at the maximum
    let mut values = counts.values();
    let first = values.next().copied();
    if values.all(|&count| Some(count) == first) {
        return EntropyStats {
            entropy: entropy_max,
            entropy_max,
            entropy_normalized: 1.0,
            diversity_loss: 0.0,
        };
    }

    let total = tokens.len() as f64;
    let entropy: f64 = counts
        .values()
        .map(|&count| {
            let p = count as f64 / total;
            p * (1.0 / p).log2()
        })
        .sum();

    let entropy_normalized = (entropy / entropy_max).clamp(0.0, 1.0);

    EntropyStats {
        entropy,
        entropy_max,
        entropy_normalized,
        diversity_loss: 1.0 - entropy_normalized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_empty_sequence() {
        let stats = estimate_entropy(&[]);
        assert_eq!(stats, EntropyStats::DEGENERATE);
        assert_eq!(stats.entropy_normalized, 1.0);
        assert_eq!(stats.diversity_loss, 0.0);
    }

    #[test]
    fn test_single_distinct_token() {
        let stats = estimate_entropy(&strings(&["抱歉", "抱歉", "抱歉", "抱歉"]));
        assert_eq!(stats.entropy, 0.0);
        assert_eq!(stats.entropy_max, 0.0);
        assert_eq!(stats.entropy_normalized, 1.0);
        assert_eq!(stats.diversity_loss, 0.0);
    }

    #[test]
    fn test_uniform_distribution_has_no_diversity_loss() {
        let stats = estimate_entropy(&strings(&["a", "b", "c", "d"]));
        assert!((stats.entropy - 2.0).abs() < 1e-12);
        assert!((stats.entropy_max - 2.0).abs() < 1e-12);
        assert!((stats.entropy_normalized - 1.0).abs() < 1e-12);
        assert!(stats.diversity_loss.abs() < 1e-12);
    }

    #[test]
    fn test_uniform_over_three_types_is_exact() {
        let stats = estimate_entropy(&strings(&["作为一个ai语言模型", "我无法", "但可以"]));
        assert_eq!(stats.entropy, 3f64.log2());
        assert_eq!(stats.entropy_max, 3f64.log2());
        assert_eq!(stats.entropy_normalized, 1.0);
        assert_eq!(stats.diversity_loss, 0.0);

        let repeated = estimate_entropy(&strings(&["a", "b", "c", "a", "b", "c"]));
        assert_eq!(repeated.diversity_loss, 0.0);
    }

    #[test]
    fn test_skewed_distribution() {
        // p = (3/4, 1/4): H = 0.811278..., H_max = 1
        let stats = estimate_entropy(&strings(&["我", "我", "我", "不能"]));
        assert!((stats.entropy - 0.811_278_124_459_132_9).abs() < 1e-12);
        assert_eq!(stats.entropy_max, 1.0);
        assert!((stats.diversity_loss - (1.0 - 0.811_278_124_459_132_9)).abs() < 1e-12);
    }

    #[test]
    fn test_diversity_loss_is_complement() {
        let stats = estimate_entropy(&strings(&["x", "y", "x", "z", "x", "x"]));
        assert!(stats.entropy_normalized >= 0.0 && stats.entropy_normalized <= 1.0);
        assert_eq!(stats.diversity_loss, 1.0 - stats.entropy_normalized);
    }
}
