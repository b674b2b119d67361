use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use common::consts::OTHER_TOKENS_LABEL;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenShare {
    pub token: String,
    pub count: usize,
    pub probability: f64,
}

/// Tokens beyond the top-k, merged into one bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherBucket {
    pub label: String,
    pub count: usize,
    pub probability: f64,
    pub token_types: usize,
}

/// Probability mass of one turn's analysis tokens, the input to the entropy signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenDistribution {
    pub total_tokens: usize,
    pub token_types: usize,
    /// Most probable tokens, count descending then first occurrence
    pub shares: Vec<TokenShare>,
    pub other: Option<OtherBucket>,
}

pub fn token_distribution(tokens: &[String], top_k: usize) -> TokenDistribution {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut ranked: Vec<(&str, usize)> = Vec::new();
    for token in tokens {
        match index.get(token.as_str()) {
            Some(&i) => ranked[i].1 += 1,
            None => {
                index.insert(token.as_str(), ranked.len());
                ranked.push((token.as_str(), 1));
            }
        }
    }

    let total = tokens.len();
    let token_types = ranked.len();
    let probability = |count: usize| count as f64 / total as f64;

    // stable: equal counts stay in first-occurrence order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let rest = if ranked.len() > top_k {
        ranked.split_off(top_k)
    } else {
        Vec::new()
    };

    let other = if rest.is_empty() {
        None
    } else {
        let count: usize = rest.iter().map(|(_, c)| c).sum();
        Some(OtherBucket {
            label: OTHER_TOKENS_LABEL.to_string(),
            count,
            probability: probability(count),
            token_types: rest.len(),
        })
    };

    let shares = ranked
        .into_iter()
        .map(|(token, count)| TokenShare {
            token: token.to_string(),
            count,
            probability: probability(count),
        })
        .collect();

    TokenDistribution {
        total_tokens: total,
        token_types,
        shares,
        other,
    }
}
