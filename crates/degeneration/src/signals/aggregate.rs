use serde::{Deserialize, Serialize};

use common::consts::{LOW_SEVERITY_CEILING, MODERATE_SEVERITY_CEILING};
use common::errors::MetricError;

/// Unweighted mean of the four per-turn signals, each in [0, 1].
pub fn degeneration_score(
    repetition_ratio: f64,
    overlap_previous: f64,
    fallback_hit: bool,
    diversity_loss: f64,
) -> f64 {
    let refusal = if fallback_hit { 1.0 } else { 0.0 };
    (repetition_ratio + overlap_previous + refusal + diversity_loss) / 4.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversationScore {
    pub average_score: f64,
    pub peak_score: f64,
}

/// Conversation-level mean and maximum of the per-turn scores.
///
/// Fails with `InvalidInput` when there are no scores rather than producing NaN.
pub fn aggregate_scores(scores: &[f64]) -> Result<ConversationScore, MetricError> {
    if scores.is_empty() {
        return Err(MetricError::no_assistant_turns());
    }

    let peak_score = scores.iter().copied().fold(f64::MIN, f64::max);
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;

    Ok(ConversationScore {
        // rounding in the sum can push the mean of equal scores past the max
        average_score: mean.min(peak_score),
        peak_score,
    })
}

/// Coarse band for a degeneration score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// score < 0.3
    Low,
    /// 0.3 <= score < 0.6
    Moderate,
    /// score >= 0.6
    Severe,
}

impl Severity {
    pub fn of(score: f64) -> Self {
        if score < LOW_SEVERITY_CEILING {
            Severity::Low
        } else if score < MODERATE_SEVERITY_CEILING {
            Severity::Moderate
        } else {
            Severity::Severe
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Moderate => write!(f, "moderate"),
            Severity::Severe => write!(f, "severe"),
        }
    }
}
