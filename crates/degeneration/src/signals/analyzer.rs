//! Conversation Degeneration Analyzer
//!
//! Computes, per assistant turn, four independent degeneration signals and
//! combines them into a bounded score, plus conversation-level aggregates.
//! The computation is a pure function of the turns, the n-gram width, the
//! refusal catalog and the tokens the injected tokenizer produces.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, debug_span, info};

use common::consts::DEFAULT_NGRAM_SIZE;
use common::conversation::Turn;
use common::errors::{ErrorPayload, MetricError};

use super::aggregate::{aggregate_scores, degeneration_score};
use super::entropy::estimate_entropy;
use super::ngram::repetition_ratio;
use super::overlap::jaccard_overlap;
use super::punctuation::filter_punctuation;
use super::refusal::RefusalCatalog;
use crate::tokenizer::Tokenizer;

// ============================================================================
// Result Types
// ============================================================================

/// An assistant turn with its tokens and signals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedTurn {
    #[serde(flatten)]
    pub turn: Turn,
    /// Raw tokens, punctuation retained, for display alignment
    pub tokens: Vec<String>,
    /// Tokens with punctuation removed; input to every numeric signal
    pub analysis_tokens: Vec<String>,
    /// Shannon entropy of the analysis tokens, in bits
    pub entropy: f64,
    /// log2 of the vocabulary size
    pub entropy_max: f64,
    /// entropy / entropy_max
    pub entropy_normalized: f64,
    /// Diversity loss: 1 - entropy_normalized
    pub normalized_entropy: f64,
    /// Distinct repeated n-grams over distinct n-grams
    pub repetition_ratio: f64,
    /// Jaccard index against the previous assistant turn
    pub overlap_previous: f64,
    /// Whether any refusal phrase occurs in the content
    pub fallback_hit: bool,
    /// Matched refusal phrases, in catalog order
    pub fallback_matches: Vec<String>,
    /// Mean of the four signals
    pub degeneration_score: f64,
}

impl AnalyzedTurn {
    pub fn content(&self) -> &str {
        &self.turn.content
    }
}

/// Complete analysis of one conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricResult {
    /// One entry per assistant turn, in conversation order
    pub per_turn: Vec<AnalyzedTurn>,
    pub average_score: f64,
    pub peak_score: f64,
}

/// Either a computed value or a categorized failure, tagged by `status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisOutcome<T> {
    Ok(T),
    Error(ErrorPayload),
}

impl<T> From<Result<T, MetricError>> for AnalysisOutcome<T> {
    fn from(result: Result<T, MetricError>) -> Self {
        match result {
            Ok(value) => AnalysisOutcome::Ok(value),
            Err(e) => AnalysisOutcome::Error(e.to_payload()),
        }
    }
}

// ============================================================================
// Analyzer
// ============================================================================

/// Trait for computing degeneration metrics over a conversation
pub trait DegenerationAnalyzer {
    /// Analyze every assistant turn of `turns`
    fn analyze(&self, turns: &[Turn]) -> Result<MetricResult, MetricError>;
}

/// Token-based analyzer: segments each assistant turn with the injected
/// tokenizer and computes the signals over the resulting tokens
#[derive(Clone)]
pub struct TokenBasedDegenerationAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    /// Width of the repetition window
    ngram_size: usize,
    catalog: RefusalCatalog,
}

impl TokenBasedDegenerationAnalyzer {
    /// Create an analyzer with trigram windows and the default refusal catalog
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self {
            tokenizer,
            ngram_size: DEFAULT_NGRAM_SIZE,
            catalog: RefusalCatalog::default(),
        }
    }

    pub fn with_ngram_size(mut self, ngram_size: usize) -> Self {
        self.ngram_size = ngram_size;
        self
    }

    pub fn with_catalog(mut self, catalog: RefusalCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn ngram_size(&self) -> usize {
        self.ngram_size
    }

    pub fn catalog(&self) -> &RefusalCatalog {
        &self.catalog
    }

    pub fn tokenizer(&self) -> &dyn Tokenizer {
        self.tokenizer.as_ref()
    }
}

impl DegenerationAnalyzer for TokenBasedDegenerationAnalyzer {
    fn analyze(&self, turns: &[Turn]) -> Result<MetricResult, MetricError> {
        calculate_degeneration_metric(
            turns,
            self.ngram_size,
            self.tokenizer.as_ref(),
            &self.catalog,
        )
    }
}

fn analyze_turn(
    turn: &Turn,
    previous: Option<&[String]>,
    ngram_size: usize,
    tokenizer: &dyn Tokenizer,
    catalog: &RefusalCatalog,
) -> AnalyzedTurn {
    let tokens = tokenizer.tokenize(&turn.content);
    let analysis_tokens = filter_punctuation(&tokens);

    let entropy = estimate_entropy(&analysis_tokens);
    let repetition_ratio = repetition_ratio(&analysis_tokens, ngram_size);
    let overlap_previous = jaccard_overlap(previous, &analysis_tokens);
    let fallback_matches = catalog.matches(&turn.content);
    let fallback_hit = !fallback_matches.is_empty();

    let degeneration_score = degeneration_score(
        repetition_ratio,
        overlap_previous,
        fallback_hit,
        entropy.diversity_loss,
    );

    debug!(
        tokens = tokens.len(),
        analysis_tokens = analysis_tokens.len(),
        entropy = entropy.entropy,
        repetition_ratio,
        overlap_previous,
        fallback_hit,
        degeneration_score,
        "analyzed turn"
    );

    AnalyzedTurn {
        turn: turn.clone(),
        tokens,
        analysis_tokens,
        entropy: entropy.entropy,
        entropy_max: entropy.entropy_max,
        entropy_normalized: entropy.entropy_normalized,
        normalized_entropy: entropy.diversity_loss,
        repetition_ratio,
        overlap_previous,
        fallback_hit,
        fallback_matches,
        degeneration_score,
    }
}

/// Analyze the assistant turns of a conversation.
///
/// User turns are skipped entirely; "previous" for the overlap signal is the
/// prior assistant turn. Fails with `InvalidInput` when there is no assistant
/// turn or `ngram_size` is 0; every other edge case resolves to a defined value.
pub fn calculate_degeneration_metric(
    turns: &[Turn],
    ngram_size: usize,
    tokenizer: &dyn Tokenizer,
    catalog: &RefusalCatalog,
) -> Result<MetricResult, MetricError> {
    if ngram_size == 0 {
        return Err(MetricError::invalid_ngram_size(ngram_size));
    }

    let mut per_turn: Vec<AnalyzedTurn> = Vec::new();
    for (index, turn) in turns.iter().filter(|t| t.is_assistant()).enumerate() {
        let _span = debug_span!("turn", turn = index).entered();
        let previous = per_turn.last().map(|p| p.analysis_tokens.as_slice());
        let analyzed = analyze_turn(turn, previous, ngram_size, tokenizer, catalog);
        per_turn.push(analyzed);
    }

    let scores: Vec<f64> = per_turn.iter().map(|t| t.degeneration_score).collect();
    let summary = aggregate_scores(&scores)?;

    info!(
        turns = turns.len(),
        assistant_turns = per_turn.len(),
        ngram_size,
        backend = %tokenizer.backend(),
        average_score = summary.average_score,
        peak_score = summary.peak_score,
        "degeneration analysis complete"
    );

    Ok(MetricResult {
        per_turn,
        average_score: summary.average_score,
        peak_score: summary.peak_score,
    })
}

// ============================================================================
// Tests
// ============================================================================
