//! Per-turn breakdowns derived from a computed metric.
//!
//! Everything here is read-only over a `MetricResult`; the numeric signals are
//! never recomputed, only explained.

pub mod distribution;
pub mod highlight;
pub mod render;

pub use distribution::{token_distribution, OtherBucket, TokenDistribution, TokenShare};
pub use highlight::{highlight_spans, HighlightSpan, SpanKind};
pub use render::{render_text, summarize};

use serde::{Deserialize, Serialize};

use common::consts::{DEFAULT_DISTRIBUTION_TOP_K, DEFAULT_OVERLAP_TOP_K};
use common::conversation::Turn;
use common::errors::MetricError;

use crate::signals::{
    ngram_stats, overlap_breakdown, DegenerationAnalyzer, MetricResult, NgramStats,
    OverlapBreakdown, RefusalCatalog, Severity, TokenBasedDegenerationAnalyzer,
};
use crate::tokenizer::TokenizerBackendKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub distribution_top_k: usize,
    pub overlap_top_k: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            distribution_top_k: DEFAULT_DISTRIBUTION_TOP_K,
            overlap_top_k: DEFAULT_OVERLAP_TOP_K,
        }
    }
}

/// Whether one catalog phrase occurs in a turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogHit {
    pub phrase: String,
    pub matched: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnBreakdown {
    /// Position among assistant turns, starting at 0
    pub index: usize,
    pub severity: Severity,
    pub highlights: Vec<HighlightSpan>,
    pub distribution: TokenDistribution,
    pub ngrams: NgramStats,
    /// Absent for the first assistant turn
    pub overlap: Option<OverlapBreakdown>,
    pub catalog_hits: Vec<CatalogHit>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegenerationReport {
    pub ngram_size: usize,
    pub backend: TokenizerBackendKind,
    pub average_severity: Severity,
    pub peak_severity: Severity,
    pub summary: String,
    pub result: MetricResult,
    pub turns: Vec<TurnBreakdown>,
}

fn catalog_hits(catalog: &RefusalCatalog, matches: &[String]) -> Vec<CatalogHit> {
    catalog
        .phrases()
        .iter()
        .map(|phrase| CatalogHit {
            phrase: phrase.clone(),
            matched: matches.contains(phrase),
        })
        .collect()
}

/// Explain every analyzed turn of `result`.
pub fn build_report(
    result: MetricResult,
    ngram_size: usize,
    backend: TokenizerBackendKind,
    catalog: &RefusalCatalog,
    options: ReportOptions,
) -> DegenerationReport {
    let turns: Vec<TurnBreakdown> = result
        .per_turn
        .iter()
        .enumerate()
        .map(|(index, turn)| {
            let overlap = index.checked_sub(1).map(|prev| {
                overlap_breakdown(
                    &result.per_turn[prev].analysis_tokens,
                    &turn.analysis_tokens,
                    options.overlap_top_k,
                )
            });
            TurnBreakdown {
                index,
                severity: Severity::of(turn.degeneration_score),
                highlights: highlight_spans(turn.content(), &turn.tokens),
                distribution: token_distribution(&turn.analysis_tokens, options.distribution_top_k),
                ngrams: ngram_stats(&turn.analysis_tokens, ngram_size),
                overlap,
                catalog_hits: catalog_hits(catalog, &turn.fallback_matches),
            }
        })
        .collect();

    let average_severity = Severity::of(result.average_score);
    let peak_severity = Severity::of(result.peak_score);
    let summary = summarize(&result, average_severity);

    DegenerationReport {
        ngram_size,
        backend,
        average_severity,
        peak_severity,
        summary,
        result,
        turns,
    }
}

/// Run `analyzer` over `turns` and explain the result.
pub fn analyze_and_report(
    analyzer: &TokenBasedDegenerationAnalyzer,
    turns: &[Turn],
    options: ReportOptions,
) -> Result<DegenerationReport, MetricError> {
    let result = analyzer.analyze(turns)?;
    Ok(build_report(
        result,
        analyzer.ngram_size(),
        analyzer.tokenizer().backend(),
        analyzer.catalog(),
        options,
    ))
}
