//! Degeneration signals
//!
//! Four independent per-turn signals (diversity loss, n-gram repetition,
//! inter-turn overlap, refusal-template matching) and their aggregation into
//! one bounded score per assistant turn.

pub mod aggregate;
pub mod analyzer;
pub mod entropy;
pub mod ngram;
pub mod overlap;
pub mod punctuation;
pub mod refusal;

pub use aggregate::{aggregate_scores, degeneration_score, ConversationScore, Severity};
pub use analyzer::{
    calculate_degeneration_metric, AnalysisOutcome, AnalyzedTurn, DegenerationAnalyzer,
    MetricResult, TokenBasedDegenerationAnalyzer,
};
pub use entropy::{estimate_entropy, EntropyStats};
pub use ngram::{ngram_stats, repetition_ratio, NgramCount, NgramStats};
pub use overlap::{jaccard_overlap, overlap_breakdown, OverlapBreakdown, SharedToken};
pub use punctuation::{filter_punctuation, is_non_semantic_token};
pub use refusal::{RefusalCatalog, DEFAULT_REFUSAL_PHRASES};
