use std::fmt::Write;

use super::{DegenerationReport, SpanKind};
use crate::signals::{MetricResult, Severity};

/// One-line human-readable summary of a conversation
pub fn summarize(result: &MetricResult, severity: Severity) -> String {
    let mut summary_parts = Vec::new();

    summary_parts.push(format!("Overall Degeneration: {}", severity));
    summary_parts.push(format!(
        "Average: {:.3} | Peak: {:.3}",
        result.average_score, result.peak_score
    ));
    summary_parts.push(format!("Assistant Turns: {}", result.per_turn.len()));

    let refusals = result.per_turn.iter().filter(|t| t.fallback_hit).count();
    if refusals > 0 {
        summary_parts.push(format!("⚠️ Refusal templates: {} turns", refusals));
    }

    let looping = result
        .per_turn
        .iter()
        .filter(|t| t.repetition_ratio >= 0.5)
        .count();
    if looping > 0 {
        summary_parts.push(format!("⚠️ Looping detected: {} turns", looping));
    }

    summary_parts.join(" | ")
}

fn percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

/// Multi-line plain-text rendering of a report
pub fn render_text(report: &DegenerationReport) -> String {
    let mut out = String::new();
    let result = &report.result;

    let _ = writeln!(out, "{}", report.summary);
    let _ = writeln!(
        out,
        "tokenizer: {} | n-gram size: {}",
        report.backend, report.ngram_size
    );

    for (turn, breakdown) in result.per_turn.iter().zip(&report.turns) {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "── assistant turn #{} ── score {:.3} ({})",
            breakdown.index + 1,
            turn.degeneration_score,
            breakdown.severity
        );

        let marked: String = breakdown
            .highlights
            .iter()
            .map(|span| match span.kind {
                SpanKind::Analysis => format!("[{}]", span.text),
                SpanKind::Filtered | SpanKind::Plain => span.text.clone(),
            })
            .collect();
        let _ = writeln!(out, "  tokens:      {}", marked);

        let _ = writeln!(
            out,
            "  diversity:   loss {:.3} (H {:.3} / H_max {:.3} bits, {} types)",
            turn.normalized_entropy,
            turn.entropy,
            turn.entropy_max,
            breakdown.distribution.token_types
        );
        if let Some(top) = breakdown.distribution.shares.first() {
            let _ = writeln!(
                out,
                "               most frequent \"{}\" x{} ({})",
                top.token,
                top.count,
                percent(top.probability)
            );
        }

        let ngrams = &breakdown.ngrams;
        if ngrams.insufficient {
            let _ = writeln!(
                out,
                "  repetition:  too short for {}-grams",
                report.ngram_size
            );
        } else {
            let _ = writeln!(
                out,
                "  repetition:  {:.3} ({} of {} {}-grams repeated)",
                turn.repetition_ratio, ngrams.repeated_patterns, ngrams.total_patterns, ngrams.n
            );
            for gram in ngrams.frequencies.iter().filter(|g| g.count > 1).take(3) {
                let _ = writeln!(out, "               \"{}\" x{}", gram.ngram, gram.count);
            }
        }

        match &breakdown.overlap {
            Some(overlap) => {
                let _ = writeln!(
                    out,
                    "  overlap:     {} ({} shared of {} types)",
                    percent(overlap.overlap),
                    overlap.intersection,
                    overlap.union
                );
            }
            None => {
                let _ = writeln!(out, "  overlap:     n/a (first assistant turn)");
            }
        }

        if turn.fallback_hit {
            let _ = writeln!(out, "  refusal:     {}", turn.fallback_matches.join(", "));
        } else {
            let _ = writeln!(out, "  refusal:     none");
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{analyze_and_report, ReportOptions};
    use crate::signals::TokenBasedDegenerationAnalyzer;
    use crate::tokenizer::RegexTokenizer;
    use common::conversation::Turn;
    use std::sync::Arc;

    fn report(turns: &[Turn]) -> DegenerationReport {
        let analyzer = TokenBasedDegenerationAnalyzer::new(Arc::new(RegexTokenizer::new()));
        analyze_and_report(&analyzer, turns, ReportOptions::default()).unwrap()
    }

    #[test]
    fn test_summary_flags_refusals() {
        let report = report(&[
            Turn::assistant("很抱歉，我无法回答。"),
            Turn::assistant("很抱歉，我无法回答。"),
        ]);
        assert!(report.summary.starts_with("Overall Degeneration: "));
        assert!(report.summary.contains("⚠️ Refusal templates: 2 turns"));
    }

    #[test]
    fn test_summary_without_flags() {
        let report = report(&[Turn::assistant("the weather is nice today")]);
        assert!(!report.summary.contains("⚠️"));
        assert!(report.summary.contains("Assistant Turns: 1"));
    }

    #[test]
    fn test_render_lists_every_turn() {
        let report = report(&[
            Turn::user("hi"),
            Turn::assistant("hello there, how are you"),
            Turn::assistant("I cannot help with that"),
        ]);
        let text = render_text(&report);
        assert!(text.contains("assistant turn #1"));
        assert!(text.contains("assistant turn #2"));
        assert!(text.contains("n/a (first assistant turn)"));
        assert!(text.contains("refusal:     I cannot"));
        assert!(text.contains("[hello]"));
    }
}
