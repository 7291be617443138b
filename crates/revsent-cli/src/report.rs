//! Plain-text rendering of analysis results.

use std::fmt::Write;

use revsent_core::{ProductMetrics, SentimentLabel};
use revsent_sentiment::{AnalysisOutcome, Comparison, ProductAnalysis};

/// Prefers the page's own rendering of a count, e.g. `1,204`.
fn count_label(display: Option<&str>, count: Option<u64>) -> String {
    match (display, count) {
        (Some(display), _) => display.to_string(),
        (None, Some(count)) => count.to_string(),
        (None, None) => "N/A".to_string(),
    }
}

pub(crate) fn render_metrics(url: &str, metrics: &ProductMetrics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Product: {url}");
    let _ = writeln!(
        out,
        "  Total ratings: {}",
        count_label(metrics.ratings_display.as_deref(), metrics.ratings_count)
    );
    let _ = writeln!(
        out,
        "  Total reviews: {}",
        count_label(metrics.reviews_display.as_deref(), metrics.reviews_count)
    );
    out
}

fn render_samples(
    out: &mut String,
    analysis: &ProductAnalysis,
    label: SentimentLabel,
    limit: Option<usize>,
) {
    let marker = if label.is_positive() { '+' } else { '-' };
    let _ = writeln!(out, "\n{label} reviews:");

    let mut texts = analysis.texts_with(label).peekable();
    if texts.peek().is_none() {
        let _ = writeln!(out, "  (none)");
        return;
    }
    for text in texts.take(limit.unwrap_or(usize::MAX)) {
        let _ = writeln!(out, "  {marker} {text}");
    }
}

/// Renders one product. `sample_limit` caps the reviews listed per label;
/// `None` lists all of them.
pub(crate) fn render_outcome(outcome: &AnalysisOutcome, sample_limit: Option<usize>) -> String {
    match outcome {
        AnalysisOutcome::NoReviews { url, metrics } => {
            let mut out = render_metrics(url, metrics);
            let _ = writeln!(out, "No reviews found for this product.");
            out
        }
        AnalysisOutcome::Analyzed(analysis) => {
            let mut out = render_metrics(&analysis.url, &analysis.metrics);
            let _ = writeln!(out, "  Analyzed reviews: {}", analysis.total());
            let _ = writeln!(
                out,
                "  Positive: {} ({:.1}%)",
                analysis.positive, analysis.positive_percentage
            );
            let _ = writeln!(out, "  Negative: {}", analysis.negative);
            render_samples(&mut out, analysis, SentimentLabel::Positive, sample_limit);
            render_samples(&mut out, analysis, SentimentLabel::Negative, sample_limit);
            out
        }
    }
}

pub(crate) fn render_comparison(comparison: &Comparison, samples: usize) -> String {
    if comparison.both().is_none() {
        return "One or both products have no reviews available.\n".to_string();
    }

    let mut out = String::new();
    for (index, outcome) in [&comparison.first, &comparison.second].into_iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "== Product {} ==", index + 1);
        out.push_str(&render_outcome(outcome, Some(samples)));
    }
    out
}
