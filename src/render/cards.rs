//! Text result cards.
//!
//! Each stored result renders as a card with its title, the result text,
//! the confidence percentage and, when present, the sentiment label.

use crate::models::{AnalysisKind, AnalysisResult};
use crate::orchestrator::SessionState;
use std::collections::BTreeMap;

/// Render a single result card.
pub fn render_card(kind: AnalysisKind, result: &AnalysisResult, show_metadata: bool) -> String {
    let mut card = String::new();

    card.push_str(&format!("{}\n", kind.title()));
    card.push_str(&format!("{}\n", "─".repeat(40)));
    card.push_str(&format!("{}\n\n", result.result_text.trim()));
    card.push_str(&format!("Confidence: {}%\n", result.confidence_percent()));

    if let Some(sentiment) = result.sentiment() {
        card.push_str(&format!("Sentiment: {} {}\n", sentiment.emoji(), sentiment));
    }

    if show_metadata {
        if !result.metadata.themes.is_empty() {
            card.push_str(&format!("Themes: {}\n", result.metadata.themes.join(", ")));
        }
        let metadata = &result.metadata;
        let mut details = vec![format!("Model: {}", metadata.model)];
        if let Some(words) = metadata.word_count {
            details.push(format!("Words: {}", words));
        }
        if let (Some(original), Some(summary)) =
            (metadata.original_length, metadata.summary_length)
        {
            details.push(format!("Words: {} → {}", original, summary));
        }
        card.push_str(&format!("{}\n", details.join(" · ")));
    }

    card
}

/// Render the results view: every stored result, or an empty-state hint.
pub fn render_results(
    results: &BTreeMap<AnalysisKind, AnalysisResult>,
    show_metadata: bool,
) -> String {
    let mut output = String::from("🤖 AI Analysis Results\n\n");

    if results.is_empty() {
        output.push_str("No analysis results yet.\n");
        output.push_str("Switch to the write view to analyze your journal entry.\n");
        return output;
    }

    let cards: Vec<String> = results
        .iter()
        .map(|(kind, result)| render_card(*kind, result, show_metadata))
        .collect();
    output.push_str(&cards.join("\n"));

    output
}

/// Render the write view: the current entry and the available analyses.
pub fn render_write_view(entry: &str, state: &SessionState) -> String {
    let mut output = String::from("📝 Journal Entry\n\n");

    if entry.trim().is_empty() {
        output.push_str("  (empty: type your thoughts, one line at a time)\n");
    } else {
        for line in entry.lines() {
            output.push_str(&format!("  │ {}\n", line));
        }
    }

    output.push('\n');
    for kind in AnalysisKind::ALL {
        let status = if state.is_busy(kind) {
            format!("🔄 {}", kind.busy_label())
        } else if state.result(kind).is_some() {
            "✅ done".to_string()
        } else {
            String::new()
        };
        output.push_str(format!("  :{:<10} {}", kind.as_str(), status).trim_end());
        output.push('\n');
    }
    output.push_str("  :all        run all three\n");

    output
}
