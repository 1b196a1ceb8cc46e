//! Loading indicator for requests in flight.

use crate::models::AnalysisKind;
use crate::orchestrator::SessionState;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner that follows the session's busy flags.
///
/// A spinner is shown while any kind is busy and cleared once every request
/// has settled.
pub struct BusyIndicator {
    visible: bool,
    spinner: Option<ProgressBar>,
}

impl BusyIndicator {
    pub fn new(visible: bool) -> Self {
        Self {
            visible,
            spinner: None,
        }
    }

    /// Sync the spinner with the busy flags in `state`.
    pub fn update(&mut self, state: &SessionState) {
        let busy = state.busy_kinds();

        if busy.is_empty() {
            if let Some(spinner) = self.spinner.take() {
                spinner.finish_and_clear();
            }
            return;
        }

        if !self.visible {
            return;
        }

        let spinner = self.spinner.get_or_insert_with(new_spinner);
        spinner.set_message(busy_message(&busy));
    }
}

fn new_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Spinner text for the kinds in flight.
pub fn busy_message(kinds: &[AnalysisKind]) -> String {
    match kinds {
        [kind] => format!("🔄 {}", kind.busy_label()),
        _ => {
            let labels: Vec<&str> = kinds.iter().map(|k| k.as_str()).collect();
            format!("🔄 Analyzing ({})...", labels.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy_message() {
        assert_eq!(
            busy_message(&[AnalysisKind::Summarize]),
            "🔄 Summarizing..."
        );
        assert_eq!(
            busy_message(&AnalysisKind::ALL),
            "🔄 Analyzing (summarize, sentiment, insights)..."
        );
    }

    #[test]
    fn test_spinner_follows_busy_flags() {
        let mut state = SessionState::new();
        let mut indicator = BusyIndicator::new(true);

        state.begin("entry", AnalysisKind::Insights).unwrap();
        indicator.update(&state);
        let spinner = indicator.spinner.clone().unwrap();
        assert_eq!(spinner.message(), "🔄 Extracting...");

        let _ = state.settle(
            AnalysisKind::Insights,
            Err(crate::client::RequestError::Invalid("x".to_string())),
        );
        indicator.update(&state);
        assert!(indicator.spinner.is_none());
        assert!(spinner.is_finished());
    }

    #[test]
    fn test_hidden_indicator_never_spins() {
        let mut state = SessionState::new();
        let mut indicator = BusyIndicator::new(false);

        state.begin("entry", AnalysisKind::Summarize).unwrap();
        indicator.update(&state);
        assert!(indicator.spinner.is_none());
    }
}
