//! Per-session analysis state: stored results and busy flags.

use super::AnalysisError;
use crate::client::RequestError;
use crate::models::{AnalysisKind, AnalysisRequest, AnalysisResult};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Results and in-flight flags for the current session.
///
/// Every kind has exactly one busy flag. A stored result always comes from
/// the most recent successful request for its kind.
#[derive(Debug, Clone)]
pub struct SessionState {
    results: BTreeMap<AnalysisKind, AnalysisResult>,
    busy: BTreeMap<AnalysisKind, bool>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            results: BTreeMap::new(),
            busy: AnalysisKind::ALL.iter().map(|&k| (k, false)).collect(),
        }
    }
}

impl SessionState {
    /// Creates an empty state with every busy flag cleared.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `text` and mark `kind` as in flight.
    ///
    /// On validation failure nothing changes.
    pub fn begin(&mut self, text: &str, kind: AnalysisKind) -> Result<AnalysisRequest, AnalysisError> {
        let text = validate_text(text)?;
        self.busy.insert(kind, true);
        debug!("{} request started", kind);

        Ok(AnalysisRequest {
            text: text.to_string(),
            kind,
        })
    }

    /// Apply the outcome of a request for `kind` and clear its busy flag.
    ///
    /// A failed outcome leaves any previously stored result in place.
    pub fn settle(
        &mut self,
        kind: AnalysisKind,
        outcome: Result<AnalysisResult, RequestError>,
    ) -> Result<(), AnalysisError> {
        self.busy.insert(kind, false);

        match outcome {
            Ok(result) => {
                debug!("{} request succeeded", kind);
                self.results.insert(kind, result);
                Ok(())
            }
            Err(source) => {
                warn!("{} request failed: {}", kind, source);
                Err(AnalysisError::RequestFailed { kind, source })
            }
        }
    }

    /// Whether a request for `kind` is in flight.
    pub fn is_busy(&self, kind: AnalysisKind) -> bool {
        self.busy.get(&kind).copied().unwrap_or(false)
    }

    /// Kinds with a request in flight, in display order.
    pub fn busy_kinds(&self) -> Vec<AnalysisKind> {
        self.busy
            .iter()
            .filter(|(_, busy)| **busy)
            .map(|(kind, _)| *kind)
            .collect()
    }

    /// Stored result for `kind`, if any.
    pub fn result(&self, kind: AnalysisKind) -> Option<&AnalysisResult> {
        self.results.get(&kind)
    }

    /// All stored results, in display order.
    pub fn results(&self) -> &BTreeMap<AnalysisKind, AnalysisResult> {
        &self.results
    }
}

/// Check that `text` has content; returns it unchanged.
pub fn validate_text(text: &str) -> Result<&str, AnalysisError> {
    if text.trim().is_empty() {
        return Err(AnalysisError::Validation);
    }
    Ok(text)
}
