//! JSON results document.

use crate::models::{AnalysisKind, AnalysisResult};
use crate::orchestrator::AnalysisError;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// A failed analysis, as reported in the JSON document.
#[derive(Debug, Clone, Serialize)]
pub struct FailureEntry {
    pub kind: AnalysisKind,
    pub message: String,
}

/// Machine-readable snapshot of a session's results.
#[derive(Debug, Clone, Serialize)]
pub struct ResultsDocument<'a> {
    /// When the document was produced.
    pub generated_at: DateTime<Utc>,
    /// Backend the results came from.
    pub api_base_url: &'a str,
    /// Stored results keyed by kind.
    pub results: &'a BTreeMap<AnalysisKind, AnalysisResult>,
    /// Analyses that failed in this run.
    pub failures: Vec<FailureEntry>,
}

impl<'a> ResultsDocument<'a> {
    /// Build a document from stored results and this run's failures.
    pub fn new(
        api_base_url: &'a str,
        results: &'a BTreeMap<AnalysisKind, AnalysisResult>,
        failures: &[&AnalysisError],
    ) -> Self {
        let failures = failures
            .iter()
            .filter_map(|e| {
                e.kind().map(|kind| FailureEntry {
                    kind,
                    message: e.to_string(),
                })
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            api_base_url,
            results,
            failures,
        }
    }
}

/// Generate a pretty-printed JSON document.
pub fn generate_json_results(document: &ResultsDocument<'_>) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}
