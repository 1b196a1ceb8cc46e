//! Analysis orchestration.
//!
//! The orchestrator owns the session state and a backend. It runs single
//! analyses and the three-way "analyze all" batch, which joins on every
//! request settling rather than on the first failure.

pub mod state;

pub use state::{validate_text, SessionState};

use crate::client::{AnalysisBackend, RequestError};
use crate::models::AnalysisKind;
use futures::stream::{FuturesUnordered, StreamExt};
use thiserror::Error;
use tracing::{debug, info};

/// Errors surfaced to the caller of an analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The journal text was empty after trimming. No request was sent.
    #[error("Please enter some journal text")]
    Validation,

    /// The request for `kind` did not produce a result.
    #[error("{kind} analysis failed: {source}")]
    RequestFailed {
        kind: AnalysisKind,
        #[source]
        source: RequestError,
    },
}

impl AnalysisError {
    /// The kind a request failure belongs to.
    pub fn kind(&self) -> Option<AnalysisKind> {
        match self {
            AnalysisError::Validation => None,
            AnalysisError::RequestFailed { kind, .. } => Some(*kind),
        }
    }
}

/// Outcome of one kind within an analyze-all batch.
#[derive(Debug)]
pub struct Settlement {
    pub kind: AnalysisKind,
    pub outcome: Result<(), AnalysisError>,
}

/// Per-kind outcomes of an analyze-all batch, in completion order.
#[derive(Debug, Default)]
pub struct SettlementReport {
    pub settlements: Vec<Settlement>,
}

impl SettlementReport {
    /// Kinds whose request succeeded, in display order.
    pub fn succeeded(&self) -> Vec<AnalysisKind> {
        let mut kinds: Vec<_> = self
            .settlements
            .iter()
            .filter(|s| s.outcome.is_ok())
            .map(|s| s.kind)
            .collect();
        kinds.sort();
        kinds
    }

    /// Failures, in display order.
    pub fn failures(&self) -> Vec<&AnalysisError> {
        let mut failed: Vec<_> = self
            .settlements
            .iter()
            .filter_map(|s| s.outcome.as_ref().err().map(|e| (s.kind, e)))
            .collect();
        failed.sort_by_key(|(kind, _)| *kind);
        failed.into_iter().map(|(_, e)| e).collect()
    }

    /// Whether every request in the batch succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.settlements.iter().all(|s| s.outcome.is_ok())
    }
}

/// Callback run whenever busy flags change: after requests start and after
/// each one settles.
pub type BusyObserver = Box<dyn FnMut(&SessionState)>;

/// Runs analyses against a backend and records their outcomes.
pub struct AnalysisOrchestrator<B> {
    backend: B,
    state: SessionState,
    observer: Option<BusyObserver>,
}

impl<B: AnalysisBackend> AnalysisOrchestrator<B> {
    /// Create an orchestrator with empty session state.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: SessionState::new(),
            observer: None,
        }
    }

    /// Report busy-flag changes to `observer`, e.g. to drive a spinner.
    pub fn with_busy_observer(mut self, observer: impl FnMut(&SessionState) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Current session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The backend requests are sent to.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Run a single analysis of `text` for `kind`.
    pub async fn analyze(&mut self, text: &str, kind: AnalysisKind) -> Result<(), AnalysisError> {
        let request = self.state.begin(text, kind)?;
        notify(&mut self.observer, &self.state);

        let outcome = self.backend.analyze(request).await;
        let settled = self.state.settle(kind, outcome);
        notify(&mut self.observer, &self.state);
        settled
    }

    /// Run every kind concurrently and wait for all of them to settle.
    ///
    /// Only blank text fails the batch as a whole; individual request
    /// failures are reported per kind.
    pub async fn analyze_all(&mut self, text: &str) -> Result<SettlementReport, AnalysisError> {
        validate_text(text)?;

        let mut requests = Vec::with_capacity(AnalysisKind::ALL.len());
        for kind in AnalysisKind::ALL {
            requests.push(self.state.begin(text, kind)?);
        }

        debug!("In flight: {:?}", self.state.busy_kinds());
        notify(&mut self.observer, &self.state);

        let backend = &self.backend;
        let mut pending: FuturesUnordered<_> = requests
            .into_iter()
            .map(move |request| async move {
                let kind = request.kind;
                (kind, backend.analyze(request).await)
            })
            .collect();

        let mut report = SettlementReport::default();
        while let Some((kind, outcome)) = pending.next().await {
            let outcome = self.state.settle(kind, outcome);
            notify(&mut self.observer, &self.state);
            report.settlements.push(Settlement { kind, outcome });
        }

        info!(
            "Analyze-all settled: {} succeeded, {} failed",
            report.succeeded().len(),
            report.failures().len()
        );

        Ok(report)
    }
}

fn notify(observer: &mut Option<BusyObserver>, state: &SessionState) {
    if let Some(observer) = observer.as_mut() {
        observer(state);
    }
}
