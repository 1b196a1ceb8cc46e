//! Access to the remote AI backend.
//!
//! The orchestrator talks to the backend through [`AnalysisBackend`], so the
//! HTTP implementation can be swapped for a scripted one in tests.

pub mod error;
pub mod http;

pub use error::RequestError;
pub use http::HttpBackend;

use crate::models::{AnalysisRequest, AnalysisResult, HealthStatus};
use std::future::Future;

/// Something that can run a single analysis request to completion.
///
/// Implementations make exactly one attempt per call: no retries and no
/// timeouts.
pub trait AnalysisBackend {
    /// Run `request` and return the parsed result.
    fn analyze(
        &self,
        request: AnalysisRequest,
    ) -> impl Future<Output = Result<AnalysisResult, RequestError>>;

    /// Ask the backend whether it is up.
    fn health(&self) -> impl Future<Output = Result<HealthStatus, RequestError>>;
}
