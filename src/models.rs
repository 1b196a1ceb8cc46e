//! Data models for the journal client.
//!
//! This module contains the analysis kinds, requests and results exchanged
//! with the AI backend, along with their wire representations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The analysis task a request asks the backend to perform.
///
/// The kind selects both the endpoint (`/api/ai/{kind}`) and the key the
/// result is stored under.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisKind {
    /// Condense the entry into a short summary
    Summarize,
    /// Classify the emotional tone of the entry
    Sentiment,
    /// Extract personal insights and themes
    Insights,
}

impl AnalysisKind {
    /// Every kind, in display order.
    pub const ALL: [AnalysisKind; 3] = [
        AnalysisKind::Summarize,
        AnalysisKind::Sentiment,
        AnalysisKind::Insights,
    ];

    /// The identifier used in endpoint paths and `task_type` fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisKind::Summarize => "summarize",
            AnalysisKind::Sentiment => "sentiment",
            AnalysisKind::Insights => "insights",
        }
    }

    /// Path of the backend endpoint for this kind, relative to the base URL.
    pub fn endpoint_path(&self) -> String {
        format!("/api/ai/{}", self.as_str())
    }

    /// Title shown on the result card.
    pub fn title(&self) -> &'static str {
        match self {
            AnalysisKind::Summarize => "📋 Summary",
            AnalysisKind::Sentiment => "😊 Sentiment Analysis",
            AnalysisKind::Insights => "🎯 Key Insights",
        }
    }

    /// Label shown while a request for this kind is in flight.
    pub fn busy_label(&self) -> &'static str {
        match self {
            AnalysisKind::Summarize => "Summarizing...",
            AnalysisKind::Sentiment => "Analyzing...",
            AnalysisKind::Insights => "Extracting...",
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Emotional tone reported by the sentiment endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    /// Any label the backend sends that we don't recognize (it sends
    /// `"unknown"` when no classification was made).
    #[serde(other)]
    Unknown,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "positive"),
            Sentiment::Negative => write!(f, "negative"),
            Sentiment::Neutral => write!(f, "neutral"),
            Sentiment::Unknown => write!(f, "unknown"),
        }
    }
}

impl Sentiment {
    /// Returns an emoji representation of the sentiment.
    pub fn emoji(&self) -> &'static str {
        match self {
            Sentiment::Positive => "😊",
            Sentiment::Negative => "😔",
            Sentiment::Neutral => "😐",
            Sentiment::Unknown => "❔",
        }
    }
}

/// A single analysis request, built from validated journal text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    /// The journal text, as entered.
    pub text: String,
    /// The task to run. Serialized as `task_type` on the wire.
    #[serde(rename = "task_type")]
    pub kind: AnalysisKind,
}

/// Result metadata produced by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultMetadata {
    /// Number of words the backend counted in the entry. Summaries report
    /// `original_length` instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<u32>,
    /// Sentiment label, only present for sentiment analyses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    /// Model that produced the result.
    pub model: String,
    /// Themes found in the entry (insights only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub themes: Vec<String>,
    /// Word count of the entry that was summarized (summarize only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_length: Option<u32>,
    /// Word count of the produced summary (summarize only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_length: Option<u32>,
    /// Backend-side timestamp, passed through verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// A completed analysis as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Human-readable result text.
    #[serde(rename = "result")]
    pub result_text: String,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    /// Task echoed back by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_type: Option<AnalysisKind>,
    /// Additional details about the analysis.
    pub metadata: ResultMetadata,
}

impl AnalysisResult {
    /// Confidence as a rounded percentage, e.g. `0.92` -> `92`.
    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }

    /// Sentiment label, ignoring labels the backend could not classify.
    pub fn sentiment(&self) -> Option<Sentiment> {
        self.metadata
            .sentiment
            .filter(|s| *s != Sentiment::Unknown)
    }
}

/// Response of the backend's `/health` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Reported status, `"healthy"` when the service is up.
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl HealthStatus {
    /// Whether the backend reported itself healthy.
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}
