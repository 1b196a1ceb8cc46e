//! Failures of a single backend request.

use thiserror::Error;

/// Why a request to the backend did not produce a result.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The backend answered with a non-success HTTP status.
    #[error("AI service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The backend could not be reached at all.
    #[error("cannot connect to AI service at {url}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Any other transport-level failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not a valid analysis result.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The body parsed but violates a value constraint.
    #[error("invalid response: {0}")]
    Invalid(String),
}

impl RequestError {
    /// Short user-facing description, without transport details.
    pub fn user_message(&self) -> &'static str {
        match self {
            RequestError::Connect { .. } | RequestError::Transport(_) => {
                "Error connecting to AI service"
            }
            RequestError::Status { .. } | RequestError::Decode(_) | RequestError::Invalid(_) => {
                "Failed to process text"
            }
        }
    }
}
