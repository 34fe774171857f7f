pub mod gemini;

pub use gemini::GeminiClient;

use thiserror::Error;

/// Failure categories for the AI guide path. Each maps to a distinct
/// user-facing message; none is retried automatically.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("API key is not configured")]
    MissingCredentials,
    #[error("request timed out")]
    Timeout,
    #[error("API quota exceeded")]
    QuotaExceeded,
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },
    #[error("network error: {0}")]
    Network(reqwest::Error),
    #[error("empty response from the model")]
    EmptyResponse,
}

impl AiError {
    /// Inline text shown to the visitor when the AI guide fails.
    pub fn user_message(&self) -> String {
        match self {
            AiError::MissingCredentials => {
                "The AI guide is not set up yet. You can still ask me anything about the \
                 palace and I will answer from the visitor guide."
                    .to_string()
            }
            AiError::Timeout => {
                "The AI guide is taking too long to answer. Please try again in a moment."
                    .to_string()
            }
            AiError::QuotaExceeded => {
                "The AI guide is very busy right now. Please try again a little later."
                    .to_string()
            }
            AiError::Api { .. } | AiError::Network(_) | AiError::EmptyResponse => {
                "Something went wrong reaching the AI guide. Please try again."
                    .to_string()
            }
        }
    }
}

/// Folds a transport error into the taxonomy, keeping timeouts distinct.
pub(crate) fn classify_transport(err: reqwest::Error) -> AiError {
    if err.is_timeout() {
        AiError::Timeout
    } else {
        AiError::Network(err)
    }
}
