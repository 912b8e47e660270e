//! Failure taxonomy shared by both generative service clients

use thiserror::Error;

/// Errors surfaced by the text and image service boundaries
///
/// The executor's scheduling logic treats every variant identically
/// (fatal to the task, recoverable only by the per-agent policies), but
/// each variant carries a human-readable message and a suggested
/// recovery action so outer layers can surface something actionable.
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("content policy rejection: {0}")]
    ContentPolicy(String),

    #[error("service error: {0}")]
    Server(String),
}

impl ServiceError {
    /// Suggested recovery action for the end user
    pub fn recovery_action(&self) -> &'static str {
        match self {
            ServiceError::Auth(_) => "Check that your API key is valid and has not expired",
            ServiceError::RateLimited(_) => "Wait a moment and retry, or reduce the batch size",
            ServiceError::ContentPolicy(_) => {
                "Rephrase the company description or image style and try again"
            }
            ServiceError::Server(_) => "Retry the generation; the service may be temporarily down",
        }
    }

    /// Classify an HTTP error response from either service
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => ServiceError::Auth(message),
            429 => ServiceError::RateLimited(message),
            400 => {
                let lowered = message.to_lowercase();
                if lowered.contains("content policy")
                    || lowered.contains("safety")
                    || lowered.contains("blocked")
                {
                    ServiceError::ContentPolicy(message)
                } else {
                    ServiceError::Server(message)
                }
            }
            _ => ServiceError::Server(message),
        }
    }
}
