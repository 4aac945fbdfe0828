use std::time::Duration;

use crate::reputation::retry::DeadlineExceeded;

/// Failure modes of the generative model path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AiError {
    #[error("AI credential is not configured")]
    MissingCredential,
    #[error("AI request timed out after {}s", .after.as_secs())]
    Timeout { after: Duration },
    #[error("AI service unavailable: {0}")]
    Unavailable(String),
    #[error("AI service rejected credentials: {0}")]
    Auth(String),
    #[error("AI service rejected the request: {0}")]
    Rejected(String),
    #[error("AI service returned malformed data: {0}")]
    MalformedResponse(String),
    #[error("AI service error: {0}")]
    Upstream(String),
}

/// Coarse category used to pick the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiFailureKind {
    Timeout,
    Unavailable,
    Other,
}

impl AiError {
    /// Only overload and deadline failures are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AiError::Timeout { .. } | AiError::Unavailable(_))
    }

    pub fn kind(&self) -> AiFailureKind {
        match self {
            AiError::Timeout { .. } => AiFailureKind::Timeout,
            AiError::Unavailable(_) => AiFailureKind::Unavailable,
            _ => AiFailureKind::Other,
        }
    }

    /// Message safe to show end users; internal detail stays in `Display`.
    pub fn user_message(&self) -> String {
        match self.kind() {
            AiFailureKind::Timeout => {
                "The AI service is taking too long to respond. Please try again in a few minutes."
                    .to_string()
            }
            AiFailureKind::Unavailable => {
                "The AI service is overloaded. Please try again in a few minutes.".to_string()
            }
            AiFailureKind::Other => format!("AI service error: {self}"),
        }
    }
}

impl From<DeadlineExceeded> for AiError {
    fn from(value: DeadlineExceeded) -> Self {
        AiError::Timeout { after: value.after }
    }
}
