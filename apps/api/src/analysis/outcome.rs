//! Typed result of a collaborator call that is allowed to fail.
//!
//! Every optional-enrichment call (classification, detail extraction, narrative
//! generation) resolves to an `Outcome`: either the value the collaborator
//! produced, or a documented fallback plus the reason it was needed. The
//! pipeline unwraps outcomes explicitly, so no collaborator error can escape it.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::llm_client::LlmError;

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Produced(T),
    Fallback { value: T, reason: String },
}

impl<T> Outcome<T> {
    pub fn fallback(value: T, reason: impl Into<String>) -> Self {
        Outcome::Fallback {
            value,
            reason: reason.into(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Outcome::Fallback { .. })
    }

    #[cfg(test)]
    pub fn value(&self) -> &T {
        match self {
            Outcome::Produced(value) | Outcome::Fallback { value, .. } => value,
        }
    }

    /// Consumes the outcome, logging the reason when a fallback was used.
    pub fn into_value(self, collaborator: &str) -> T {
        match self {
            Outcome::Produced(value) => value,
            Outcome::Fallback { value, reason } => {
                warn!(collaborator, %reason, "collaborator degraded to fallback");
                value
            }
        }
    }
}

/// Runs a collaborator call under a hard deadline.
pub async fn with_timeout<T, F>(limit: Duration, call: F) -> Result<T, LlmError>
where
    F: Future<Output = Result<T, LlmError>>,
{
    tokio::time::timeout(limit, call)
        .await
        .unwrap_or(Err(LlmError::Timeout(limit)))
}
