//! Structured provider rejection.

use serde::Deserialize;
use thiserror::Error;

/// Fallback text when a rejection carries no usable message.
pub const FALLBACK_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Error codes the provider uses for a user-dismissed OAuth flow.
/// Checked by exact equality; cancellation is expected, not a failure.
const CANCELLATION_CODES: &[&str] = &["user_cancelled", "flow_cancelled"];

/// One entry of a provider error list.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ErrorDetail {
    /// Human-readable message for this entry.
    pub message: String,
}

/// Rejection from an identity-provider call.
///
/// The provider reports failures as an array of messages, a flat message,
/// an error code, or any combination. [`ProviderError::display_message`]
/// resolves them in that order.
#[derive(Debug, Clone, Default, Error, Deserialize)]
#[error("{}", self.display_message())]
pub struct ProviderError {
    /// Machine-readable code (e.g. `user_cancelled`, `oauth_callback_error`).
    #[serde(default)]
    pub code: Option<String>,
    /// Flat message.
    #[serde(default)]
    pub message: Option<String>,
    /// Structured message list; the first entry wins when present.
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

impl ProviderError {
    /// Build a rejection carrying only a flat message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: Some(message.into()),
            errors: Vec::new(),
        }
    }

    /// Build a rejection with a code and a flat message.
    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: Some(message.into()),
            errors: Vec::new(),
        }
    }

    /// Resolve the user-facing message: structured list first, then the
    /// flat message, then a generic fallback.
    pub fn display_message(&self) -> String {
        if let Some(detail) = self.errors.first() {
            if !detail.message.is_empty() {
                return detail.message.clone();
            }
        }
        match &self.message {
            Some(message) if !message.is_empty() => message.clone(),
            _ => FALLBACK_ERROR_MESSAGE.to_string(),
        }
    }

    /// Whether this rejection means the user dismissed the provider's UI.
    pub fn is_cancellation(&self) -> bool {
        self.code
            .as_deref()
            .is_some_and(|code| CANCELLATION_CODES.contains(&code))
    }

    /// Whether the code or flat message contains the given needle.
    /// Used for coarse bucket classification of OAuth failures.
    pub fn mentions(&self, needle: &str) -> bool {
        self.code.as_deref().is_some_and(|c| c.contains(needle))
            || self.message.as_deref().is_some_and(|m| m.contains(needle))
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        Self::with_code("network_error", err.to_string())
    }
}
