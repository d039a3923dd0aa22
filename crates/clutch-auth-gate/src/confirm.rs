//! Navigation-confirmation retry.
//!
//! The provider's status signal updates asynchronously and can lag behind a
//! session activation that already resolved. Navigating on the activation
//! call's return value alone can land the user on a protected screen whose
//! guard immediately bounces them back. Instead, poll the signal on a fixed
//! interval until it confirms the session, bounded so a wedged provider
//! cannot strand the user in a spinner forever.

use clutch_identity::AuthStatusSignal;
use std::time::Duration;
use tracing::{debug, warn};

/// Message surfaced when confirmation never arrives. The credentials were
/// valid, so the copy must not ask the user to retry them.
pub const NAVIGATION_TIMEOUT_MESSAGE: &str =
    "Authentication was successful but navigation failed. Please restart the app.";

/// Bounds for the confirmation poll.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of signal checks before giving up.
    pub max_attempts: u32,
    /// Fixed delay between checks.
    pub interval: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            interval: Duration::from_millis(100),
        }
    }
}

/// Terminal states of the confirmation poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// The signal reported a signed-in, loaded state within bounds.
    Confirmed,
    /// The attempt bound was reached without confirmation.
    TimedOut,
}

/// Poll `signal` until it confirms a signed-in state, or the bound is hit.
///
/// The first check is immediate, so an already-propagated state confirms
/// without sleeping.
pub async fn confirm_signed_in<S: AuthStatusSignal>(
    signal: &S,
    config: &RetryConfig,
) -> ConfirmOutcome {
    for attempt in 1..=config.max_attempts {
        let snapshot = signal.snapshot();
        if snapshot.is_loaded && snapshot.is_signed_in {
            debug!(attempt, "auth state confirmed");
            return ConfirmOutcome::Confirmed;
        }
        if attempt < config.max_attempts {
            tokio::time::sleep(config.interval).await;
        }
    }

    warn!(
        max_attempts = config.max_attempts,
        "auth state never confirmed after activation"
    );
    ConfirmOutcome::TimedOut
}
