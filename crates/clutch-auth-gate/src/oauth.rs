//! OAuth sign-in protocol.

use crate::classify::classify_rejection;
use crate::{
    confirm_signed_in, ConfirmOutcome, Notifier, OAuthFailure, RetryConfig, Route, Router,
    NAVIGATION_TIMEOUT_MESSAGE,
};
use clutch_identity::{AuthStatusSignal, CredentialFlow, OAuthFlow, OAuthOutcome};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, info};

/// Runs the browser based sign-in sequence once per button press.
///
/// A press while a previous run is still pending is swallowed, so the
/// external browser is never opened twice concurrently. User cancellation
/// is terminal and silent.
pub struct OAuthController<O, C, S, R, N> {
    oauth: O,
    credentials: C,
    signal: S,
    router: R,
    notifier: N,
    retry: RetryConfig,
    in_flight: AtomicBool,
}

impl<O, C, S, R, N> OAuthController<O, C, S, R, N>
where
    O: OAuthFlow,
    C: CredentialFlow,
    S: AuthStatusSignal,
    R: Router,
    N: Notifier,
{
    pub fn new(oauth: O, credentials: C, signal: S, router: R, notifier: N, retry: RetryConfig) -> Self {
        Self {
            oauth,
            credentials,
            signal,
            router,
            notifier,
            retry,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Handle an OAuth button press.
    pub async fn press(&self) {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            debug!("ignoring oauth press, a run is already in flight");
            return;
        }

        self.run().await;
        self.in_flight.store(false, Ordering::SeqCst);
    }

    async fn run(&self) {
        let outcome = match self.oauth.start().await {
            Ok(outcome) => outcome,
            Err(err) if err.is_cancellation() => {
                // The user backed out of the browser. Not an error.
                debug!(code = ?err.code, "oauth flow cancelled by user");
                return;
            }
            Err(err) => {
                let failure = classify_rejection(&err);
                error!(%err, "oauth flow rejected");
                self.notifier.alert("OAuth Error", &failure.to_string());
                return;
            }
        };

        let session_id = match outcome {
            OAuthOutcome::Session { session_id } => session_id,
            OAuthOutcome::NoSession => {
                // The callback resolved but yielded nothing to activate.
                self.notifier
                    .alert("OAuth Error", &OAuthFailure::Incomplete.to_string());
                return;
            }
        };

        if let Err(err) = self.credentials.activate(&session_id).await {
            error!(%err, session_id, "session activation failed after oauth");
            self.notifier
                .alert("OAuth Error", &OAuthFailure::ActivationFailed.to_string());
            return;
        }

        match confirm_signed_in(&self.signal, &self.retry).await {
            ConfirmOutcome::Confirmed => {
                info!(session_id, "oauth sign-in complete");
                self.router.replace(Route::App);
            }
            ConfirmOutcome::TimedOut => {
                self.notifier.alert_with_recovery(
                    "Navigation Error",
                    NAVIGATION_TIMEOUT_MESSAGE,
                    "Restart",
                );
            }
        }
    }
}
