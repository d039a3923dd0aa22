//! Credential sign-in protocol.

use crate::{
    confirm_signed_in, ConfirmOutcome, Notifier, OAuthFailure, RetryConfig, Route, Router,
    NAVIGATION_TIMEOUT_MESSAGE,
};
use clutch_identity::{AuthStatusSignal, CreateOutcome, CredentialFlow};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, info};

const VALIDATION_MESSAGE: &str = "Please fill in all fields";
const INCOMPLETE_MESSAGE: &str = "Unable to complete sign-in. Please try again.";

/// Runs the sign-in sequence once per button press: validate locally,
/// create, activate, confirm the signal, then navigate. At most one run is
/// in flight; a second press while one is pending is a no-op.
pub struct SignInController<C, S, R, N> {
    credentials: C,
    signal: S,
    router: R,
    notifier: N,
    retry: RetryConfig,
    in_flight: AtomicBool,
}

impl<C, S, R, N> SignInController<C, S, R, N>
where
    C: CredentialFlow,
    S: AuthStatusSignal,
    R: Router,
    N: Notifier,
{
    pub fn new(credentials: C, signal: S, router: R, notifier: N, retry: RetryConfig) -> Self {
        Self {
            credentials,
            signal,
            router,
            notifier,
            retry,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Handle a sign-in button press.
    ///
    /// Exactly one of {navigate, surface an error, ignore} happens per
    /// call; the in-flight flag is cleared on every terminal path.
    pub async fn submit(&self, identifier: &str, secret: &str) {
        if !self.credentials.is_ready() {
            debug!("ignoring sign-in press, credential flow not ready");
            return;
        }
        if self.in_flight.swap(true, Ordering::SeqCst) {
            debug!("ignoring sign-in press, a run is already in flight");
            return;
        }

        self.run(identifier, secret).await;
        self.in_flight.store(false, Ordering::SeqCst);
    }

    async fn run(&self, identifier: &str, secret: &str) {
        let identifier = identifier.trim();
        // Validation never reaches the network.
        if identifier.is_empty() || secret.trim().is_empty() {
            self.notifier.alert("Error", VALIDATION_MESSAGE);
            return;
        }

        // The identifier is trimmed; the secret is passed through raw.
        let outcome = match self.credentials.create(identifier, secret).await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(%err, "sign-in creation rejected");
                self.notifier.alert("Sign-in Failed", &err.display_message());
                return;
            }
        };

        let session_id = match outcome {
            CreateOutcome::Complete { session_id } => session_id,
            other => {
                // Statuses needing extra steps are not handled on this
                // screen; no session is activated.
                debug!(?other, "sign-in did not complete");
                self.notifier.alert("Error", INCOMPLETE_MESSAGE);
                return;
            }
        };

        if let Err(err) = self.credentials.activate(&session_id).await {
            error!(%err, session_id, "session activation failed after sign-in");
            self.notifier.alert_with_recovery(
                "Sign-in Error",
                &OAuthFailure::ActivationFailed.to_string(),
                "Restart",
            );
            return;
        }

        match confirm_signed_in(&self.signal, &self.retry).await {
            ConfirmOutcome::Confirmed => {
                info!(session_id, "sign-in complete");
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
