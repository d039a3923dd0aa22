//! Registration and email-verification protocol.

use crate::{
    confirm_signed_in, ConfirmOutcome, Notifier, OAuthFailure, RetryConfig, Route, Router,
    NAVIGATION_TIMEOUT_MESSAGE,
};
use clutch_identity::{
    AuthStatusSignal, CreateOutcome, CredentialFlow, NewAccount, VerificationFlow, VerifyOutcome,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tracing::{debug, error, info};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;

const INCOMPLETE_MESSAGE: &str = "Unable to complete sign-up. Please try again.";
const VERIFY_INCOMPLETE_MESSAGE: &str = "Email verification incomplete. Please try again.";

/// Verification step state, entered after a registration that requires
/// an emailed code and cleared once the code is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingVerification {
    /// Address the challenge was sent to, for display.
    pub email: String,
    /// Number of times the user asked for the code again.
    pub resend_count: u32,
}

/// Runs the registration sequence: validate locally, register, then either
/// activate directly or park in the verification step until a code is
/// accepted. At most one network run is in flight at a time.
pub struct SignUpController<C, V, S, R, N> {
    credentials: C,
    verification: V,
    signal: S,
    router: R,
    notifier: N,
    retry: RetryConfig,
    in_flight: AtomicBool,
    pending: Mutex<Option<PendingVerification>>,
}

impl<C, V, S, R, N> SignUpController<C, V, S, R, N>
where
    C: CredentialFlow,
    V: VerificationFlow,
    S: AuthStatusSignal,
    R: Router,
    N: Notifier,
{
    pub fn new(credentials: C, verification: V, signal: S, router: R, notifier: N, retry: RetryConfig) -> Self {
        Self {
            credentials,
            verification,
            signal,
            router,
            notifier,
            retry,
            in_flight: AtomicBool::new(false),
            pending: Mutex::new(None),
        }
    }

    /// The verification step currently awaiting a code, if any.
    pub fn pending(&self) -> Option<PendingVerification> {
        self.pending.lock().unwrap().clone()
    }

    /// Handle a create-account button press.
    pub async fn submit(&self, first_name: &str, last_name: &str, email: &str, password: &str) {
        if !self.credentials.is_ready() {
            debug!("ignoring sign-up press, credential flow not ready");
            return;
        }
        if self.in_flight.swap(true, Ordering::SeqCst) {
            debug!("ignoring sign-up press, a run is already in flight");
            return;
        }

        self.run_submit(first_name, last_name, email, password).await;
        self.in_flight.store(false, Ordering::SeqCst);
    }

    async fn run_submit(&self, first_name: &str, last_name: &str, email: &str, password: &str) {
        let first_name = first_name.trim();
        let last_name = last_name.trim();
        let email = email.trim();

        // Checked in the order the user will fix them: identity fields
        // first, password rules last. Validation never reaches the network.
        if let Some(message) = validation_failure(first_name, last_name, email, password) {
            self.notifier.alert("Error", message);
            return;
        }

        let account = NewAccount {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_lowercase(),
            password: password.to_string(),
        };

        let outcome = match self.credentials.register(&account).await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(%err, "registration rejected");
                self.notifier.alert("Sign-up Error", &err.display_message());
                return;
            }
        };

        match outcome {
            CreateOutcome::Complete { session_id } => {
                self.activate_and_enter(&session_id).await;
            }
            CreateOutcome::NeedsVerification => {
                if let Err(err) = self.verification.request_challenge().await {
                    error!(%err, "verification challenge rejected");
                    self.notifier.alert("Sign-up Error", &err.display_message());
                    return;
                }
                info!(email = account.email, "verification code sent");
                *self.pending.lock().unwrap() = Some(PendingVerification {
                    email: account.email,
                    resend_count: 0,
                });
            }
            CreateOutcome::Incomplete { status } => {
                debug!(status, "registration did not complete");
                self.notifier.alert("Error", INCOMPLETE_MESSAGE);
            }
        }
    }

    /// Handle a verify-code button press. A no-op unless a challenge is
    /// outstanding.
    pub async fn verify(&self, code: &str) {
        if self.pending().is_none() {
            debug!("ignoring verify press, no challenge outstanding");
            return;
        }
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return;
        }

        self.run_verify(code).await;
        self.in_flight.store(false, Ordering::SeqCst);
    }

    async fn run_verify(&self, code: &str) {
        let code = code.trim();
        if code.is_empty() {
            self.notifier.alert("Error", "Verification code is required");
            return;
        }

        match self.verification.attempt(code).await {
            Ok(VerifyOutcome::Complete { session_id }) => {
                *self.pending.lock().unwrap() = None;
                self.activate_and_enter(&session_id).await;
            }
            Ok(other) => {
                // Wrong or expired code. The challenge stays open so the
                // user can retry or resend.
                debug!(?other, "verification attempt did not complete");
                self.notifier.alert("Error", VERIFY_INCOMPLETE_MESSAGE);
            }
            Err(err) => {
                error!(%err, "verification attempt rejected");
                self.notifier.alert("Error", &err.display_message());
            }
        }
    }

    /// Ask the provider to send the code again.
    pub async fn resend(&self) {
        let Some(pending) = self.pending() else {
            debug!("ignoring resend press, no challenge outstanding");
            return;
        };
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return;
        }

        match self.verification.request_challenge().await {
            Ok(()) => {
                let resend_count = pending.resend_count + 1;
                info!(email = pending.email, resend_count, "verification code resent");
                *self.pending.lock().unwrap() = Some(PendingVerification {
                    resend_count,
                    ..pending
                });
                self.notifier.alert("Code Sent", "A new verification code is on its way.");
            }
            Err(err) => {
                error!(%err, "verification resend rejected");
                self.notifier.alert("Error", &err.display_message());
            }
        }
        self.in_flight.store(false, Ordering::SeqCst);
    }

    /// Abandon the verification step and return to the form.
    pub fn cancel_verification(&self) {
        *self.pending.lock().unwrap() = None;
    }

    async fn activate_and_enter(&self, session_id: &str) {
        if let Err(err) = self.credentials.activate(session_id).await {
            error!(%err, session_id, "session activation failed after sign-up");
            self.notifier.alert_with_recovery(
                "Sign-up Error",
                &OAuthFailure::ActivationFailed.to_string(),
                "Restart",
            );
            return;
        }

        match confirm_signed_in(&self.signal, &self.retry).await {
            ConfirmOutcome::Confirmed => {
                info!(session_id, "sign-up complete");
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

fn validation_failure(
    first_name: &str,
    last_name: &str,
    email: &str,
    password: &str,
) -> Option<&'static str> {
    if first_name.is_empty() {
        return Some("First name is required");
    }
    if last_name.is_empty() {
        return Some("Last name is required");
    }
    if email.is_empty() {
        return Some("Email address is required");
    }
    if password.is_empty() {
        return Some("Password is required");
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Some("Password must be at least 8 characters");
    }
    None
}
