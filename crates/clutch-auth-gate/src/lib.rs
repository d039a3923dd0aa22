//! Navigation gating and auth protocol orchestration for the Clutch client.
//!
//! This crate owns "what should the user see right now":
//! - **[`ScreenGuard`]**: one parameterized guard for the three mount
//!   points (splash, auth section, protected section), driven purely by the
//!   external auth status signal. Never flashes protected content, never
//!   redirect-loops, never navigates while the status is unknown.
//! - **[`SignInController`] / [`OAuthController`] / [`SignUpController`]**:
//!   the multi-step credential, OAuth, and registration protocols, each
//!   serialized to at most one run in flight and terminating in exactly one
//!   of navigate, surface-an-error, or silent-ignore (cancellation).
//! - **[`confirm_signed_in`]**: bounded polling of the eventually-consistent
//!   status signal after session activation, so navigation only happens on
//!   confirmed state, never on the strength of the activation call alone.

mod classify;
mod confirm;
mod guard;
mod intent;
mod oauth;
mod routes;
mod signin;
mod signup;

#[cfg(test)]
mod support;

pub use classify::OAuthFailure;
pub use confirm::{confirm_signed_in, ConfirmOutcome, RetryConfig, NAVIGATION_TIMEOUT_MESSAGE};
pub use guard::{GuardDecision, GuardKind, ScreenGuard};
pub use intent::{intent_for, NavigationIntent};
pub use oauth::OAuthController;
pub use routes::{Notifier, Route, Router};
pub use signin::SignInController;
pub use signup::{PendingVerification, SignUpController, MIN_PASSWORD_LEN};
