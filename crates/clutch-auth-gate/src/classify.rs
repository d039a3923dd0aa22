//! OAuth failure buckets.

use clutch_identity::ProviderError;
use thiserror::Error;

/// User-facing classification of a failed OAuth run.
///
/// Rejections are bucketed by inspecting the provider's code/message; the
/// two post-success buckets ([`ActivationFailed`](Self::ActivationFailed),
/// [`Incomplete`](Self::Incomplete)) are assigned by the controller based on
/// which step broke, since the user's credentials were already accepted by
/// then and the copy must say so.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OAuthFailure {
    /// The browser/callback leg failed (network-shaped rejection).
    #[error("OAuth callback failed. Please check your internet connection and try again.")]
    Callback,
    /// The provider created a session but activating it failed.
    #[error("Sign-in was successful but session activation failed. Please restart the app.")]
    ActivationFailed,
    /// The flow resolved without producing a session.
    #[error("Google sign-in was incomplete. Please try again.")]
    Incomplete,
    /// Anything unclassified.
    #[error("Failed to sign in with Google. Please try again.")]
    Other,
}

/// Bucket a non-cancellation rejection from the OAuth start call.
pub fn classify_rejection(err: &ProviderError) -> OAuthFailure {
    if err.mentions("callback") || err.mentions("network") {
        OAuthFailure::Callback
    } else {
        OAuthFailure::Other
    }
}
