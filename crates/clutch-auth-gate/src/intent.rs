//! Navigation intent derived from the auth status signal.

use clutch_identity::AuthSnapshot;

/// Where the user should be sent given current knowledge. Recomputed on
/// every observation of the signal; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationIntent {
    /// Status unknown; show a spinner, navigate nowhere.
    Loading,
    /// Resolved unauthenticated; protected screens redirect to sign-in.
    GoToSignIn,
    /// Resolved authenticated; auth-only screens redirect to the app.
    GoToApp,
}

/// The single decision function all guard points share.
///
/// `is_loaded == false` always wins: an unknown status must never be read
/// as "unauthenticated", regardless of what `is_signed_in` claims.
pub fn intent_for(snapshot: AuthSnapshot) -> NavigationIntent {
    if !snapshot.is_loaded {
        NavigationIntent::Loading
    } else if snapshot.is_signed_in {
        NavigationIntent::GoToApp
    } else {
        NavigationIntent::GoToSignIn
    }
}
