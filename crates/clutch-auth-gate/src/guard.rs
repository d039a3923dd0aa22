//! Screen guards.
//!
//! The original client carried three slightly divergent copies of this
//! check (splash redirector, auth-section layout, protected-section
//! layout). There is exactly one implementation here, parameterized by
//! mount point, so all three are guaranteed to reach the same decision for
//! the same signal value.

use crate::{intent_for, NavigationIntent, Route, Router};
use clutch_identity::AuthStatusSignal;
use std::sync::Mutex;
use tracing::debug;

/// Which mount point the guard protects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardKind {
    /// Root splash screen: renders nothing of its own, always forwards.
    Splash,
    /// Sign-in/sign-up section: forwards users who are already signed in.
    AuthSection,
    /// Main app section: forwards users who are not signed in.
    ProtectedSection,
}

/// What the mount point should render after an observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Status unknown: render the spinner. No navigation ever fires here.
    Loading,
    /// The current section is allowed: render its content.
    Render,
    /// The user belongs elsewhere; the redirect (if not already issued for
    /// this transition) has been sent to the router.
    Redirected(Route),
}

/// Mount-time auth check, re-evaluated on every render of the signal.
pub struct ScreenGuard<S, R> {
    kind: GuardKind,
    signal: S,
    router: R,
    // Intent most recently acted on; redirects fire once per transition.
    last_intent: Mutex<Option<NavigationIntent>>,
}

impl<S: AuthStatusSignal, R: Router> ScreenGuard<S, R> {
    pub fn new(kind: GuardKind, signal: S, router: R) -> Self {
        Self {
            kind,
            signal,
            router,
            last_intent: Mutex::new(None),
        }
    }

    /// Observe the signal and decide what this mount point shows.
    ///
    /// Idempotent under re-render: observing the same resolved status twice
    /// issues at most one redirect. Every transition into a redirecting
    /// state fires afresh, including one that passed through a rendered
    /// state rather than back through loading.
    pub fn observe(&self) -> GuardDecision {
        let snapshot = self.signal.snapshot();
        let intent = intent_for(snapshot);

        // Record every observed intent, not just the redirecting ones, so a
        // signed-in -> signed-out -> signed-in sequence is three distinct
        // transitions.
        let transitioned = {
            let mut last = self.last_intent.lock().unwrap();
            let transitioned = *last != Some(intent);
            *last = match intent {
                NavigationIntent::Loading => None,
                resolved => Some(resolved),
            };
            transitioned
        };

        match (intent, self.kind) {
            (NavigationIntent::Loading, _) => GuardDecision::Loading,
            (NavigationIntent::GoToSignIn, GuardKind::AuthSection) => GuardDecision::Render,
            (NavigationIntent::GoToSignIn, _) => self.redirect(transitioned, Route::SignIn),
            (NavigationIntent::GoToApp, GuardKind::ProtectedSection) => GuardDecision::Render,
            (NavigationIntent::GoToApp, _) => self.redirect(transitioned, Route::App),
        }
    }

    fn redirect(&self, transitioned: bool, route: Route) -> GuardDecision {
        if transitioned {
            debug!(kind = ?self.kind, ?route, "guard redirect");
            self.router.replace(route);
        }
        GuardDecision::Redirected(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::support::RecordingRouter;
    use clutch_identity::{AuthSnapshot, SharedAuthSignal};
    use std::sync::Arc;

    fn guard_for(kind: GuardKind) -> (SharedAuthSignal, Arc<RecordingRouter>, ScreenGuard<SharedAuthSignal, Arc<RecordingRouter>>) {
        let signal = SharedAuthSignal::new();
        let router = Arc::new(RecordingRouter::new());
        let guard = ScreenGuard::new(kind, signal.clone(), router.clone());
        (signal, router, guard)
    }

    const ALL_KINDS: [GuardKind; 3] = [
        GuardKind::Splash,
        GuardKind::AuthSection,
        GuardKind::ProtectedSection,
    ];

    // =========================================================================
    // Loading: spinner everywhere, zero navigation
    // =========================================================================

    #[test]
    fn unloaded_renders_loading_and_never_navigates() {
        for kind in ALL_KINDS {
            let (signal, router, guard) = guard_for(kind);
            assert_eq!(guard.observe(), GuardDecision::Loading);

            // Even with a stale signed-in flag under an unloaded signal.
            signal.set(AuthSnapshot {
                is_loaded: false,
                is_signed_in: true,
            });
            assert_eq!(guard.observe(), GuardDecision::Loading);
            assert!(router.replaced().is_empty(), "{kind:?} navigated while loading");
        }
    }

    // =========================================================================
    // Signed out: everyone agrees on sign-in
    // =========================================================================

    #[test]
    fn signed_out_splash_redirects_to_sign_in() {
        let (signal, router, guard) = guard_for(GuardKind::Splash);
        signal.mark_loaded(false);
        assert_eq!(guard.observe(), GuardDecision::Redirected(Route::SignIn));
        assert_eq!(router.replaced(), vec![Route::SignIn]);
    }

    #[test]
    fn signed_out_protected_redirects_to_sign_in() {
        let (signal, router, guard) = guard_for(GuardKind::ProtectedSection);
        signal.mark_loaded(false);
        assert_eq!(guard.observe(), GuardDecision::Redirected(Route::SignIn));
        assert_eq!(router.replaced(), vec![Route::SignIn]);
    }

    #[test]
    fn signed_out_auth_section_renders() {
        let (signal, router, guard) = guard_for(GuardKind::AuthSection);
        signal.mark_loaded(false);
        assert_eq!(guard.observe(), GuardDecision::Render);
        assert!(router.replaced().is_empty());
    }

    #[test]
    fn signed_out_redirect_is_idempotent_under_rerender() {
        let (signal, router, guard) = guard_for(GuardKind::ProtectedSection);
        signal.mark_loaded(false);

        guard.observe();
        guard.observe();
        guard.observe();
        assert_eq!(router.replaced(), vec![Route::SignIn]);
    }

    // =========================================================================
    // Signed in: everyone agrees on the app
    // =========================================================================

    #[test]
    fn signed_in_splash_redirects_to_app() {
        let (signal, router, guard) = guard_for(GuardKind::Splash);
        signal.mark_loaded(true);
        assert_eq!(guard.observe(), GuardDecision::Redirected(Route::App));
        assert_eq!(router.replaced(), vec![Route::App]);
    }

    #[test]
    fn signed_in_auth_section_redirects_to_app() {
        let (signal, router, guard) = guard_for(GuardKind::AuthSection);
        signal.mark_loaded(true);
        assert_eq!(guard.observe(), GuardDecision::Redirected(Route::App));
        assert_eq!(router.replaced(), vec![Route::App]);
    }

    #[test]
    fn signed_in_protected_renders_content() {
        let (signal, router, guard) = guard_for(GuardKind::ProtectedSection);
        signal.mark_loaded(true);
        assert_eq!(guard.observe(), GuardDecision::Render);
        assert!(router.replaced().is_empty());
    }

    #[test]
    fn no_kind_redirects_to_sign_in_while_signed_in() {
        for kind in ALL_KINDS {
            let (signal, router, guard) = guard_for(kind);
            signal.mark_loaded(true);
            guard.observe();
            assert!(
                !router.replaced().contains(&Route::SignIn),
                "{kind:?} sent a signed-in user to sign-in"
            );
        }
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    #[test]
    fn redirect_rearms_after_signal_unloads() {
        let (signal, router, guard) = guard_for(GuardKind::ProtectedSection);
        signal.mark_loaded(false);
        guard.observe();

        signal.set(AuthSnapshot::loading());
        assert_eq!(guard.observe(), GuardDecision::Loading);

        signal.mark_loaded(false);
        guard.observe();
        assert_eq!(router.replaced(), vec![Route::SignIn, Route::SignIn]);
    }

    #[test]
    fn sign_out_transition_fires_fresh_redirect() {
        let (signal, router, guard) = guard_for(GuardKind::AuthSection);
        signal.mark_loaded(true);
        guard.observe();

        signal.mark_loaded(false);
        assert_eq!(guard.observe(), GuardDecision::Render);

        signal.mark_loaded(true);
        guard.observe();
        assert_eq!(router.replaced(), vec![Route::App, Route::App]);
    }

    #[test]
    fn sign_in_round_trip_refires_protected_redirect() {
        // Signed out, then in (protected renders), then out again: the
        // second unauthenticated transition must redirect afresh even
        // though the signal never dropped back to loading.
        let (signal, router, guard) = guard_for(GuardKind::ProtectedSection);
        signal.mark_loaded(false);
        guard.observe();

        signal.mark_loaded(true);
        assert_eq!(guard.observe(), GuardDecision::Render);

        signal.mark_loaded(false);
        guard.observe();
        guard.observe();
        assert_eq!(router.replaced(), vec![Route::SignIn, Route::SignIn]);
    }

    #[test]
    fn all_kinds_agree_on_same_snapshot() {
        for snapshot in [
            AuthSnapshot::loading(),
            AuthSnapshot::signed_out(),
            AuthSnapshot::signed_in(),
        ] {
            let intents: Vec<_> = ALL_KINDS
                .iter()
                .map(|_| intent_for(snapshot))
                .collect();
            assert!(intents.windows(2).all(|w| w[0] == w[1]));
        }
    }
}
