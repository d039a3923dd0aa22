//! Auth status signal.

use std::sync::{Arc, Mutex};

/// Point-in-time view of the provider's auth state.
///
/// `is_loaded == false` means the status is *unknown*; it must never be
/// read as "unauthenticated". The signal updates asynchronously and may lag
/// behind actions that logically already changed it (e.g. a session
/// activation that just resolved).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthSnapshot {
    /// Whether the provider has resolved the auth state at all.
    pub is_loaded: bool,
    /// Whether a session is active. Meaningless while `is_loaded` is false.
    pub is_signed_in: bool,
}

impl AuthSnapshot {
    /// Status not yet known.
    pub fn loading() -> Self {
        Self {
            is_loaded: false,
            is_signed_in: false,
        }
    }

    /// Resolved: a session is active.
    pub fn signed_in() -> Self {
        Self {
            is_loaded: true,
            is_signed_in: true,
        }
    }

    /// Resolved: no session.
    pub fn signed_out() -> Self {
        Self {
            is_loaded: true,
            is_signed_in: false,
        }
    }
}

/// Source of [`AuthSnapshot`] values, observed on every guard evaluation
/// and polled by the navigation-confirmation retry.
pub trait AuthStatusSignal {
    /// Current snapshot.
    fn snapshot(&self) -> AuthSnapshot;
}

/// Shared, mutable [`AuthStatusSignal`] handle.
///
/// The identity integration updates it as sessions resolve; guards and
/// controllers observe it. Cloning shares the underlying state.
#[derive(Clone)]
pub struct SharedAuthSignal {
    inner: Arc<Mutex<AuthSnapshot>>,
}

impl SharedAuthSignal {
    /// Create a signal in the unresolved state.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(AuthSnapshot::loading())),
        }
    }

    /// Create a signal already holding the given snapshot.
    pub fn with_snapshot(snapshot: AuthSnapshot) -> Self {
        Self {
            inner: Arc::new(Mutex::new(snapshot)),
        }
    }

    /// Replace the current snapshot.
    pub fn set(&self, snapshot: AuthSnapshot) {
        *self.inner.lock().unwrap() = snapshot;
    }

    /// Mark the state resolved with the given signed-in status.
    pub fn mark_loaded(&self, is_signed_in: bool) {
        self.set(AuthSnapshot {
            is_loaded: true,
            is_signed_in,
        });
    }
}

impl Default for SharedAuthSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthStatusSignal for SharedAuthSignal {
    fn snapshot(&self) -> AuthSnapshot {
        *self.inner.lock().unwrap()
    }
}
