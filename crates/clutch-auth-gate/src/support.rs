//! Recording fakes shared by the controller and guard tests.

use crate::{Notifier, Route, Router};
use clutch_identity::{
    CreateOutcome, CredentialFlow, IdentityResult, NewAccount, OAuthFlow, OAuthOutcome,
    ProviderError, SharedAuthSignal, VerificationFlow, VerifyOutcome,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Router that records every `replace` call.
pub struct RecordingRouter {
    replaced: Mutex<Vec<Route>>,
}

impl RecordingRouter {
    pub fn new() -> Self {
        Self {
            replaced: Mutex::new(Vec::new()),
        }
    }

    pub fn replaced(&self) -> Vec<Route> {
        self.replaced.lock().unwrap().clone()
    }
}

impl Router for RecordingRouter {
    fn replace(&self, route: Route) {
        self.replaced.lock().unwrap().push(route);
    }
}

/// One recorded alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub recovery: Option<String>,
}

/// Notifier that records every alert.
pub struct RecordingNotifier {
    alerts: Mutex<Vec<Alert>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            alerts: Mutex::new(Vec::new()),
        }
    }

    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, title: &str, message: &str) {
        self.alerts.lock().unwrap().push(Alert {
            title: title.to_string(),
            message: message.to_string(),
            recovery: None,
        });
    }

    fn alert_with_recovery(&self, title: &str, message: &str, recovery: &str) {
        self.alerts.lock().unwrap().push(Alert {
            title: title.to_string(),
            message: message.to_string(),
            recovery: Some(recovery.to_string()),
        });
    }
}

/// Scriptable [`CredentialFlow`] that records calls.
pub struct StubCredentials {
    ready: bool,
    create_response: Mutex<IdentityResult<CreateOutcome>>,
    register_response: Mutex<IdentityResult<CreateOutcome>>,
    activate_response: Mutex<IdentityResult<()>>,
    create_calls: Mutex<Vec<(String, String)>>,
    register_calls: Mutex<Vec<NewAccount>>,
    activate_calls: Mutex<Vec<String>>,
    // Signal to resolve signed-in when an activation succeeds, mimicking
    // the real integration's eventual propagation.
    signal: Mutex<Option<SharedAuthSignal>>,
}

impl StubCredentials {
    /// Creation and registration both complete with the given session id;
    /// activation succeeds.
    pub fn completing(session_id: &str) -> Self {
        let outcome = CreateOutcome::Complete {
            session_id: session_id.to_string(),
        };
        Self {
            ready: true,
            create_response: Mutex::new(Ok(outcome.clone())),
            register_response: Mutex::new(Ok(outcome)),
            activate_response: Mutex::new(Ok(())),
            create_calls: Mutex::new(Vec::new()),
            register_calls: Mutex::new(Vec::new()),
            activate_calls: Mutex::new(Vec::new()),
            signal: Mutex::new(None),
        }
    }

    /// A capability that has not finished initializing.
    pub fn not_ready() -> Self {
        let mut stub = Self::completing("unused");
        stub.ready = false;
        stub
    }

    pub fn set_create(&self, response: IdentityResult<CreateOutcome>) {
        *self.create_response.lock().unwrap() = response;
    }

    pub fn set_register(&self, response: IdentityResult<CreateOutcome>) {
        *self.register_response.lock().unwrap() = response;
    }

    pub fn set_activate(&self, response: IdentityResult<()>) {
        *self.activate_response.lock().unwrap() = response;
    }

    /// Resolve the given signal after each successful activation.
    pub fn link_signal(&self, signal: SharedAuthSignal) {
        *self.signal.lock().unwrap() = Some(signal);
    }

    pub fn create_calls(&self) -> Vec<(String, String)> {
        self.create_calls.lock().unwrap().clone()
    }

    pub fn register_calls(&self) -> Vec<NewAccount> {
        self.register_calls.lock().unwrap().clone()
    }

    pub fn activate_calls(&self) -> Vec<String> {
        self.activate_calls.lock().unwrap().clone()
    }
}

impl CredentialFlow for StubCredentials {
    fn is_ready(&self) -> bool {
        self.ready
    }

    async fn create(&self, identifier: &str, secret: &str) -> IdentityResult<CreateOutcome> {
        self.create_calls
            .lock()
            .unwrap()
            .push((identifier.to_string(), secret.to_string()));
        self.create_response.lock().unwrap().clone()
    }

    async fn register(&self, account: &NewAccount) -> IdentityResult<CreateOutcome> {
        self.register_calls.lock().unwrap().push(account.clone());
        self.register_response.lock().unwrap().clone()
    }

    async fn activate(&self, session_id: &str) -> IdentityResult<()> {
        self.activate_calls
            .lock()
            .unwrap()
            .push(session_id.to_string());
        let response = self.activate_response.lock().unwrap().clone();
        if response.is_ok() {
            if let Some(signal) = self.signal.lock().unwrap().as_ref() {
                signal.mark_loaded(true);
            }
        }
        response
    }
}

/// Scriptable [`OAuthFlow`].
pub struct StubOAuth {
    response: Mutex<Result<OAuthOutcome, ProviderError>>,
    delay: Option<Duration>,
    start_calls: AtomicUsize,
}

impl StubOAuth {
    pub fn session(session_id: &str) -> Self {
        Self {
            response: Mutex::new(Ok(OAuthOutcome::Session {
                session_id: session_id.to_string(),
            })),
            delay: None,
            start_calls: AtomicUsize::new(0),
        }
    }

    pub fn no_session() -> Self {
        Self {
            response: Mutex::new(Ok(OAuthOutcome::NoSession)),
            delay: None,
            start_calls: AtomicUsize::new(0),
        }
    }

    pub fn rejecting(err: ProviderError) -> Self {
        Self {
            response: Mutex::new(Err(err)),
            delay: None,
            start_calls: AtomicUsize::new(0),
        }
    }

    /// Make `start` suspend before resolving, so overlap can be exercised.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn start_calls(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }
}

impl OAuthFlow for StubOAuth {
    async fn start(&self) -> Result<OAuthOutcome, ProviderError> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.response.lock().unwrap().clone()
    }
}

/// Scriptable [`VerificationFlow`].
pub struct StubVerification {
    challenge_response: Mutex<IdentityResult<()>>,
    attempt_response: Mutex<IdentityResult<VerifyOutcome>>,
    challenge_calls: AtomicUsize,
    attempt_calls: Mutex<Vec<String>>,
}

impl StubVerification {
    /// Challenges succeed; attempts complete with the given session id.
    pub fn completing(session_id: &str) -> Self {
        Self {
            challenge_response: Mutex::new(Ok(())),
            attempt_response: Mutex::new(Ok(VerifyOutcome::Complete {
                session_id: session_id.to_string(),
            })),
            challenge_calls: AtomicUsize::new(0),
            attempt_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn set_challenge(&self, response: IdentityResult<()>) {
        *self.challenge_response.lock().unwrap() = response;
    }

    pub fn set_attempt(&self, response: IdentityResult<VerifyOutcome>) {
        *self.attempt_response.lock().unwrap() = response;
    }

    pub fn challenge_calls(&self) -> usize {
        self.challenge_calls.load(Ordering::SeqCst)
    }

    pub fn attempt_calls(&self) -> Vec<String> {
        self.attempt_calls.lock().unwrap().clone()
    }
}

impl VerificationFlow for StubVerification {
    async fn request_challenge(&self) -> IdentityResult<()> {
        self.challenge_calls.fetch_add(1, Ordering::SeqCst);
        self.challenge_response.lock().unwrap().clone()
    }

    async fn attempt(&self, code: &str) -> IdentityResult<VerifyOutcome> {
        self.attempt_calls.lock().unwrap().push(code.to_string());
        self.attempt_response.lock().unwrap().clone()
    }
}
