//! Capability traits and tagged call outcomes.
//!
//! Provider SDK calls resolve to loosely-shaped status objects; they are
//! converted into these enums exactly once, at the boundary, so controller
//! logic can match instead of re-inspecting raw shapes.

use crate::{IdentityResult, ProviderError};

/// Outcome of a credential-creation call (sign-in or registration).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The provider created a session; it still needs activation.
    Complete { session_id: String },
    /// The account needs an email-code verification step first.
    NeedsVerification,
    /// Any other non-terminal status the client does not handle.
    Incomplete { status: String },
}

/// Outcome of a verification-attempt call. Same states as creation: a
/// correct code completes the sign-up and yields a session.
pub type VerifyOutcome = CreateOutcome;

/// Outcome of an OAuth flow that resolved without rejecting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OAuthOutcome {
    /// The provider created a session; it still needs activation.
    Session { session_id: String },
    /// The flow resolved but produced no session. Reportable to the user,
    /// unlike cancellation, which rejects instead.
    NoSession,
}

/// New-account fields for registration.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Credential sign-in and session activation.
#[allow(async_fn_in_trait)]
pub trait CredentialFlow {
    /// Whether the capability has finished initializing. Protocol runs
    /// started before readiness are ignored.
    fn is_ready(&self) -> bool {
        true
    }

    /// Create a sign-in attempt from an identifier and secret.
    async fn create(&self, identifier: &str, secret: &str) -> IdentityResult<CreateOutcome>;

    /// Create a new account.
    async fn register(&self, account: &NewAccount) -> IdentityResult<CreateOutcome>;

    /// Activate a created session, making it the device's active session.
    async fn activate(&self, session_id: &str) -> IdentityResult<()>;
}

/// Browser-based OAuth flow, parameterized with its provider (e.g. Google)
/// at construction time. A user-dismissed flow rejects with a cancellation
/// code (see [`ProviderError::is_cancellation`]).
#[allow(async_fn_in_trait)]
pub trait OAuthFlow {
    /// Run the flow to a terminal state.
    async fn start(&self) -> Result<OAuthOutcome, ProviderError>;
}

/// Email-code verification challenge for a pending registration.
#[allow(async_fn_in_trait)]
pub trait VerificationFlow {
    /// Send (or re-send) the code to the pending account's email address.
    async fn request_challenge(&self) -> IdentityResult<()>;

    /// Submit a code the user typed.
    async fn attempt(&self, code: &str) -> IdentityResult<VerifyOutcome>;
}

// Shared-handle delegation, so controllers and tests can hold the same
// capability instance.

impl<T: CredentialFlow + Sync> CredentialFlow for std::sync::Arc<T> {
    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }

    async fn create(&self, identifier: &str, secret: &str) -> IdentityResult<CreateOutcome> {
        (**self).create(identifier, secret).await
    }

    async fn register(&self, account: &NewAccount) -> IdentityResult<CreateOutcome> {
        (**self).register(account).await
    }

    async fn activate(&self, session_id: &str) -> IdentityResult<()> {
        (**self).activate(session_id).await
    }
}

impl<T: OAuthFlow + Sync> OAuthFlow for std::sync::Arc<T> {
    async fn start(&self) -> Result<OAuthOutcome, ProviderError> {
        (**self).start().await
    }
}

impl<T: VerificationFlow + Sync> VerificationFlow for std::sync::Arc<T> {
    async fn request_challenge(&self) -> IdentityResult<()> {
        (**self).request_challenge().await
    }

    async fn attempt(&self, code: &str) -> IdentityResult<VerifyOutcome> {
        (**self).attempt(code).await
    }
}
