//! Identity-provider boundary for the Clutch client.
//!
//! Everything the auth gate knows about the external identity provider is
//! defined here, as a contract:
//! - **[`AuthStatusSignal`]**: the asynchronously-resolving auth status
//!   (`is_loaded` / `is_signed_in`), which may lag behind actions that
//!   logically already changed it
//! - **[`CredentialFlow`] / [`OAuthFlow`] / [`VerificationFlow`]**: the
//!   credential, OAuth, and email-verification capabilities
//! - **[`ProviderError`]** and the tagged outcome enums: provider results
//!   are classified once at this boundary, so downstream logic never
//!   re-inspects loosely-shaped SDK values
//!
//! [`HttpIdentityClient`] is the REST implementation of the credential and
//! verification capabilities. It persists issued session tokens through the
//! token cache, which is how the token store survives app restarts.

mod error;
mod flows;
mod http;
mod signal;

pub use error::{ErrorDetail, ProviderError, FALLBACK_ERROR_MESSAGE};
pub use flows::{
    CreateOutcome, CredentialFlow, NewAccount, OAuthFlow, OAuthOutcome, VerificationFlow,
    VerifyOutcome,
};
pub use http::HttpIdentityClient;
pub use signal::{AuthSnapshot, AuthStatusSignal, SharedAuthSignal};

/// Result type for identity-provider calls.
pub type IdentityResult<T> = Result<T, ProviderError>;
