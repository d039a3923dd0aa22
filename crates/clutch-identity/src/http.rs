//! REST client for the identity provider.
//!
//! Implements [`CredentialFlow`] and [`VerificationFlow`] over the
//! provider's client API. Issued session tokens are persisted through the
//! token cache so the identity state survives app restarts, and the shared
//! auth signal is resolved once a session becomes active.

use crate::{
    AuthSnapshot, CreateOutcome, CredentialFlow, IdentityResult, NewAccount, ProviderError,
    SharedAuthSignal, VerificationFlow, VerifyOutcome,
};
use clutch_token_cache::{TokenCache, TokenKeys};
use serde::Deserialize;
use tracing::{debug, error, info, warn};

/// Email-code strategy identifier on the wire.
const EMAIL_CODE_STRATEGY: &str = "email_code";

/// REST implementation of the credential and verification capabilities.
#[derive(Clone)]
pub struct HttpIdentityClient {
    http_client: reqwest::Client,
    api_url: String,
    publishable_key: String,
    cache: TokenCache,
    signal: SharedAuthSignal,
}

/// Status payload shared by sign-in, sign-up, and verification responses.
#[derive(Debug, Deserialize)]
struct AttemptResponse {
    status: String,
    #[serde(default)]
    created_session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ActivateResponse {
    #[serde(default)]
    session_token: Option<String>,
}

impl HttpIdentityClient {
    /// Create a client against the given provider API URL.
    pub fn new(
        api_url: impl Into<String>,
        publishable_key: impl Into<String>,
        cache: TokenCache,
        signal: SharedAuthSignal,
    ) -> IdentityResult<Self> {
        let api_url = api_url.into();
        url::Url::parse(&api_url)
            .map_err(|err| ProviderError::with_message(format!("Invalid API URL: {err}")))?;

        Ok(Self {
            http_client: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            publishable_key: publishable_key.into(),
            cache,
            signal,
        })
    }

    /// Shared auth signal resolved by this client.
    pub fn signal(&self) -> &SharedAuthSignal {
        &self.signal
    }

    /// Resolve the signal from the persisted session token, for app start.
    /// A cached session token counts as signed in until the provider says
    /// otherwise.
    pub async fn restore(&self) {
        let has_session = self.cache.get_token(TokenKeys::SESSION).await.is_some();
        self.signal.set(AuthSnapshot {
            is_loaded: true,
            is_signed_in: has_session,
        });
        info!(has_session, "restored auth state from token cache");
    }

    /// Drop the active session locally and clear the persisted token.
    pub async fn sign_out(&self) {
        self.cache.delete_token(TokenKeys::SESSION).await;
        self.signal.mark_loaded(false);
        info!("signed out");
    }

    fn client_url(&self, path: &str) -> String {
        format!("{}/v1/client/{}", self.api_url, path)
    }

    async fn post(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> IdentityResult<reqwest::Response> {
        let url = self.client_url(path);
        debug!(%url, "identity provider request");

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.publishable_key))
            .json(&body)
            .send()
            .await?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        error!(%status, body_len = body.len(), %url, "identity provider rejected request");

        // The provider reports failures as a structured error body; fall
        // back to the HTTP status when it sends something else.
        Err(serde_json::from_str::<ProviderError>(&body)
            .ok()
            .filter(|err| err.message.is_some() || !err.errors.is_empty())
            .unwrap_or_else(|| {
                ProviderError::with_message(format!("Provider returned {status}"))
            }))
    }

    async fn attempt_request(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> IdentityResult<CreateOutcome> {
        let response: AttemptResponse = self.post(path, body).await?.json().await?;
        Ok(map_attempt(response))
    }
}

/// Convert a wire status into a tagged outcome.
fn map_attempt(response: AttemptResponse) -> CreateOutcome {
    match (response.status.as_str(), response.created_session_id) {
        ("complete", Some(session_id)) => CreateOutcome::Complete { session_id },
        ("complete", None) => {
            // A terminal status without a session cannot be activated;
            // treat it like any other unhandled state.
            warn!("provider reported complete without a session id");
            CreateOutcome::Incomplete {
                status: "complete_without_session".to_string(),
            }
        }
        ("missing_requirements" | "needs_verification", _) => CreateOutcome::NeedsVerification,
        (status, _) => CreateOutcome::Incomplete {
            status: status.to_string(),
        },
    }
}

impl CredentialFlow for HttpIdentityClient {
    async fn create(&self, identifier: &str, secret: &str) -> IdentityResult<CreateOutcome> {
        self.attempt_request(
            "sign_ins",
            serde_json::json!({
                "identifier": identifier,
                "password": secret,
            }),
        )
        .await
    }

    async fn register(&self, account: &NewAccount) -> IdentityResult<CreateOutcome> {
        self.attempt_request(
            "sign_ups",
            serde_json::json!({
                "first_name": account.first_name,
                "last_name": account.last_name,
                "email_address": account.email,
                "password": account.password,
            }),
        )
        .await
    }

    async fn activate(&self, session_id: &str) -> IdentityResult<()> {
        let response: ActivateResponse = self
            .post(&format!("sessions/{session_id}/touch"), serde_json::json!({}))
            .await?
            .json()
            .await?;

        if let Some(token) = response.session_token {
            self.cache.save_token(TokenKeys::SESSION, &token).await;
        } else {
            warn!(session_id, "activation returned no session token to persist");
        }

        self.signal.mark_loaded(true);
        info!(session_id, "session activated");
        Ok(())
    }
}

impl VerificationFlow for HttpIdentityClient {
    async fn request_challenge(&self) -> IdentityResult<()> {
        self.post(
            "sign_ups/prepare_verification",
            serde_json::json!({ "strategy": EMAIL_CODE_STRATEGY }),
        )
        .await?;
        debug!("verification challenge requested");
        Ok(())
    }

    async fn attempt(&self, code: &str) -> IdentityResult<VerifyOutcome> {
        self.attempt_request(
            "sign_ups/attempt_verification",
            serde_json::json!({
                "strategy": EMAIL_CODE_STRATEGY,
                "code": code,
            }),
        )
        .await
    }
}
