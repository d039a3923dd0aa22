//! Async token cache over a [`SecureBlobStore`].

use crate::{shape, SecureBlobStore, StoreError, StoreResult, TokenKeys, TokenShape};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, warn};

/// Durable per-key secret cache handed to the identity integration.
///
/// All operations are async and never propagate backend errors: `get_token`
/// fails closed to `None`, `save_token` and `delete_token` swallow and log.
/// Callers may rely on "never throws" (see DESIGN.md for the policy
/// decision).
#[derive(Clone)]
pub struct TokenCache {
    store: Arc<dyn SecureBlobStore>,
}

impl TokenCache {
    /// Create a cache over the given backend.
    pub fn new(store: Arc<dyn SecureBlobStore>) -> Self {
        Self { store }
    }

    /// Retrieve the token for `key`, or `None` if absent or unreadable.
    ///
    /// A failed read is treated as "not found". Unless the failure is
    /// transient, the entry is best-effort deleted so a corrupt value does
    /// not fail every subsequent read.
    pub async fn get_token(&self, key: &str) -> Option<String> {
        let started = Instant::now();
        match self.run("get", key, |store, key| store.get(key)).await {
            Ok(Some(value)) => {
                let token_shape = shape::classify(&value);
                if let TokenShape::Claims { expires_at, expired: true } = token_shape {
                    // Advisory only: the expired value is still returned,
                    // expiry enforcement belongs to the identity provider.
                    warn!(key, expires_at, "token cache served an expired token");
                }
                debug!(
                    key,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    shape = ?token_shape,
                    known_key = TokenKeys::is_known(key),
                    "token cache hit"
                );
                Some(value)
            }
            Ok(None) => {
                debug!(
                    key,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "no value found for key"
                );
                None
            }
            Err(err) => {
                error!(key, %err, "token cache get failed");
                if err.is_transient() {
                    debug!(key, "transient failure, keeping entry for retry");
                } else {
                    self.repair(key).await;
                }
                None
            }
        }
    }

    /// Persist `value` under `key`.
    ///
    /// The write is verified by an immediate read-back; a mismatch is
    /// logged but not retried, so a caller cannot assume a silent save
    /// definitely persisted under concurrent pressure.
    pub async fn save_token(&self, key: &str, value: &str) {
        let started = Instant::now();
        let result = self
            .run("save", key, {
                let value = value.to_string();
                move |store, key| {
                    store.set(key, &value)?;
                    store.get(key)
                }
            })
            .await;

        match result {
            Ok(read_back) => {
                if read_back.as_deref() == Some(value) {
                    debug!(
                        key,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        value_len = value.len(),
                        "token saved"
                    );
                } else {
                    warn!(
                        key,
                        written_len = value.len(),
                        read_back_len = read_back.map(|v| v.len()),
                        "token save verification mismatch"
                    );
                }
            }
            Err(err) => error!(key, %err, "token cache save failed"),
        }
    }

    /// Remove the entry for `key`.
    pub async fn delete_token(&self, key: &str) {
        let started = Instant::now();
        match self.run("delete", key, |store, key| store.delete(key)).await {
            Ok(existed) => debug!(
                key,
                existed,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "token deleted"
            ),
            Err(err) => error!(key, %err, "token cache delete failed"),
        }
    }

    /// Best-effort removal of an entry that just failed to read.
    async fn repair(&self, key: &str) {
        match self.run("repair", key, |store, key| store.delete(key)).await {
            Ok(_) => debug!(key, "removed unreadable entry"),
            Err(err) => warn!(key, %err, "failed to remove unreadable entry"),
        }
    }

    /// Run a blocking store operation off the async runtime.
    async fn run<T, F>(&self, op: &str, key: &str, f: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn SecureBlobStore, &str) -> StoreResult<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let key = key.to_string();
        match tokio::task::spawn_blocking(move || f(store.as_ref(), &key)).await {
            Ok(result) => result,
            Err(err) => Err(StoreError::Backend(format!("{op} task failed: {err}"))),
        }
    }
}
