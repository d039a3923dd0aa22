//! Secure token cache for the Clutch mobile client.
//!
//! This crate owns the on-device persistence of opaque auth secrets:
//! - **[`SecureBlobStore`]**: the seam over the platform's secure keyed
//!   storage (keychain on device, file/memory backends here)
//! - **[`TokenCache`]**: the async facade handed to the identity-provider
//!   integration at startup (`get_token` / `save_token` / `delete_token`)
//!
//! The cache fails closed: a backend read error is reported as "not found"
//! and the offending entry is best-effort deleted so a corrupt value cannot
//! wedge every subsequent read. Errors never cross the public boundary;
//! they surface only as tracing diagnostics.

mod cache;
mod file;
mod keys;
mod memory;
mod shape;
mod traits;

pub use cache::TokenCache;
pub use file::FileBlobStore;
pub use keys::TokenKeys;
pub use memory::{InjectedFault, MemoryBlobStore};
pub use shape::{classify, TokenShape};
pub use traits::SecureBlobStore;

use thiserror::Error;

/// Error type for blob store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Persistent backend failure (bad entry, denied access, …).
    #[error("Backend storage error: {0}")]
    Backend(String),

    /// Transient backend failure (store locked, medium not ready).
    /// Read-repair is skipped for these so a temporary outage cannot
    /// destroy data.
    #[error("Backend temporarily unavailable: {0}")]
    Unavailable(String),

    /// Stored bytes could not be decoded back into a value.
    #[error("Corrupt entry for key {key}: {reason}")]
    Corrupt { key: String, reason: String },

    /// IO error from a file-backed store.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Whether the failure is expected to clear on its own.
    pub fn is_transient(&self) -> bool {
        match self {
            StoreError::Unavailable(_) => true,
            StoreError::Io(err) => matches!(
                err.kind(),
                std::io::ErrorKind::TimedOut
                    | std::io::ErrorKind::Interrupted
                    | std::io::ErrorKind::WouldBlock
            ),
            _ => false,
        }
    }
}

/// Result type for blob store operations.
pub type StoreResult<T> = Result<T, StoreError>;
