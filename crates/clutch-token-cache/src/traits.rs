//! Blob store trait definition.

use crate::StoreResult;

/// Trait for secure keyed blob storage backends.
///
/// The platform shell provides the real implementation (keychain / keystore);
/// this workspace ships [`crate::MemoryBlobStore`] and
/// [`crate::FileBlobStore`]. Calls may block; [`crate::TokenCache`] bridges
/// them onto the async runtime.
pub trait SecureBlobStore: Send + Sync {
    /// Store a value under a key, overwriting any previous value.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Retrieve the value for a key, `None` if absent.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Delete the value for a key. Returns whether an entry existed.
    fn delete(&self, key: &str) -> StoreResult<bool>;

    /// Check if a key exists.
    fn has(&self, key: &str) -> StoreResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}
