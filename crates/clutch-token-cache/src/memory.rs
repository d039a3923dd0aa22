//! In-memory blob store.
//!
//! Used by tests throughout the workspace and as the backend when the
//! platform shell has not handed over a real secure store. Supports fault
//! injection so cache failure paths can be exercised deterministically.

use crate::{SecureBlobStore, StoreError, StoreResult};
use std::collections::HashMap;
use std::sync::Mutex;

/// Fault to inject into the next operations of a [`MemoryBlobStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectedFault {
    /// All reads fail with a persistent backend error.
    ReadError,
    /// All reads fail with a transient unavailable error.
    ReadUnavailable,
    /// All writes fail with a persistent backend error.
    WriteError,
    /// All deletes fail with a persistent backend error.
    DeleteError,
}

/// In-memory [`SecureBlobStore`].
pub struct MemoryBlobStore {
    data: Mutex<HashMap<String, String>>,
    fault: Mutex<Option<InjectedFault>>,
    deleted: Mutex<Vec<String>>,
}

impl MemoryBlobStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            data: Mutex::new(HashMap::new()),
            fault: Mutex::new(None),
            deleted: Mutex::new(Vec::new()),
        }
    }

    /// Inject a fault affecting subsequent operations, or clear it.
    pub fn set_fault(&self, fault: Option<InjectedFault>) {
        *self.fault.lock().unwrap() = fault;
    }

    /// Keys that `delete` has been called with, in order. Deletes are
    /// recorded even while a fault is injected.
    pub fn deleted_keys(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.data.lock().unwrap().len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn fault(&self) -> Option<InjectedFault> {
        *self.fault.lock().unwrap()
    }
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SecureBlobStore for MemoryBlobStore {
    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        if self.fault() == Some(InjectedFault::WriteError) {
            return Err(StoreError::Backend(format!("injected write fault: {key}")));
        }
        self.data
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        match self.fault() {
            Some(InjectedFault::ReadError) => {
                Err(StoreError::Backend(format!("injected read fault: {key}")))
            }
            Some(InjectedFault::ReadUnavailable) => {
                Err(StoreError::Unavailable(format!("injected outage: {key}")))
            }
            _ => Ok(self.data.lock().unwrap().get(key).cloned()),
        }
    }

    fn delete(&self, key: &str) -> StoreResult<bool> {
        self.deleted.lock().unwrap().push(key.to_string());
        if self.fault() == Some(InjectedFault::DeleteError) {
            return Err(StoreError::Backend(format!("injected delete fault: {key}")));
        }
        Ok(self.data.lock().unwrap().remove(key).is_some())
    }
}
