//! Key-value store adapter
//!
//! Mirrors the browser `Storage` contract: synchronous string get/set, a
//! missing key is not an error, and `set` overwrites.

use std::collections::{HashMap, HashSet};

use crate::error::StoreError;

/// Synchronous string key-value store
pub trait KeyValueStore {
    /// Read a key. `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a key, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// In-memory store for native runs and tests
///
/// Individual keys can be made to fail on read or write, standing in for a
/// browser that throws on a single `getItem`/`setItem`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    failing_reads: HashSet<String>,
    failing_writes: HashSet<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every read of `key` fail
    pub fn fail_reads_for(&mut self, key: impl Into<String>) {
        self.failing_reads.insert(key.into());
    }

    /// Make every write of `key` fail
    pub fn fail_writes_for(&mut self, key: impl Into<String>) {
        self.failing_writes.insert(key.into());
    }

    /// Clear injected failures
    pub fn heal(&mut self) {
        self.failing_reads.clear();
        self.failing_writes.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw stored text, bypassing injected failures
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.failing_reads.contains(key) {
            return Err(StoreError::Access {
                key: key.to_string(),
                message: "injected read failure".to_string(),
            });
        }
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.failing_writes.contains(key) {
            return Err(StoreError::Access {
                key: key.to_string(),
                message: "injected write failure".to_string(),
            });
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
