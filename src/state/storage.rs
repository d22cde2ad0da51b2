//! Durable credential storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session mirrors the logged-in user and token into browser
//! `localStorage` under the `"user"` and `"token"` keys. `MemoryStore`
//! stands in for it in native builds and tests.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::net::types::User;

pub const USER_KEY: &str = "user";
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage is not available")]
    Unavailable,
    #[error("storage operation failed: {0}")]
    Backend(String),
    #[error("failed to serialize stored value: {0}")]
    Encode(String),
}

/// String key-value storage.
pub trait CredentialStore {
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns an error if the backend rejects the delete.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Write the user and token entries for a fresh login.
///
/// # Errors
///
/// Returns the first serialization or backend error.
pub fn write_credentials<S: CredentialStore + ?Sized>(store: &S, user: &User, token: &str) -> Result<(), StorageError> {
    let user_json = serde_json::to_string(user).map_err(|e| StorageError::Encode(e.to_string()))?;
    store.set(USER_KEY, &user_json)?;
    store.set(TOKEN_KEY, token)
}

/// Delete both credential entries.
///
/// Both removals are attempted even if the first fails.
///
/// # Errors
///
/// Returns the first backend error.
pub fn clear_credentials<S: CredentialStore + ?Sized>(store: &S) -> Result<(), StorageError> {
    let user = store.remove(USER_KEY);
    let token = store.remove(TOKEN_KEY);
    user.and(token)
}

/// In-process store for native builds and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with entries, mainly for tests.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let map = entries.into_iter().map(|(k, v)| (k.to_owned(), v.to_owned())).collect();
        Self { entries: Arc::new(Mutex::new(map)) }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().map_or(false, |map| map.contains_key(key))
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>, StorageError> {
        self.entries.lock().map_err(|_| StorageError::Backend("memory store poisoned".to_owned()))
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.lock()?.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// Browser `window.localStorage`.
///
/// The handle is looked up on every call so the type stays `Send + Sync`
/// for Leptos context.
#[cfg(feature = "csr")]
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

#[cfg(feature = "csr")]
impl LocalStorage {
    fn handle() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .ok_or(StorageError::Unavailable)?
            .local_storage()
            .map_err(|_| StorageError::Unavailable)?
            .ok_or(StorageError::Unavailable)
    }
}

#[cfg(feature = "csr")]
impl CredentialStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::handle()?.get_item(key).map_err(|e| StorageError::Backend(format!("{e:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::handle()?.set_item(key, value).map_err(|e| StorageError::Backend(format!("{e:?}")))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::handle()?.remove_item(key).map_err(|e| StorageError::Backend(format!("{e:?}")))
    }
}

#[cfg(feature = "csr")]
pub type DefaultStore = LocalStorage;
#[cfg(not(feature = "csr"))]
pub type DefaultStore = MemoryStore;
