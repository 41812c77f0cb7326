//! # Secret Store
//!
//! Save/load/update surface of a persisted credential store. "Not found"
//! and "operation failed" stay distinguishable so callers can decide
//! between prompting for credentials and reporting a storage fault.

use std::collections::HashMap;
use std::sync::Mutex;

use thiserror::Error;

/// Errors surfaced by a secret store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SecretStoreError {
    /// A save or update was attempted with an empty secret.
    #[error("no secret provided")]
    NoSecret,

    /// No entry exists for the requested identity.
    #[error("no secret stored for {0}")]
    NotFound(String),

    /// The underlying store failed to perform the operation.
    #[error("secret store operation failed: {0}")]
    OperationFailed(String),
}

/// Credentials data, separated from the logic handling it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// The identity the secret is stored under.
    pub username: String,
    /// The secret associated with the identity.
    pub token: String,
}

/// A persisted credential store.
pub trait SecretStore {
    /// Store the secret for an identity, replacing any previous value.
    fn save(&self, credentials: &Credentials) -> Result<(), SecretStoreError>;

    /// Load the secret for an identity.
    fn load(&self, username: &str) -> Result<String, SecretStoreError>;

    /// Update the secret for an already-stored identity.
    fn update(&self, credentials: &Credentials) -> Result<(), SecretStoreError>;
}

/// Process-local store backing tests and keychain-less platforms.
pub struct MemorySecretStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySecretStore {
    /// An empty store.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemorySecretStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretStore for MemorySecretStore {
    fn save(&self, credentials: &Credentials) -> Result<(), SecretStoreError> {
        if credentials.token.is_empty() {
            log::warn!("Refusing to save a blank secret for {}", credentials.username);
            return Err(SecretStoreError::NoSecret);
        }
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| SecretStoreError::OperationFailed(e.to_string()))?;
        entries.insert(credentials.username.clone(), credentials.token.clone());
        Ok(())
    }

    fn load(&self, username: &str) -> Result<String, SecretStoreError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| SecretStoreError::OperationFailed(e.to_string()))?;
        entries
            .get(username)
            .cloned()
            .ok_or_else(|| SecretStoreError::NotFound(username.to_string()))
    }

    fn update(&self, credentials: &Credentials) -> Result<(), SecretStoreError> {
        if credentials.token.is_empty() {
            return Err(SecretStoreError::NoSecret);
        }
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| SecretStoreError::OperationFailed(e.to_string()))?;
        match entries.get_mut(&credentials.username) {
            Some(stored) => {
                *stored = credentials.token.clone();
                Ok(())
            }
            None => Err(SecretStoreError::NotFound(credentials.username.clone())),
        }
    }
}
