//! # Storage Collaborators
//!
//! Interfaces to the two persistence services the networking layer's
//! callers lean on: a secret store for credentials and a byte cache for
//! downloaded payloads. The orchestrator itself never touches either —
//! calling layers source per-call credentials from the secret store and
//! consult the cache before re-fetching.
//!
//! Both come with process-local in-memory implementations for tests and
//! platforms without the backing system service.

/// Binary cache keyed by remote URL.
pub mod bytecache;
/// Persisted credential storage.
pub mod secrets;

// --- Public API Re-exports ---
pub use bytecache::{ByteCache, MemoryByteCache};
pub use secrets::{Credentials, MemorySecretStore, SecretStore, SecretStoreError};
