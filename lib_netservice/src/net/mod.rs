//! # Networking Core Module
//!
//! This module is the concurrent request orchestration layer: it turns
//! declarative call descriptors into wire requests against one configured
//! backend, enforces an at-most-one-in-flight-request-per-endpoint policy,
//! and maps every outcome into a closed, typed error surface.
//!
//! ## Core Components:
//!
//! - **`request`**: the `ApiRequest` descriptor — an immutable, declarative
//!   description of one logical REST call (method, path, query, body
//!   fields, optional per-call basic auth).
//!
//! - **`environment`**: the read-only backend configuration (host, API base
//!   path, default auth token) resolved once per service instance.
//!
//! - **`builder`**: pure composition of descriptor + environment into a
//!   fully-formed wire request. No I/O happens here.
//!
//! - **`registry`**: the concurrency-critical bookkeeping — a guarded
//!   mapping from endpoint identity to the cancellable in-flight handle.
//!   Registering an endpoint that already has a live handle cancels the
//!   older transfer (single-flight supersession).
//!
//! - **`error`**: the closed `ApiError` taxonomy plus the pure status
//!   classifier.
//!
//! - **`decode`**: strict JSON decoding of successful payloads into one
//!   typed value or a typed sequence.
//!
//! - **`service`**: the `NetService` façade composing all of the above.
//!
//! Control flow: caller → `NetService::fetch_*` → `builder` → `registry`
//! (cancel-then-register) → transfer → `error`/`decode` → typed result.
//! Cancellation flows the opposite way: caller → `cancel_task` →
//! `registry` → token → the suspended transfer.

/// Pure composition of wire requests from descriptors.
pub mod builder;
/// Strict JSON decoding of successful payloads.
pub mod decode;
/// Read-only backend configuration.
pub mod environment;
/// The closed error taxonomy and status classifier.
pub mod error;
/// Guarded endpoint-to-handle bookkeeping for single-flight enforcement.
pub mod registry;
/// Declarative call descriptors.
pub mod request;
/// The request orchestrator façade.
pub mod service;

// --- Public API Re-exports ---
// Make the primary types from the core modules directly accessible.
pub use builder::{build_request, resolve_endpoint};
pub use decode::{decode_many, decode_one, EmptyResponse};
pub use environment::{ApiEnvironment, EnvironmentError};
pub use error::{classify_status, ApiError};
pub use registry::TaskRegistry;
pub use request::{ApiRequest, BasicAuth};
pub use service::{NetService, NetServiceApi, NetServiceStub};
