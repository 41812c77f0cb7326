//! # Task Registry
//!
//! The concurrency-critical mapping from endpoint identity to the in-flight
//! cancellable handle. Every access is a short exclusive critical section
//! that only touches the map; no I/O or decoding happens under the lock.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio_util::sync::CancellationToken;
use url::Url;

/// Endpoint-keyed bookkeeping of in-flight operations.
///
/// At most one handle per endpoint is active at any time: registering an
/// endpoint that already holds a live handle cancels the older transfer
/// before the fresh handle is installed. Entries carry a generation so a
/// finished call can only ever evict its own entry, never the entry of a
/// call that superseded it.
pub struct TaskRegistry {
    inflight: Arc<Mutex<HashMap<Url, (u64, CancellationToken)>>>,
    generation: AtomicU64,
}

impl TaskRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            inflight: Arc::new(Mutex::new(HashMap::new())),
            generation: AtomicU64::new(0),
        }
    }

    /// Install a fresh handle for `endpoint`, cancelling any handle already
    /// registered there.
    ///
    /// The superseded transfer receives its cancellation request before the
    /// new handle is installed, both under the same critical section.
    pub fn register_or_supersede(&self, endpoint: &Url) -> (u64, CancellationToken) {
        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
        let token = CancellationToken::new();

        let mut inflight = self.inflight.lock().expect("TaskRegistry lock poisoned");
        if let Some((_, superseded)) = inflight.remove(endpoint) {
            superseded.cancel();
            log::debug!("Superseded in-flight request for {endpoint}");
        }
        inflight.insert(endpoint.clone(), (generation, token.clone()));

        (generation, token)
    }

    /// Drop the entry for `endpoint` if it still belongs to `generation`.
    ///
    /// Idempotent: completed, superseded, and explicitly canceled calls may
    /// all race here safely.
    pub fn remove(&self, endpoint: &Url, generation: u64) {
        let mut inflight = self.inflight.lock().expect("TaskRegistry lock poisoned");
        if inflight.get(endpoint).is_some_and(|(owner, _)| *owner == generation) {
            inflight.remove(endpoint);
        }
    }

    /// Cancel and remove the entry for one endpoint. No-op if absent.
    pub fn cancel(&self, endpoint: &Url) {
        let mut inflight = self.inflight.lock().expect("TaskRegistry lock poisoned");
        if let Some((_, token)) = inflight.remove(endpoint) {
            token.cancel();
            log::debug!("Canceled in-flight request for {endpoint}");
        }
    }

    /// Cancel and remove every entry. Used for bulk teardown.
    pub fn cancel_all(&self) {
        let mut inflight = self.inflight.lock().expect("TaskRegistry lock poisoned");
        for (endpoint, (_, token)) in inflight.drain() {
            token.cancel();
            log::debug!("Canceled in-flight request for {endpoint}");
        }
    }

    /// Number of logically in-flight operations at this observation point.
    pub fn len(&self) -> usize {
        self.inflight.lock().expect("TaskRegistry lock poisoned").len()
    }

    /// Whether no operation is in flight at this observation point.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TaskRegistry {
    fn default() -> Self {
        Self::new()
    }
}
