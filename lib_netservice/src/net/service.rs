//! # Request Orchestrator
//!
//! The façade composing the networking core: build the wire request, enforce
//! the single-flight-per-endpoint policy through the `TaskRegistry`, execute
//! the transfer, classify the outcome and decode the payload.
//!
//! ## Call lifecycle
//!
//! `Building → Registered → InFlight → {Completed, Canceled, Failed}`
//!
//! Issuing a second fetch for an endpoint whose transfer is still in flight
//! cancels the first transfer; the superseded caller observes
//! `ApiError::Canceled`. Cancellation of a transfer that already produced a
//! result is best-effort: the late result is discarded, never delivered.
//!
//! One orchestrator instance is constructed at session start and passed
//! explicitly to callers; the environment it is built around stays read-only
//! for its whole lifetime.

use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::net::builder;
use crate::net::decode;
use crate::net::environment::ApiEnvironment;
use crate::net::error::{classify_status, ApiError};
use crate::net::registry::TaskRegistry;
use crate::net::request::ApiRequest;

/// Cancellation surface of the orchestrator.
///
/// Callers that only tear calls down (view dismissal, session end) can
/// depend on this trait instead of the concrete service.
pub trait NetServiceApi {
    /// Cancel the in-flight call for one endpoint. No-op if none is active.
    fn cancel_task(&self, endpoint: &Url);
    /// Cancel every in-flight call.
    fn cancel_all_tasks(&self);
}

/// The concurrent request orchestrator.
pub struct NetService {
    client: Client,
    environment: ApiEnvironment,
    tasks: TaskRegistry,
}

impl NetService {
    /// Create an orchestrator around one backend environment.
    pub fn new(environment: ApiEnvironment) -> Self {
        Self {
            client: Client::new(),
            environment,
            tasks: TaskRegistry::new(),
        }
    }

    /// The environment this service was built around.
    pub fn environment(&self) -> &ApiEnvironment {
        &self.environment
    }

    /// Fetch and decode a single value of the target shape.
    pub async fn fetch_one<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T, ApiError> {
        let payload = self.initiate_request(request).await?;
        decode::decode_one(&payload)
    }

    /// Fetch and decode a sequence of values of the target shape.
    pub async fn fetch_many<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
    ) -> Result<Vec<T>, ApiError> {
        let payload = self.initiate_request(request).await?;
        decode::decode_many(&payload)
    }

    /// The endpoint identity a descriptor resolves to under this service's
    /// environment; the key accepted by `cancel_task`.
    pub fn resolve_endpoint(&self, request: &ApiRequest) -> Result<Url, ApiError> {
        builder::resolve_endpoint(&self.environment, request)
    }

    /// Number of logically in-flight calls at this observation point.
    pub fn inflight_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// Execute one transfer under the single-flight policy, returning the
    /// raw payload of a successful response.
    ///
    /// The call suspends awaiting the transport and resumes exactly once:
    /// with the classified outcome, or with `Canceled` as soon as its handle
    /// is cancelled. The registry entry is removed on every terminal path.
    async fn initiate_request(&self, request: &ApiRequest) -> Result<Vec<u8>, ApiError> {
        let wire = builder::build_request(&self.client, &self.environment, request)?;
        let endpoint = wire.url().clone();

        let (generation, token) = self.tasks.register_or_supersede(&endpoint);
        log::debug!("Dispatching {request} -> {endpoint}");

        let transfer = async {
            let response = self
                .client
                .execute(wire)
                .await
                .map_err(|e| ApiError::Unknown(e.to_string()))?;

            // Classify before touching the body; the decoder is never
            // invoked for a non-success status.
            let status = response.status().as_u16();
            if let Some(error) = classify_status(status) {
                return Err(error);
            }

            let payload = response
                .bytes()
                .await
                .map_err(|e| ApiError::Unknown(e.to_string()))?;
            Ok(payload.to_vec())
        };

        // Dropping the transfer future aborts the underlying transfer.
        let outcome = tokio::select! {
            _ = token.cancelled() => Err(ApiError::Canceled),
            outcome = transfer => outcome,
        };

        self.tasks.remove(&endpoint, generation);

        // A transfer that outran its cancellation request is discarded
        // rather than delivered; the cancellation wins.
        if token.is_cancelled() {
            return Err(ApiError::Canceled);
        }
        outcome
    }
}

impl NetServiceApi for NetService {
    fn cancel_task(&self, endpoint: &Url) {
        self.tasks.cancel(endpoint);
    }

    fn cancel_all_tasks(&self) {
        self.tasks.cancel_all();
    }
}

/// A no-op cancellation surface for callers' tests.
pub struct NetServiceStub;

impl NetServiceApi for NetServiceStub {
    fn cancel_task(&self, _endpoint: &Url) {}

    fn cancel_all_tasks(&self) {}
}
