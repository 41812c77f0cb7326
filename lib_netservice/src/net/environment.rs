//! # Backend Environment
//!
//! Resolution of the backend base address and default auth token. An
//! environment is resolved once and treated as read-only afterwards;
//! pointing at a different backend means constructing a new service around
//! a new environment, so in-flight builders never observe a mutation.

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Environment variable holding the backend host, scheme included.
const ENV_HOST: &str = "NETSERVICE_HOST";
/// Environment variable holding the API base path, e.g. "/v1".
const ENV_API_PATH: &str = "NETSERVICE_API_PATH";
/// Environment variable holding the default `Authorization` value, if any.
const ENV_TOKEN: &str = "NETSERVICE_TOKEN";

#[derive(Debug, Error)]
/// # Environment Resolution Error
///
/// Defines the error types that can occur while resolving the backend
/// environment from process variables or a configuration file.
pub enum EnvironmentError {
    /// An I/O error occurred, typically when reading a configuration file.
    #[error("I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    /// The configuration file did not parse as an environment.
    #[error("Malformed environment file: {0}")]
    ParseError(String),

    /// An error occurred while accessing environment variables.
    #[error("Environment variable error: {0}")]
    VarError(#[from] env::VarError),

    /// A required environment variable was not found.
    #[error("Environment variable {0} is not present")]
    MissingEnvVar(String),

    /// The configured host and path do not form an absolute URL.
    #[error("missing api base url: {0}")]
    MalformedBaseUrl(String),
}

/// # Backend Environment
///
/// The read-only configuration one `NetService` instance is built around:
/// where the backend lives and which default `Authorization` value to send.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiEnvironment {
    /// Backend host, scheme included, e.g. `https://api.example.com`.
    pub host: String,
    /// Base path prefix shared by every call, e.g. `/v1`.
    pub api_path: String,
    /// Default `Authorization` header value applied to calls that carry no
    /// per-call credentials. Sent verbatim.
    pub token: Option<String>,
}

impl ApiEnvironment {
    /// Creates an environment from explicit parts.
    pub fn new(host: impl Into<String>, api_path: impl Into<String>, token: Option<String>) -> Self {
        Self {
            host: host.into(),
            api_path: api_path.into(),
            token,
        }
    }

    /// Resolve the absolute base URL for this environment.
    ///
    /// Malformed configuration is detectable here, before any request is
    /// built against it.
    pub fn api_base_url(&self) -> Result<Url, EnvironmentError> {
        let raw = format!("{}{}", self.host, self.api_path);
        Url::parse(&raw).map_err(|e| EnvironmentError::MalformedBaseUrl(format!("{raw:?}: {e}")))
    }

    /// Resolve an environment from `NETSERVICE_*` process variables.
    ///
    /// `NETSERVICE_HOST` is required; the path defaults to empty and the
    /// token to absent. The composed base URL is validated before returning.
    pub fn from_env() -> Result<Self, EnvironmentError> {
        let host = match env::var(ENV_HOST) {
            Ok(value) => value,
            Err(env::VarError::NotPresent) => {
                return Err(EnvironmentError::MissingEnvVar(ENV_HOST.to_string()))
            }
            Err(e) => return Err(EnvironmentError::VarError(e)),
        };
        let api_path = env::var(ENV_API_PATH).unwrap_or_default();
        let token = env::var(ENV_TOKEN).ok();

        let environment = Self { host, api_path, token };
        environment.api_base_url()?;
        Ok(environment)
    }

    /// Load and validate an environment from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, EnvironmentError> {
        let raw = fs::read_to_string(path)?;
        let environment: Self =
            serde_json::from_str(&raw).map_err(|e| EnvironmentError::ParseError(e.to_string()))?;
        environment.api_base_url()?;
        Ok(environment)
    }
}
