//! # Response Decoding
//!
//! Strict deserialization of successful payloads. Any structural or type
//! mismatch is rewrapped as `ApiError::FailedToDecode` so callers can tell
//! "the backend returned malformed data" apart from transport and status
//! failures.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::net::error::ApiError;

/// The empty success shape, for endpoints that answer `{}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct EmptyResponse {}

/// Decode a payload into a single value of the target shape.
pub fn decode_one<T: DeserializeOwned>(payload: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(payload).map_err(|e| ApiError::FailedToDecode(e.to_string()))
}

/// Decode a payload into a sequence of the target shape.
pub fn decode_many<T: DeserializeOwned>(payload: &[u8]) -> Result<Vec<T>, ApiError> {
    serde_json::from_slice(payload).map_err(|e| ApiError::FailedToDecode(e.to_string()))
}
