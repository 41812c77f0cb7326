//! # Typed Error Surface
//!
//! The closed error taxonomy for the networking core, plus the pure status
//! classifier. Every failure a `fetch` caller can observe is one of these
//! variants; nothing is logged-and-swallowed and nothing is retried here.

use thiserror::Error;

/// Errors surfaced by the networking core.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The descriptor and environment could not be composed into a wire
    /// request.
    #[error("Unable to form request: {0}")]
    UnableToFormRequest(String),

    /// The backend rejected the request (HTTP 4xx).
    #[error("Client Error: {0}")]
    ClientError(u16),

    /// The backend failed to serve the request (HTTP 5xx).
    #[error("Server Error: {0}")]
    ServerError(u16),

    /// The response body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    FailedToDecode(String),

    /// Transport-level failure, or a status outside the classified ranges.
    #[error("Unknown error: {0}")]
    Unknown(String),

    /// The call was canceled, either explicitly or by a superseding request
    /// to the same endpoint.
    #[error("Request canceled")]
    Canceled,
}

/// Classify an HTTP status code into the typed error surface.
///
/// Returns `None` for the success range, in which case the caller proceeds
/// to the payload. Ranges are checked in the order 2xx, 4xx, 5xx,
/// else-unknown; they never overlap, but the order is kept for determinism.
pub fn classify_status(status: u16) -> Option<ApiError> {
    match status {
        200..=299 => None,
        400..=499 => Some(ApiError::ClientError(status)),
        500..=599 => Some(ApiError::ServerError(status)),
        other => Some(ApiError::Unknown(format!("unexpected status code {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_is_total_over_http_range() {
        for status in 100u16..600 {
            let class = classify_status(status);
            match status {
                200..=299 => assert!(class.is_none(), "{status} should pass through"),
                400..=499 => {
                    assert!(matches!(class, Some(ApiError::ClientError(s)) if s == status))
                }
                500..=599 => {
                    assert!(matches!(class, Some(ApiError::ServerError(s)) if s == status))
                }
                _ => assert!(matches!(class, Some(ApiError::Unknown(_)))),
            }
        }
    }

    #[test]
    fn boundary_statuses_classify_into_their_ranges() {
        assert!(matches!(classify_status(399), Some(ApiError::Unknown(_))));
        assert!(matches!(classify_status(400), Some(ApiError::ClientError(400))));
        assert!(matches!(classify_status(499), Some(ApiError::ClientError(499))));
        assert!(matches!(classify_status(500), Some(ApiError::ServerError(500))));
        assert!(matches!(classify_status(599), Some(ApiError::ServerError(599))));
        assert!(matches!(classify_status(600), Some(ApiError::Unknown(_))));
    }

    #[test]
    fn messages_render_their_context() {
        assert_eq!(ApiError::ServerError(503).to_string(), "Server Error: 503");
        assert_eq!(ApiError::ClientError(404).to_string(), "Client Error: 404");
        assert_eq!(ApiError::Canceled.to_string(), "Request canceled");
        assert_eq!(
            ApiError::UnableToFormRequest("missing api base url".to_string()).to_string(),
            "Unable to form request: missing api base url"
        );
    }
}
