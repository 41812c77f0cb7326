//! # Request Builder
//!
//! Pure composition of a wire request from a descriptor and an environment.
//! No I/O happens here; every failure surfaces as
//! `ApiError::UnableToFormRequest` with a human-readable cause.

use base64::engine::general_purpose;
use base64::Engine as _;
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Request, RequestBuilder};
use url::Url;

use crate::net::environment::ApiEnvironment;
use crate::net::error::ApiError;
use crate::net::request::{ApiRequest, BasicAuth};

/// Resolve the endpoint identity of a descriptor: the absolute URL its
/// built request will target.
///
/// This is the key under which the call is tracked and canceled, so it must
/// be computable without building the full request.
pub fn resolve_endpoint(environment: &ApiEnvironment, request: &ApiRequest) -> Result<Url, ApiError> {
    let base = environment
        .api_base_url()
        .map_err(|e| ApiError::UnableToFormRequest(e.to_string()))?;
    if base.cannot_be_a_base() {
        return Err(ApiError::UnableToFormRequest("missing url".to_string()));
    }

    let mut url = base;
    append_path(&mut url, request.path());

    // Query parameters only exist on GET and DELETE; an empty map leaves
    // the URL without a query string entirely.
    if let ApiRequest::Get { query, .. } | ApiRequest::Delete { query, .. } = request {
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
    }

    Ok(url)
}

/// Compose the full wire request for a descriptor under an environment.
pub fn build_request(
    client: &Client,
    environment: &ApiEnvironment,
    request: &ApiRequest,
) -> Result<Request, ApiError> {
    let url = resolve_endpoint(environment, request)?;

    let mut builder = client.request(request.method(), url);
    builder = builder.header(CONTENT_TYPE, "application/json");
    builder = apply_authorization(builder, environment, request.auth())?;

    // POST and PUT carry their fields as a flat JSON object; an empty map
    // still produces an explicit `{}` body.
    if let ApiRequest::Post { fields, .. } | ApiRequest::Put { fields, .. } = request {
        let body = serde_json::to_vec(fields)
            .map_err(|e| ApiError::UnableToFormRequest(format!("unserializable body: {e}")))?;
        builder = builder.body(body);
    }

    builder
        .build()
        .map_err(|e| ApiError::UnableToFormRequest(e.to_string()))
}

/// Append a call path to the environment's base path.
///
/// The base path is kept: base `/v1` + path `/sample` resolves to
/// `/v1/sample`.
fn append_path(url: &mut Url, path: &str) {
    if path.is_empty() {
        return;
    }
    let joined = format!(
        "{}/{}",
        url.path().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    url.set_path(&joined);
}

/// Set the `Authorization` header for one call.
///
/// Per-call basic-auth credentials win over the environment's default
/// token; the two are never combined.
fn apply_authorization(
    builder: RequestBuilder,
    environment: &ApiEnvironment,
    auth: Option<&BasicAuth>,
) -> Result<RequestBuilder, ApiError> {
    if let Some(credentials) = auth {
        let pair = format!("{}:{}", credentials.username, credentials.password);
        let value = format!("Basic {}", general_purpose::STANDARD.encode(pair));
        return Ok(builder.header(AUTHORIZATION, value));
    }

    if let Some(token) = &environment.token {
        let value = HeaderValue::from_str(token)
            .map_err(|e| ApiError::UnableToFormRequest(format!("malformed default token: {e}")))?;
        return Ok(builder.header(AUTHORIZATION, value));
    }

    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn environment() -> ApiEnvironment {
        ApiEnvironment::new(
            "https://api.example.com",
            "/v1",
            Some("Token sekret".to_string()),
        )
    }

    #[test]
    fn get_composes_base_path_and_query() {
        let request = ApiRequest::get("/sample").query("id", "42");
        let url = resolve_endpoint(&environment(), &request).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/sample?id=42");
    }

    #[test]
    fn empty_query_leaves_no_query_string() {
        let request = ApiRequest::get("/sample");
        let url = resolve_endpoint(&environment(), &request).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/sample");
        assert!(url.query().is_none());
    }

    #[test]
    fn query_order_is_deterministic() {
        let request = ApiRequest::get("/sample").query("b", "2").query("a", "1");
        let url = resolve_endpoint(&environment(), &request).unwrap();
        assert_eq!(url.query(), Some("a=1&b=2"));
    }

    #[test]
    fn query_values_are_url_encoded() {
        let request = ApiRequest::get("/search").query("q", "a b&c");
        let url = resolve_endpoint(&environment(), &request).unwrap();
        assert_eq!(url.query(), Some("q=a+b%26c"));
    }

    #[test]
    fn content_type_is_always_json() {
        let wire = build_request(&Client::new(), &environment(), &ApiRequest::get("/sample")).unwrap();
        assert_eq!(
            wire.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
    }

    #[test]
    fn default_token_is_applied_verbatim() {
        let wire = build_request(&Client::new(), &environment(), &ApiRequest::get("/sample")).unwrap();
        assert_eq!(
            wire.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok()),
            Some("Token sekret")
        );
    }

    #[test]
    fn basic_auth_overrides_the_default_token() {
        let request = ApiRequest::get("/sample").basic_auth("user", "pass");
        let wire = build_request(&Client::new(), &environment(), &request).unwrap();
        let expected = format!("Basic {}", general_purpose::STANDARD.encode("user:pass"));
        let values: Vec<_> = wire.headers().get_all(AUTHORIZATION).iter().collect();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0].to_str().unwrap(), expected);
    }

    #[test]
    fn absent_token_sends_no_authorization() {
        let environment = ApiEnvironment::new("https://api.example.com", "/v1", None);
        let wire = build_request(&Client::new(), &environment, &ApiRequest::get("/sample")).unwrap();
        assert!(wire.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn post_serializes_fields_as_a_flat_object() {
        let request = ApiRequest::post("/devices").field("name", "ipad");
        let wire = build_request(&Client::new(), &environment(), &request).unwrap();
        let body = wire.body().and_then(|b| b.as_bytes()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(body).unwrap();
        assert_eq!(value, serde_json::json!({ "name": "ipad" }));
    }

    #[test]
    fn post_without_fields_sends_an_empty_object() {
        let wire = build_request(&Client::new(), &environment(), &ApiRequest::post("/devices")).unwrap();
        let body = wire.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(body, &b"{}"[..]);
    }

    #[test]
    fn put_resolves_without_query_parameters() {
        let request = ApiRequest::put("/devices/7").field("name", "ipad");
        let url = resolve_endpoint(&environment(), &request).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/devices/7");
    }

    #[test]
    fn missing_base_url_is_unable_to_form_request() {
        let environment = ApiEnvironment::new("", "", None);
        let err = resolve_endpoint(&environment, &ApiRequest::get("/sample")).unwrap_err();
        assert!(
            matches!(&err, ApiError::UnableToFormRequest(cause) if cause.contains("missing api base url")),
            "unexpected error: {err}"
        );
    }
}
