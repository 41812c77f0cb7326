//! # Request Descriptors
//!
//! Declarative descriptions of one logical backend call. A descriptor is
//! immutable once constructed; the builder consumes it together with an
//! `ApiEnvironment` to produce the wire request.

use std::collections::BTreeMap;
use std::fmt;

use reqwest::Method;

/// Basic-auth credentials attached to a single call.
///
/// When present, the built request carries `Authorization: Basic ...` and
/// the environment's default token is not applied to that call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAuth {
    /// The account name of the credential pair.
    pub username: String,
    /// The password of the credential pair.
    pub password: String,
}

/// A declarative description of one logical REST call.
///
/// Each variant carries exactly the fields its method needs: GET and DELETE
/// compose query parameters into the URL, POST and PUT serialize their
/// fields as a flat JSON object body. The maps are ordered so that two
/// structurally equal descriptors always resolve to the same URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    /// Fetch a resource; `query` is appended URL-encoded.
    Get {
        /// Path relative to the environment's API base.
        path: String,
        /// Query parameters, URL-encoded into the endpoint.
        query: BTreeMap<String, String>,
        /// Optional per-call credentials.
        auth: Option<BasicAuth>,
    },
    /// Create a resource; `fields` become the JSON body.
    Post {
        /// Path relative to the environment's API base.
        path: String,
        /// Body fields, serialized as a flat JSON object.
        fields: BTreeMap<String, String>,
        /// Optional per-call credentials.
        auth: Option<BasicAuth>,
    },
    /// Replace a resource; `fields` become the JSON body.
    Put {
        /// Path relative to the environment's API base.
        path: String,
        /// Body fields, serialized as a flat JSON object.
        fields: BTreeMap<String, String>,
        /// Optional per-call credentials.
        auth: Option<BasicAuth>,
    },
    /// Remove a resource; `query` is appended URL-encoded.
    Delete {
        /// Path relative to the environment's API base.
        path: String,
        /// Query parameters, URL-encoded into the endpoint.
        query: BTreeMap<String, String>,
        /// Optional per-call credentials.
        auth: Option<BasicAuth>,
    },
}

impl ApiRequest {
    /// A GET descriptor with no query parameters.
    pub fn get(path: impl Into<String>) -> Self {
        Self::Get {
            path: path.into(),
            query: BTreeMap::new(),
            auth: None,
        }
    }

    /// A POST descriptor with an empty body object.
    pub fn post(path: impl Into<String>) -> Self {
        Self::Post {
            path: path.into(),
            fields: BTreeMap::new(),
            auth: None,
        }
    }

    /// A PUT descriptor with an empty body object.
    pub fn put(path: impl Into<String>) -> Self {
        Self::Put {
            path: path.into(),
            fields: BTreeMap::new(),
            auth: None,
        }
    }

    /// A DELETE descriptor with no query parameters.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::Delete {
            path: path.into(),
            query: BTreeMap::new(),
            auth: None,
        }
    }

    /// Add a query parameter. Only meaningful on GET and DELETE; POST and
    /// PUT carry no query string.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        match &mut self {
            Self::Get { query, .. } | Self::Delete { query, .. } => {
                query.insert(key, value.into());
            }
            Self::Post { .. } | Self::Put { .. } => {
                log::warn!("Ignoring query parameter {key:?} on a body-carrying request");
            }
        }
        self
    }

    /// Add a body field. Only meaningful on POST and PUT; GET and DELETE
    /// carry no body.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        match &mut self {
            Self::Post { fields, .. } | Self::Put { fields, .. } => {
                fields.insert(key, value.into());
            }
            Self::Get { .. } | Self::Delete { .. } => {
                log::warn!("Ignoring body field {key:?} on a body-less request");
            }
        }
        self
    }

    /// Attach per-call basic-auth credentials.
    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        let credentials = BasicAuth {
            username: username.into(),
            password: password.into(),
        };
        match &mut self {
            Self::Get { auth, .. }
            | Self::Post { auth, .. }
            | Self::Put { auth, .. }
            | Self::Delete { auth, .. } => *auth = Some(credentials),
        }
        self
    }

    /// The HTTP method this descriptor maps to.
    pub fn method(&self) -> Method {
        match self {
            Self::Get { .. } => Method::GET,
            Self::Post { .. } => Method::POST,
            Self::Put { .. } => Method::PUT,
            Self::Delete { .. } => Method::DELETE,
        }
    }

    /// The path relative to the environment's API base.
    pub fn path(&self) -> &str {
        match self {
            Self::Get { path, .. }
            | Self::Post { path, .. }
            | Self::Put { path, .. }
            | Self::Delete { path, .. } => path,
        }
    }

    /// Per-call credentials, if any.
    pub fn auth(&self) -> Option<&BasicAuth> {
        match self {
            Self::Get { auth, .. }
            | Self::Post { auth, .. }
            | Self::Put { auth, .. }
            | Self::Delete { auth, .. } => auth.as_ref(),
        }
    }
}

impl fmt::Display for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_start_empty() {
        let request = ApiRequest::get("/devices");
        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.path(), "/devices");
        assert!(request.auth().is_none());
        match request {
            ApiRequest::Get { query, .. } => assert!(query.is_empty()),
            _ => panic!("expected a GET variant"),
        }
    }

    #[test]
    fn query_accumulates_on_get() {
        let request = ApiRequest::get("/devices").query("id", "42").query("kind", "tablet");
        match request {
            ApiRequest::Get { query, .. } => {
                assert_eq!(query.get("id").map(String::as_str), Some("42"));
                assert_eq!(query.get("kind").map(String::as_str), Some("tablet"));
            }
            _ => panic!("expected a GET variant"),
        }
    }

    #[test]
    fn query_is_ignored_on_post() {
        let request = ApiRequest::post("/devices").query("id", "42");
        match request {
            ApiRequest::Post { fields, .. } => assert!(fields.is_empty()),
            _ => panic!("expected a POST variant"),
        }
    }

    #[test]
    fn field_accumulates_on_put() {
        let request = ApiRequest::put("/devices/7").field("name", "ipad");
        match request {
            ApiRequest::Put { fields, .. } => {
                assert_eq!(fields.get("name").map(String::as_str), Some("ipad"));
            }
            _ => panic!("expected a PUT variant"),
        }
    }

    #[test]
    fn basic_auth_attaches_to_any_variant() {
        let request = ApiRequest::delete("/sessions/1").basic_auth("user", "pass");
        let auth = request.auth().expect("credentials attached");
        assert_eq!(auth.username, "user");
        assert_eq!(auth.password, "pass");
    }

    #[test]
    fn display_renders_method_and_path() {
        assert_eq!(ApiRequest::get("/sample").to_string(), "GET /sample");
        assert_eq!(ApiRequest::post("/sessions").to_string(), "POST /sessions");
    }

    #[test]
    fn equal_descriptors_compare_equal() {
        let a = ApiRequest::get("/sample").query("b", "2").query("a", "1");
        let b = ApiRequest::get("/sample").query("a", "1").query("b", "2");
        assert_eq!(a, b);
    }
}
