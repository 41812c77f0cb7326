//! # `NetService` Live Smoke Tests
//!
//! Manual integration runner for the `lib_netservice` orchestrator. It uses
//! the `httpbin.org` service as a public, well-behaved endpoint to exercise
//! URL composition, authorization handling, status classification, and JSON
//! body handling over a real network.
//!
//! ## Purpose:
//! The in-crate unit tests cover the orchestrator against a local stub
//! server; this runner confirms the same behavior against a live backend.
//! It is a manual tool, not part of `cargo test`.
//!
//! These tests are executed asynchronously using `tokio::main`.

use std::collections::HashMap;

use lib_netservice::net::{ApiEnvironment, ApiError, ApiRequest, NetService, NetServiceApi};
use serde::Deserialize;

/// # Httpbin Response Model
///
/// A utility struct to deserialize responses from `httpbin.org`, which
/// echoes back parts of the request (headers, URL, query args, JSON body).
#[derive(Debug, Deserialize)]
struct HttpbinResponse {
    /// Echoed headers sent with the request.
    headers: Option<HashMap<String, String>>,
    /// The URL that was hit, as seen by httpbin.org.
    url: Option<String>,
    /// Echoed query parameters.
    args: Option<HashMap<String, String>>,
    /// The JSON body that was sent in a POST request.
    json: Option<serde_json::Value>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    // We use a recognizable opaque token so the echo tests can assert on it.
    let environment = ApiEnvironment::new("https://httpbin.org", "", Some("test_secret_123".to_string()));
    let service = NetService::new(environment);

    println!("--- Starting NetService Live Tests ---");

    // --- TEST 1: URL Joining, Query Composition & Success Decoding ---
    println!("\n[Test 1] Testing URL joining and query composition...");
    let request = ApiRequest::get("/get").query("id", "42");
    let res1: HttpbinResponse = service.fetch_one(&request).await?;
    assert_eq!(
        res1.args.as_ref().and_then(|args| args.get("id")).map(String::as_str),
        Some("42")
    );
    println!("✅ URL Joined: {:?}", res1.url);

    // --- TEST 2: Default Token Applied Verbatim ---
    println!("\n[Test 2] Testing the default Authorization value...");
    let res2: HttpbinResponse = service.fetch_one(&ApiRequest::get("/headers")).await?;
    let headers = res2.headers.unwrap_or_default();
    assert_eq!(
        headers.get("Authorization").map(String::as_str),
        Some("test_secret_123")
    );
    println!("✅ Auth Token: {:?}", headers.get("Authorization"));

    // --- TEST 3: Basic Auth Overrides the Default Token ---
    println!("\n[Test 3] Testing per-call basic auth...");
    let request = ApiRequest::get("/basic-auth/user/passwd").basic_auth("user", "passwd");
    let res3: serde_json::Value = service.fetch_one(&request).await?;
    assert_eq!(res3["authenticated"], serde_json::json!(true));
    println!("✅ Basic auth accepted");

    // --- TEST 4: Client Error Classification ---
    println!("\n[Test 4] Testing 404 classification...");
    let err = service
        .fetch_one::<serde_json::Value>(&ApiRequest::get("/status/404"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::ClientError(404)));
    println!("✅ 404 classified: {err}");

    // --- TEST 5: Server Error Classification ---
    println!("\n[Test 5] Testing 503 classification...");
    let err = service
        .fetch_one::<serde_json::Value>(&ApiRequest::get("/status/503"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::ServerError(503)));
    println!("✅ 503 classified: {err}");

    // --- TEST 6: POST Body Round-Trip ---
    println!("\n[Test 6] Testing POST body serialization...");
    let request = ApiRequest::post("/post").field("message", "Hello from Rust");
    let res6: HttpbinResponse = service.fetch_one(&request).await?;
    assert_eq!(
        res6.json,
        Some(serde_json::json!({ "message": "Hello from Rust" }))
    );
    println!("✅ POST Success. Server received: {:?}", res6.json);

    // --- TEST 7: Registry Drained After the Burst ---
    println!("\n[Test 7] Checking registry cleanup...");
    assert_eq!(service.inflight_tasks(), 0);
    service.cancel_all_tasks();
    println!("✅ No lingering in-flight entries");

    println!("\n--- All Live Tests Passed Successfully ---");
    Ok(())
}
