//! End-to-end tests for the admission gate on the intake endpoint.

use api::GateConfig;
use axum::http::StatusCode;
use axum_test::TestServer;
use integration_tests::{fixtures, setup::TestContext};

fn small_gate() -> TestContext {
    TestContext::with_gate(GateConfig {
        window_ms: 60_000,
        max_requests: 2,
    })
}

#[tokio::test]
async fn sixth_request_in_window_is_rejected() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    for _ in 0..5 {
        let response = server
            .post("/api/contact")
            .add_header("X-Forwarded-For", "10.0.0.1")
            .json(&fixtures::inquiry())
            .await;
        response.assert_status(StatusCode::CREATED);
    }

    let response = server
        .post("/api/contact")
        .add_header("X-Forwarded-For", "10.0.0.1")
        .json(&fixtures::inquiry())
        .await;

    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    let retry_header: u64 = response
        .headers()
        .get("Retry-After")
        .expect("Retry-After header present")
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!(retry_header > 0);

    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "RATE_001");
    assert!(body["retryAfter"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn identities_do_not_share_windows() {
    let ctx = small_gate();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    for _ in 0..2 {
        server
            .post("/api/contact")
            .add_header("X-Forwarded-For", "10.0.0.1")
            .json(&fixtures::inquiry())
            .await
            .assert_status(StatusCode::CREATED);
    }

    server
        .post("/api/contact")
        .add_header("X-Forwarded-For", "10.0.0.1")
        .json(&fixtures::inquiry())
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);

    // A different source address is still admitted.
    server
        .post("/api/contact")
        .add_header("X-Forwarded-For", "10.0.0.2")
        .json(&fixtures::inquiry())
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn rejected_requests_are_not_stored() {
    let ctx = small_gate();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    for _ in 0..3 {
        server
            .post("/api/contact")
            .add_header("X-Forwarded-For", "10.0.0.1")
            .json(&fixtures::inquiry())
            .await;
    }

    let response = server.get("/api/contact").await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["pagination"]["total"], 2);
}

// Invalid payloads still consume a slot: the gate runs before validation,
// so a flood of broken submissions cannot bypass it.
#[tokio::test]
async fn gate_runs_before_validation() {
    let ctx = small_gate();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    for _ in 0..2 {
        server
            .post("/api/contact")
            .add_header("X-Forwarded-For", "10.0.0.1")
            .json(&serde_json::json!({ "formKind": "general-inquiry" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    server
        .post("/api/contact")
        .add_header("X-Forwarded-For", "10.0.0.1")
        .json(&fixtures::inquiry())
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn reads_are_never_gated() {
    let ctx = small_gate();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    for _ in 0..10 {
        server
            .get("/api/portfolio")
            .add_header("X-Forwarded-For", "10.0.0.1")
            .await
            .assert_status_ok();
    }
}
