//! End-to-end tests for the contact submission pipeline.
//!
//! Drives the real router with the in-memory store: intake, conditional
//! validation, spam scoring, and the admin workflow endpoints.

use axum::http::StatusCode;
use axum_test::TestServer;
use integration_tests::{fixtures, setup::TestContext};
use store::ContactStore;
use uuid::Uuid;

fn server(ctx: &TestContext) -> TestServer {
    TestServer::new(ctx.router.clone()).expect("Failed to create test server")
}

fn created_id(body: &serde_json::Value) -> Uuid {
    body["id"]
        .as_str()
        .expect("response carries an id")
        .parse()
        .expect("id is a uuid")
}

#[tokio::test]
async fn valid_inquiry_is_stored_with_zero_score() {
    let ctx = TestContext::new();
    let server = server(&ctx);

    let response = server
        .post("/api/contact")
        .add_header("X-Forwarded-For", "203.0.113.1")
        .json(&fixtures::inquiry())
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Message sent successfully!");

    let record = ContactStore::get(ctx.store.as_ref(), created_id(&body))
        .await
        .unwrap()
        .expect("record stored");
    assert_eq!(record.spam_score, 0);
    assert!(!record.is_spam);
    assert_eq!(record.origin_address.as_deref(), Some("203.0.113.1"));
}

#[tokio::test]
async fn business_profile_uses_its_own_message() {
    let ctx = TestContext::new();
    let server = server(&ctx);

    let response = server
        .post("/api/contact")
        .json(&fixtures::business_profile())
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Business details saved successfully!");
}

#[tokio::test]
async fn missing_fields_are_all_reported() {
    let ctx = TestContext::new();
    let server = server(&ctx);

    let response = server
        .post("/api/contact")
        .json(&serde_json::json!({
            "formKind": "general-inquiry",
            "message": "hello"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "VALID_002");
    let details: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(details, vec!["name", "email", "subject"]);
}

// Same payload, different form kind, different required set: the inquiry
// fields stop being mandatory once companyName is there.
#[tokio::test]
async fn form_kind_switches_the_required_set() {
    let ctx = TestContext::new();
    let server = server(&ctx);

    let mut payload = fixtures::inquiry();
    payload.as_object_mut().unwrap().remove("email");

    let response = server.post("/api/contact").json(&payload).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["details"][0], "email");

    payload["formKind"] = "business-profile".into();
    payload["companyName"] = "Acme Studio".into();

    let response = server.post("/api/contact").json(&payload).await;
    response.assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn malformed_json_returns_valid_001() {
    let ctx = TestContext::new();
    let server = server(&ctx);

    let response = server
        .post("/api/contact")
        .content_type("application/json")
        .bytes("not json at all".into())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "VALID_001");
}

#[tokio::test]
async fn spammy_submission_is_stored_flagged() {
    let ctx = TestContext::new();
    let server = server(&ctx);

    let response = server
        .post("/api/contact")
        .json(&fixtures::inquiry_with_message(fixtures::spam_message()))
        .await;

    // Spam is stored and flagged, not rejected.
    response.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = response.json();

    let record = ContactStore::get(ctx.store.as_ref(), created_id(&body))
        .await
        .unwrap()
        .unwrap();
    assert!(record.spam_score >= 55);
    assert!(record.is_spam);
}

#[tokio::test]
async fn urgent_message_is_escalated() {
    let ctx = TestContext::new();
    let server = server(&ctx);

    let response = server
        .post("/api/contact")
        .json(&fixtures::inquiry_with_message(
            "Need this ASAP for a product launch next week.",
        ))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = response.json();

    let record = ContactStore::get(ctx.store.as_ref(), created_id(&body))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.priority, intake_core::Priority::High);
    assert!(!record.is_spam);
}

#[tokio::test]
async fn listing_filters_and_redacts() {
    let ctx = TestContext::new();
    let server = server(&ctx);

    server.post("/api/contact").json(&fixtures::inquiry()).await;
    server
        .post("/api/contact")
        .json(&fixtures::business_profile())
        .await;

    let response = server
        .get("/api/contact")
        .add_query_param("formKind", "business-profile")
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["pagination"]["total"], 1);
    // Listing rows withhold origin metadata.
    assert!(body["data"][0].get("originAddress").is_none());
}

#[tokio::test]
async fn status_and_reply_workflow() {
    let ctx = TestContext::new();
    let server = server(&ctx);

    let response = server.post("/api/contact").json(&fixtures::inquiry()).await;
    let id = created_id(&response.json());

    let response = server
        .put(&format!("/api/contact/{}/status", id))
        .json(&serde_json::json!({ "status": "read" }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["data"]["status"], "read");
    assert!(body["data"]["lastReadAt"].is_string());

    let response = server
        .post(&format!("/api/contact/{}/reply", id))
        .json(&serde_json::json!({
            "message": "Thanks, we'll be in touch this week.",
            "from": "studio"
        }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["data"]["status"], "replied");
    assert_eq!(body["data"]["replies"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_status_value_is_rejected() {
    let ctx = TestContext::new();
    let server = server(&ctx);

    let response = server.post("/api/contact").json(&fixtures::inquiry()).await;
    let id = created_id(&response.json());

    let response = server
        .put(&format!("/api/contact/{}/status", id))
        .json(&serde_json::json!({ "status": "snoozed" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn reply_requires_message_and_from() {
    let ctx = TestContext::new();
    let server = server(&ctx);

    let response = server.post("/api/contact").json(&fixtures::inquiry()).await;
    let id = created_id(&response.json());

    let response = server
        .post(&format!("/api/contact/{}/reply", id))
        .json(&serde_json::json!({}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "VALID_002");
    assert_eq!(body["details"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn missing_contact_is_404() {
    let ctx = TestContext::new();
    let server = server(&ctx);

    let response = server
        .get(&format!("/api/contact/{}", Uuid::new_v4()))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_token_guards_the_listing() {
    let ctx = TestContext::with_admin_token("s3cret");
    let server = server(&ctx);

    let response = server.get("/api/contact").await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let response = server
        .get("/api/contact")
        .add_header("Authorization", "Bearer s3cret")
        .await;
    response.assert_status_ok();

    // Intake itself stays public.
    let response = server.post("/api/contact").json(&fixtures::inquiry()).await;
    response.assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn stats_reflect_stored_submissions() {
    let ctx = TestContext::new();
    let server = server(&ctx);

    server.post("/api/contact").json(&fixtures::inquiry()).await;
    server
        .post("/api/contact")
        .json(&fixtures::inquiry_with_message(fixtures::spam_message()))
        .await;

    let response = server.get("/api/contact/stats").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(body["data"]["unread"], 2);
    assert_eq!(body["data"]["spam"], 1);
}
