//! End-to-end tests for the portfolio resource.

use axum::http::StatusCode;
use axum_test::TestServer;
use integration_tests::{fixtures, setup::TestContext};

fn server(ctx: &TestContext) -> TestServer {
    TestServer::new(ctx.router.clone()).expect("Failed to create test server")
}

#[tokio::test]
async fn create_then_fetch_by_slug() {
    let ctx = TestContext::new();
    let server = server(&ctx);

    let response = server
        .post("/api/portfolio")
        .json(&fixtures::portfolio_item("Summer Campaign"))
        .await;
    response.assert_status(StatusCode::CREATED);

    let response = server.get("/api/portfolio/summer-campaign").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["data"]["title"], "Summer Campaign");
    assert_eq!(body["data"]["slug"], "summer-campaign");
}

#[tokio::test]
async fn duplicate_slug_returns_conflict() {
    let ctx = TestContext::new();
    let server = server(&ctx);

    server
        .post("/api/portfolio")
        .json(&fixtures::portfolio_item("Launch Film"))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/api/portfolio")
        .json(&fixtures::portfolio_item("Launch Film"))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "CONFLICT_001");
}

#[tokio::test]
async fn listing_paginates_and_exposes_filters() {
    let ctx = TestContext::new();
    let server = server(&ctx);

    for title in ["One", "Two", "Three"] {
        server
            .post("/api/portfolio")
            .json(&fixtures::portfolio_item(title))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let response = server
        .get("/api/portfolio")
        .add_query_param("limit", "2")
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["pagination"]["total"], 3);
    assert_eq!(body["pagination"]["pages"], 2);
    assert_eq!(body["filters"]["categories"][0], "video-production");
    assert_eq!(body["filters"]["years"][0], 2025);
}

#[tokio::test]
async fn drafts_are_invisible_to_the_public() {
    let ctx = TestContext::new();
    let server = server(&ctx);

    let mut draft = fixtures::portfolio_item("Hidden Project");
    draft["status"] = "draft".into();
    server
        .post("/api/portfolio")
        .json(&draft)
        .await
        .assert_status(StatusCode::CREATED);

    let response = server.get("/api/portfolio").await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["pagination"]["total"], 0);

    server
        .get("/api/portfolio/hidden-project")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_matches_titles_case_insensitively() {
    let ctx = TestContext::new();
    let server = server(&ctx);

    server
        .post("/api/portfolio")
        .json(&fixtures::portfolio_item("Neon Nights"))
        .await;
    server
        .post("/api/portfolio")
        .json(&fixtures::portfolio_item("Daylight"))
        .await;

    let response = server
        .get("/api/portfolio")
        .add_query_param("search", "NEON")
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["slug"], "neon-nights");
}

#[tokio::test]
async fn featured_listing_respects_limit() {
    let ctx = TestContext::new();
    let server = server(&ctx);

    for title in ["A", "B"] {
        let mut item = fixtures::portfolio_item(title);
        item["featured"] = true.into();
        server.post("/api/portfolio").json(&item).await;
    }
    server
        .post("/api/portfolio")
        .json(&fixtures::portfolio_item("Plain"))
        .await;

    let response = server
        .get("/api/portfolio/featured")
        .add_query_param("limit", "1")
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["featured"], true);
}

#[tokio::test]
async fn invalid_item_reports_violated_fields() {
    let ctx = TestContext::new();
    let server = server(&ctx);

    let mut item = fixtures::portfolio_item("Bad Year");
    item["year"] = 1999.into();

    let response = server.post("/api/portfolio").json(&item).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "VALID_002");
    assert_eq!(body["details"][0], "year");
}
