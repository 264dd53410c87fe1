//! Mark API tests.
//!
//! These tests require a running PostgreSQL database.
//! Set DATABASE_URL before running.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;

use common::fixtures;
use common::TestContext;

/// Test upserting and listing marks.
#[tokio::test]
#[ignore = "requires database"]
async fn test_upsert_and_list_marks() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (user_id, token) = ctx.create_test_user(None).await;

    let response = server
        .put("/api/marks")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .json(&fixtures::mark_request("grammar", 42, 3))
        .await;

    response.assert_status_ok();

    let response = server
        .get("/api/marks")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();

    let marks = body["marks"].as_array().unwrap();
    assert_eq!(marks.len(), 1);
    assert_eq!(marks[0]["item_kind"].as_str().unwrap(), "grammar");
    assert_eq!(marks[0]["item_id"].as_i64().unwrap(), 42);
    assert_eq!(marks[0]["level"].as_u64().unwrap(), 3);

    // Cleanup
    ctx.cleanup_user(user_id).await;
}

/// Test re-marking an item overwrites the previous level.
#[tokio::test]
#[ignore = "requires database"]
async fn test_remark_overwrites_level() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (user_id, token) = ctx.create_test_user(None).await;

    for level in [5, 1] {
        let response = server
            .put("/api/marks")
            .add_header(
                axum::http::header::AUTHORIZATION,
                TestContext::auth_header_value(&token),
            )
            .json(&fixtures::mark_request("grammar", 7, level))
            .await;
        response.assert_status_ok();
    }

    let response = server
        .get("/api/marks")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();

    let marks = body["marks"].as_array().unwrap();
    assert_eq!(marks.len(), 1);
    assert_eq!(marks[0]["level"].as_u64().unwrap(), 1);

    // Cleanup
    ctx.cleanup_user(user_id).await;
}

/// Test mark counts aggregate by level.
#[tokio::test]
#[ignore = "requires database"]
async fn test_mark_counts() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (user_id, token) = ctx.create_test_user(None).await;

    // One monthly-review grammar mark, one don't-know conjunction mark
    for (kind, id, level) in [("grammar", 1, 1), ("conjunction", 1, 5)] {
        let response = server
            .put("/api/marks")
            .add_header(
                axum::http::header::AUTHORIZATION,
                TestContext::auth_header_value(&token),
            )
            .json(&fixtures::mark_request(kind, id, level))
            .await;
        response.assert_status_ok();
    }

    let response = server
        .get("/api/marks/counts")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();

    assert_eq!(body["marked_total"].as_u64().unwrap(), 2);
    assert_eq!(body["needs_review"].as_u64().unwrap(), 1);
    let counts = body["counts"].as_array().unwrap();
    assert_eq!(counts[1].as_u64().unwrap(), 1);
    assert_eq!(counts[5].as_u64().unwrap(), 1);

    // Cleanup
    ctx.cleanup_user(user_id).await;
}

/// Test an unknown item kind is rejected.
#[tokio::test]
#[ignore = "requires database"]
async fn test_mark_rejects_unknown_kind() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (user_id, token) = ctx.create_test_user(None).await;

    let response = server
        .put("/api/marks")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .json(&fixtures::mark_request("verb", 1, 1))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    // Cleanup
    ctx.cleanup_user(user_id).await;
}

/// Test an out-of-range level is rejected.
#[tokio::test]
#[ignore = "requires database"]
async fn test_mark_rejects_out_of_range_level() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (user_id, token) = ctx.create_test_user(None).await;

    let response = server
        .put("/api/marks")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .json(&fixtures::mark_request("grammar", 1, 6))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    // Cleanup
    ctx.cleanup_user(user_id).await;
}
