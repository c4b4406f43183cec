use crate::e2e::helpers;

use helpers::assertions::{assert_error_envelope, assert_redacted_envelope};
use helpers::TestContext;
use hyper::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;
use student_admin_backend::infrastructure::config::Environment;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_answer_unknown_routes_with_not_found(ctx: &TestContext) {
    let response = ctx.client.get("/api/nope?x=1").await.unwrap();

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        response.body(),
        &json!({
            "success": false,
            "message": "Route /api/nope not found",
            "code": "NOT_FOUND"
        })
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_answer_unsupported_methods_on_known_routes_with_not_found(ctx: &TestContext) {
    let response = ctx
        .client
        .send(Method::POST, "/api/dashboard/stats", &[])
        .await
        .unwrap();

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        response.body(),
        &json!({
            "success": false,
            "message": "Route /api/dashboard/stats not found",
            "code": "NOT_FOUND"
        })
    );

    let logs = ctx.logged(1).await;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].method, "POST");
    assert_eq!(logs[0].url, "/api/dashboard/stats");
    assert_eq!(logs[0].error_code, "NOT_FOUND");
    assert_eq!(ctx.catalog.requests(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_log_handled_errors_with_request_context(ctx: &TestContext) {
    let response = ctx
        .client
        .get_with_headers(
            "/api/nope",
            &[
                ("user-agent", "e2e-suite"),
                ("x-forwarded-for", "198.51.100.4"),
                ("x-request-id", "req-e2e-1"),
            ],
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_header("x-request-id", "req-e2e-1");

    let entries = ctx.logged(1).await;
    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry.error_code, "NOT_FOUND");
    assert_eq!(entry.severity, "error");
    assert_eq!(entry.message, "Route /api/nope not found");
    assert_eq!(entry.url, "/api/nope");
    assert_eq!(entry.method, "GET");
    assert_eq!(entry.ip.as_deref(), Some("198.51.100.4"));
    assert_eq!(entry.user_agent.as_deref(), Some("e2e-suite"));
    assert_eq!(entry.metadata["requestId"], "req-e2e-1");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_use_the_peer_address_without_forwarding_headers(ctx: &TestContext) {
    ctx.client.get("/api/nope").await.unwrap();

    let entries = ctx.logged(1).await;
    assert_eq!(entries[0].ip.as_deref(), Some("127.0.0.1"));
    // A generated id is still recorded
    assert!(entries[0].metadata["requestId"].as_str().is_some());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_every_violation_in_development(ctx: &TestContext) {
    let response = ctx
        .client
        .get("/api/error-logs?page=0&limit=500&sort=asc")
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.body();
    assert_error_envelope(body, "VALIDATION_ERROR");
    assert_eq!(
        body["details"],
        json!([
            "Page must be at least 1.",
            "Limit must be at most 100.",
            "\"sort\" is not allowed"
        ])
    );
    response.assert_error_message("Validation error: Page must be at least 1.");

    let entries = ctx.logged(1).await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].severity, "warning");
}

#[tokio::test]
async fn it_should_redact_every_error_in_production() {
    let ctx = TestContext::start(Environment::Production).await.unwrap();

    for (path, status) in [
        ("/api/nope", StatusCode::NOT_FOUND),
        ("/api/dashboard/activities?page=9", StatusCode::BAD_REQUEST),
        ("/api/error-logs/not-a-uuid", StatusCode::BAD_REQUEST),
    ] {
        let response = ctx.client.get(path).await.unwrap();
        response.assert_status(status);
        assert_redacted_envelope(response.body());
    }

    // Redaction only affects the response; full details are still logged
    let entries = ctx.logged(3).await;
    assert_eq!(entries.len(), 3);
    assert!(entries
        .iter()
        .any(|entry| entry.message == "Route /api/nope not found"));
}

#[tokio::test]
async fn it_should_keep_success_bodies_in_production() {
    let ctx = TestContext::start(Environment::Production).await.unwrap();

    let response = ctx.client.get("/api/dashboard/stats").await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.body()["success"], true);
    assert!(ctx.store.is_empty());
}
