//! Router-level checks that fail before the database is touched.

use axum_test::TestServer;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};

use marathon_auth::router::build_router;
use marathon_auth::state::AppState;
use marathon_notify::{DovesoftConfig, DovesoftSender};
use marathon_testing::auth::{MockAuth, TEST_JWT_SECRET};

fn server() -> TestServer {
    let state = AppState {
        db: DatabaseConnection::default(),
        notifier: DovesoftSender::new(DovesoftConfig {
            api_url: "http://127.0.0.1:9/message".to_owned(),
            api_key: "test".to_owned(),
            waba_number: "test".to_owned(),
        }),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        admin_token_ttl_secs: 3600,
        session_token_ttl_secs: 3600,
    };
    TestServer::new(build_router(state)).unwrap()
}

#[tokio::test]
async fn should_answer_liveness_but_not_readiness_without_database() {
    let server = server();
    server.get("/healthz").await.assert_status_ok();
    let resp = server.get("/readyz").await;
    assert_eq!(resp.status_code(), 503);
}

#[tokio::test]
async fn should_tag_responses_with_request_id() {
    let resp = server().get("/healthz").await;
    assert!(resp.headers().get("x-request-id").is_some());
}

#[tokio::test]
async fn should_reject_me_without_token() {
    let resp = server().get("/api/auth/me").await;
    assert_eq!(resp.status_code(), 401);
    let body: Value = resp.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["kind"], "UNAUTHORIZED");
}

#[tokio::test]
async fn should_report_token_kind_on_me() {
    let server = server();

    let (name, value) = MockAuth::admin("desk1").header();
    let resp = server.get("/api/auth/me").add_header(name, value).await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body, json!({ "success": true, "authenticated": true, "kind": "admin" }));

    let (name, value) = MockAuth::participant("+919812345678").header();
    let resp = server.get("/api/auth/me").add_header(name, value).await;
    let body: Value = resp.json();
    assert_eq!(body["kind"], "participant");
}

#[tokio::test]
async fn should_reject_token_signed_with_other_secret() {
    let (name, value) = MockAuth::admin("desk1").with_secret("other").header();
    let resp = server().get("/api/auth/me").add_header(name, value).await;
    assert_eq!(resp.status_code(), 401);
}

#[tokio::test]
async fn should_reject_blank_phone_on_send_otp() {
    let resp = server()
        .post("/api/auth/send-register-otp")
        .json(&json!({ "phoneNumber": "" }))
        .await;
    assert_eq!(resp.status_code(), 400);
    let body: Value = resp.json();
    assert_eq!(body["kind"], "MISSING_FIELD");
    assert_eq!(body["error"], "Phone number is required");
}

#[tokio::test]
async fn should_reject_missing_otp_on_verify() {
    let resp = server()
        .post("/api/auth/verify-otp")
        .json(&json!({ "phoneNumber": "+919812345678" }))
        .await;
    assert_eq!(resp.status_code(), 400);
    let body: Value = resp.json();
    assert_eq!(body["error"], "Phone number and OTP are required");
}

#[tokio::test]
async fn should_reject_blank_login() {
    let resp = server()
        .post("/api/admin/login")
        .json(&json!({ "username": "", "password": "" }))
        .await;
    assert_eq!(resp.status_code(), 400);
}

// ── Malformed bodies ─────────────────────────────────────────────────────────

fn assert_invalid_body(resp: &axum_test::TestResponse) {
    assert_eq!(resp.status_code(), 400);
    let body: Value = resp.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["kind"], "VALIDATION");
    assert_eq!(body["error"], "Invalid request body");
}

#[tokio::test]
async fn should_reject_numeric_otp_as_validation() {
    let resp = server()
        .post("/api/auth/verify-otp")
        .json(&json!({ "phoneNumber": "+919812345678", "otp": 482913 }))
        .await;
    assert_invalid_body(&resp);
}

#[tokio::test]
async fn should_reject_null_phone_as_validation() {
    let resp = server()
        .post("/api/auth/send-register-otp")
        .json(&json!({ "phoneNumber": null }))
        .await;
    assert_invalid_body(&resp);
}

#[tokio::test]
async fn should_reject_non_json_body_as_validation() {
    let server = server();

    let resp = server
        .post("/api/admin/login")
        .text("username=desk1&password=secret")
        .await;
    assert_invalid_body(&resp);

    let resp = server
        .post("/api/auth/send-register-otp")
        .bytes("{\"phoneNumber\":".into())
        .content_type("application/json")
        .await;
    assert_invalid_body(&resp);
}
