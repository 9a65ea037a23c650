//! Router-level checks that resolve before the database is touched.

use axum_test::TestServer;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};

use marathon_notify::template::DEFAULT_PASS_PLACEHOLDER;
use marathon_notify::{DovesoftConfig, DovesoftSender};
use marathon_participants::router::build_router;
use marathon_participants::state::AppState;
use marathon_testing::auth::{MockAuth, TEST_JWT_SECRET};

use crate::helpers::TEST_PHONE;

fn server() -> TestServer {
    let state = AppState {
        db: DatabaseConnection::default(),
        notifier: DovesoftSender::new(DovesoftConfig {
            api_url: "http://127.0.0.1:9/message".to_owned(),
            api_key: "test".to_owned(),
            waba_number: "test".to_owned(),
        }),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        pass_placeholder_url: DEFAULT_PASS_PLACEHOLDER.to_owned(),
    };
    TestServer::new(build_router(state)).unwrap()
}

fn assert_error(resp: &axum_test::TestResponse, status: u16, kind: &str) {
    assert_eq!(resp.status_code(), status);
    let body: Value = resp.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["kind"], kind);
}

#[tokio::test]
async fn should_answer_liveness_but_not_readiness_without_database() {
    let server = server();
    server.get("/healthz").await.assert_status_ok();
    assert_eq!(server.get("/readyz").await.status_code(), 503);
}

// ── Token gate ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_admin_routes_without_token() {
    let server = server();
    for path in [
        "/api/admin/users",
        "/api/admin/user/Ab12Cd",
        "/api/admin/user/Ab12Cd/related",
        "/api/admin/check-user/Ab12Cd",
        "/api/admin/dashboard-stats",
    ] {
        let resp = server.get(path).await;
        assert_error(&resp, 401, "UNAUTHORIZED");
    }
    let resp = server.post("/api/admin/log-scan").json(&json!({})).await;
    assert_error(&resp, 401, "UNAUTHORIZED");
}

#[tokio::test]
async fn should_reject_participant_token_on_admin_route() {
    let (name, value) = MockAuth::participant(TEST_PHONE).header();
    let resp = server()
        .get("/api/admin/dashboard-stats")
        .add_header(name, value)
        .await;
    assert_error(&resp, 401, "UNAUTHORIZED");
}

#[tokio::test]
async fn should_reject_admin_token_on_passes_route() {
    let (name, value) = MockAuth::admin("desk1").header();
    let resp = server()
        .post("/api/user/passes")
        .add_header(name, value)
        .await;
    assert_error(&resp, 401, "UNAUTHORIZED");
}

#[tokio::test]
async fn should_reject_token_signed_with_other_secret() {
    let (name, value) = MockAuth::admin("desk1").with_secret("other").header();
    let resp = server()
        .get("/api/admin/check-user/Ab12Cd")
        .add_header(name, value)
        .await;
    assert_eq!(resp.status_code(), 401);
}

// ── Validation before storage ────────────────────────────────────────────────

#[tokio::test]
async fn should_require_user_id_on_log_scan() {
    let (name, value) = MockAuth::admin("desk1").header();
    let resp = server()
        .post("/api/admin/log-scan")
        .add_header(name, value)
        .json(&json!({}))
        .await;
    assert_error(&resp, 400, "MISSING_FIELD");
    let body: Value = resp.json();
    assert_eq!(body["error"], "User ID is required");
}

#[tokio::test]
async fn should_reject_empty_check_in() {
    let (name, value) = MockAuth::admin("desk1").header();
    let resp = server()
        .patch("/api/admin/user/Ab12Cd/check-in")
        .add_header(name, value)
        .json(&json!({}))
        .await;
    assert_error(&resp, 400, "MISSING_FIELD");
}

#[tokio::test]
async fn should_reject_blanked_name_on_update() {
    let (name, value) = MockAuth::admin("desk1").header();
    let resp = server()
        .put("/api/admin/user/Ab12Cd")
        .add_header(name, value)
        .json(&json!({ "firstName": "   " }))
        .await;
    assert_error(&resp, 400, "VALIDATION");
}

#[tokio::test]
async fn should_report_unknown_id_shape_as_absent() {
    let (name, value) = MockAuth::admin("desk1").header();
    let resp = server()
        .get("/api/admin/check-user/not-an-id")
        .add_header(name, value)
        .await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body, json!({ "success": true, "exists": false }));
}

#[tokio::test]
async fn should_return_not_found_for_malformed_public_id() {
    let resp = server().get("/api/public/user/abc").await;
    assert_error(&resp, 404, "PARTICIPANT_NOT_FOUND");
}

#[tokio::test]
async fn should_reject_incomplete_registration() {
    let resp = server()
        .post("/api/register")
        .json(&json!({ "firstName": "Asha", "phoneNumber": TEST_PHONE }))
        .await;
    assert_error(&resp, 400, "MISSING_FIELD");
}

#[tokio::test]
async fn should_reject_duplicate_check_without_fields() {
    let resp = server()
        .post("/api/check-duplicate")
        .json(&json!({ "firstName": "Asha" }))
        .await;
    assert_error(&resp, 400, "MISSING_FIELD");
    let body: Value = resp.json();
    assert_eq!(body["error"], "Missing required fields");
}

// ── Malformed bodies ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_non_json_registration_as_validation() {
    let resp = server()
        .post("/api/register")
        .text("firstName=Asha")
        .await;
    assert_error(&resp, 400, "VALIDATION");
    let body: Value = resp.json();
    assert_eq!(body["error"], "Invalid request body");
}

#[tokio::test]
async fn should_reject_mistyped_fields_as_validation() {
    let resp = server()
        .post("/api/check-duplicate")
        .json(&json!({ "firstName": ["Asha"], "lastName": "Rao", "phoneNumber": TEST_PHONE }))
        .await;
    assert_error(&resp, 400, "VALIDATION");

    let (name, value) = MockAuth::admin("desk1").header();
    let resp = server()
        .post("/api/admin/log-scan")
        .add_header(name, value)
        .json(&json!({ "userId": 42 }))
        .await;
    assert_error(&resp, 400, "VALIDATION");
}
