use crate::helpers::{body_json, TestApp};
use serde_json::json;

#[tokio::test]
async fn register_creates_an_unverified_user_and_sends_the_link() {
    let app = TestApp::spawn().await;

    let response = app.register("ann@example.com", "pw123456", "Ann").await;
    assert_eq!(response.status(), 201);

    let body = body_json(response).await;
    assert_eq!(body["user"]["email"], "ann@example.com");
    assert_eq!(body["user"]["name"], "Ann");

    let email = app.email_client.last_email().await.unwrap();
    assert_eq!(email.recipient, "ann@example.com");
    assert!(email.body.contains("/api/verify/"));
}

#[tokio::test]
async fn login_before_verification_is_rejected_with_the_flag() {
    let app = TestApp::spawn().await;
    app.register("ann@example.com", "pw123456", "Ann").await;

    let response = app.login("ann@example.com", "pw123456").await;
    assert_eq!(response.status(), 401);

    let body = body_json(response).await;
    assert_eq!(body["verified"], false);
}

#[tokio::test]
async fn registering_a_verified_email_again_conflicts() {
    let app = TestApp::spawn().await;
    app.register_verified_user("ann@example.com", "pw123456").await;

    let response = app.register("ann@example.com", "pw123456", "Ann").await;
    assert_eq!(response.status(), 409);

    let body = body_json(response).await;
    assert_eq!(body["error"], "User already exists");
}

#[tokio::test]
async fn registering_an_unverified_email_again_conflicts_with_the_verify_first_variant() {
    let app = TestApp::spawn().await;
    app.register("ann@example.com", "pw123456", "Ann").await;

    let response = app.register("ann@example.com", "other-pw", "Ann").await;
    assert_eq!(response.status(), 409);

    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("verify your email"));
    assert_eq!(app.user_store.user_count().await, 1);
}

#[tokio::test]
async fn invalid_email_is_a_validation_error() {
    let app = TestApp::spawn().await;

    let response = app.register("not-an-email", "pw123456", "Ann").await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn failed_verification_mail_rolls_the_registration_back() {
    let app = TestApp::spawn().await;
    app.email_client.set_failing(true);

    let response = app.register("ann@example.com", "pw123456", "Ann").await;
    assert_eq!(response.status(), 500);
    assert_eq!(app.user_store.user_count().await, 0);

    // Registration is all-or-nothing: once mail works, the email is free again.
    app.email_client.set_failing(false);
    let response = app.register("ann@example.com", "pw123456", "Ann").await;
    assert_eq!(response.status(), 201);
}

#[tokio::test]
async fn resend_verification_issues_a_fresh_working_link() {
    let app = TestApp::spawn().await;
    app.register("ann@example.com", "pw123456", "Ann").await;
    let first_code = app.last_verification_code().await;

    let response = app
        .post_json("/api/resend-verification", &json!({ "email": "ann@example.com" }))
        .await;
    assert_eq!(response.status(), 200);
    assert_eq!(app.email_client.sent_count().await, 2);

    let second_code = app.last_verification_code().await;
    assert_ne!(first_code, second_code);

    assert_eq!(app.verify(&second_code).await.status(), 200);
    assert_eq!(app.login("ann@example.com", "pw123456").await.status(), 200);
}

#[tokio::test]
async fn resend_for_unknown_or_verified_accounts_fails() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json("/api/resend-verification", &json!({ "email": "ghost@example.com" }))
        .await;
    assert_eq!(response.status(), 404);

    app.register_verified_user("ann@example.com", "pw123456").await;
    let response = app
        .post_json("/api/resend-verification", &json!({ "email": "ann@example.com" }))
        .await;
    assert_eq!(response.status(), 400);
}
