use crate::helpers::{body_json, TestApp};
use chrono::{Duration, Utc};
use inkbound_core::{VerificationCode, VerificationToken, VerificationTokenStore};

#[tokio::test]
async fn the_full_registration_flow_ends_in_a_usable_login() {
    let app = TestApp::spawn().await;

    let response = app.register("a@x.com", "pw123456", "Ann").await;
    assert_eq!(response.status(), 201);
    let body = body_json(response).await;
    assert_eq!(body["user"]["email"], "a@x.com");

    let code = app.last_verification_code().await;
    let response = app.verify(&code).await;
    assert_eq!(response.status(), 200);

    let response = app.login("a@x.com", "pw123456").await;
    assert_eq!(response.status(), 200);

    let body = body_json(response).await;
    assert!(body["access_token"].as_str().is_some());
    assert!(body["refresh_token"].as_str().is_some());
    assert_eq!(body["user"]["role"], "user");
    assert_eq!(body["user"]["verified"], true);
}

#[tokio::test]
async fn a_verification_link_is_single_use() {
    let app = TestApp::spawn().await;
    app.register("ann@example.com", "pw123456", "Ann").await;
    let code = app.last_verification_code().await;

    assert_eq!(app.verify(&code).await.status(), 200);
    assert_eq!(app.verify(&code).await.status(), 404);
}

#[tokio::test]
async fn a_malformed_code_is_rejected() {
    let app = TestApp::spawn().await;

    assert_eq!(app.verify("no-separator-here").await.status(), 400);
    assert_eq!(app.verify("abc.def").await.status(), 400);
}

#[tokio::test]
async fn an_expired_link_fails_and_clears_the_ledger_row() {
    let app = TestApp::spawn().await;
    app.register("ann@example.com", "pw123456", "Ann").await;
    let user_id = app.user_id("ann@example.com").await;

    // Replace the pending token with one that expired an hour ago.
    let code = VerificationCode::new(user_id);
    let secret_hash = app.hash_secret(&code.to_string()).await;
    let expired = VerificationToken::from_parts(
        user_id,
        secret_hash,
        Utc::now() - Duration::hours(2),
        Utc::now() - Duration::hours(1),
    );
    app.token_store.store_token(expired).await.unwrap();

    let response = app.verify(&code.to_string()).await;
    assert_eq!(response.status(), 400);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("expired"));

    assert_eq!(app.token_store.token_count().await, 0);

    // Resend then verify with the fresh link succeeds.
    let response = app
        .post_json(
            "/api/resend-verification",
            &serde_json::json!({ "email": "ann@example.com" }),
        )
        .await;
    assert_eq!(response.status(), 200);

    let fresh_code = app.last_verification_code().await;
    assert_eq!(app.verify(&fresh_code).await.status(), 200);
}

#[tokio::test]
async fn a_well_formed_code_with_the_wrong_nonce_is_invalid() {
    let app = TestApp::spawn().await;
    app.register("ann@example.com", "pw123456", "Ann").await;
    let user_id = app.user_id("ann@example.com").await;

    let forged = VerificationCode::new(user_id);
    let response = app.verify(&forged.to_string()).await;
    assert_eq!(response.status(), 400);

    // The real link still works afterwards.
    let code = app.last_verification_code().await;
    assert_eq!(app.verify(&code).await.status(), 200);
}
