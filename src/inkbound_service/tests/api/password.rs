use crate::helpers::{body_json, TestApp};
use serde_json::json;

#[tokio::test]
async fn change_password_enforces_the_minimum_length_boundary() {
    let app = TestApp::spawn().await;
    app.register_verified_user("ann@example.com", "pw123456").await;

    // Five characters is too weak.
    let response = app
        .post_json(
            "/api/change-password",
            &json!({ "email": "ann@example.com", "oldPassword": "pw123456", "newPassword": "12345" }),
        )
        .await;
    assert_eq!(response.status(), 400);

    // Six is accepted.
    let response = app
        .post_json(
            "/api/change-password",
            &json!({ "email": "ann@example.com", "oldPassword": "pw123456", "newPassword": "123456" }),
        )
        .await;
    assert_eq!(response.status(), 200);

    // Old credential is dead, new one works.
    assert_eq!(app.login("ann@example.com", "pw123456").await.status(), 401);
    assert_eq!(app.login("ann@example.com", "123456").await.status(), 200);
}

#[tokio::test]
async fn change_password_rejects_a_wrong_current_password() {
    let app = TestApp::spawn().await;
    app.register_verified_user("ann@example.com", "pw123456").await;

    let response = app
        .post_json(
            "/api/change-password",
            &json!({ "email": "ann@example.com", "oldPassword": "wrong", "newPassword": "new-password" }),
        )
        .await;
    assert_eq!(response.status(), 401);
}

#[tokio::test]
async fn change_password_requires_all_three_fields() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json(
            "/api/change-password",
            &json!({ "email": "ann@example.com", "newPassword": "new-password" }),
        )
        .await;
    assert_eq!(response.status(), 400);

    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("required"));
}

#[tokio::test]
async fn forgot_password_mails_a_live_temporary_password() {
    let app = TestApp::spawn().await;
    app.register_verified_user("ann@example.com", "pw123456").await;

    let response = app
        .post_json("/api/forgot-password", &json!({ "email": "ann@example.com" }))
        .await;
    assert_eq!(response.status(), 200);

    let temporary = app.last_temporary_password().await;
    assert_eq!(temporary.chars().count(), 10);

    // The response never carries the password, only the mail does.
    assert_eq!(app.login("ann@example.com", "pw123456").await.status(), 401);
    assert_eq!(app.login("ann@example.com", &temporary).await.status(), 200);
}

#[tokio::test]
async fn forgot_password_for_an_unknown_email_is_not_found() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json("/api/forgot-password", &json!({ "email": "ghost@example.com" }))
        .await;
    assert_eq!(response.status(), 404);
}
