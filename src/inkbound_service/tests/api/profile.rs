use crate::helpers::{body_json, TestApp};

fn avatar_part(bytes: Vec<u8>, content_type: &str) -> reqwest::multipart::Part {
    reqwest::multipart::Part::bytes(bytes)
        .file_name("avatar.png")
        .mime_str(content_type)
        .unwrap()
}

#[tokio::test]
async fn profile_requires_a_valid_bearer_token() {
    let app = TestApp::spawn().await;

    assert_eq!(app.get("/api/profile").await.status(), 401);
    assert_eq!(
        app.get_authed("/api/profile", "not-a-token").await.status(),
        401
    );
}

#[tokio::test]
async fn get_profile_returns_the_sanitized_user() {
    let app = TestApp::spawn().await;
    let token = app.register_verified_user("ann@example.com", "pw123456").await;

    let response = app.get_authed("/api/profile", &token).await;
    assert_eq!(response.status(), 200);

    let raw = response.text().await.unwrap();
    assert!(!raw.contains("password"), "hash must never be serialized");

    let body: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(body["user"]["email"], "ann@example.com");
    assert_eq!(body["user"]["role"], "user");
}

#[tokio::test]
async fn text_fields_update_partially() {
    let app = TestApp::spawn().await;
    let token = app.register_verified_user("ann@example.com", "pw123456").await;

    let form = reqwest::multipart::Form::new()
        .text("name", "Ann Updated")
        .text("phone", "555-0101");
    let response = app
        .client
        .put(format!("{}/api/profile", app.address))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body = body_json(response).await;
    assert_eq!(body["user"]["name"], "Ann Updated");
    assert_eq!(body["user"]["phone"], "555-0101");
    // Untouched fields stay as they were.
    assert_eq!(body["user"]["address"], serde_json::Value::Null);
    assert_eq!(body["user"]["email"], "ann@example.com");
}

#[tokio::test]
async fn avatar_upload_replaces_the_placeholder_and_then_the_old_asset() {
    let app = TestApp::spawn().await;
    let token = app.register_verified_user("ann@example.com", "pw123456").await;

    let form = reqwest::multipart::Form::new()
        .part("avatar", avatar_part(vec![0xFF, 0xD8, 0xFF], "image/jpeg"));
    let response = app
        .client
        .put(format!("{}/api/profile", app.address))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body = body_json(response).await;
    let first_avatar = body["user"]["avatar"].as_str().unwrap().to_string();
    assert!(first_avatar.contains("media.test"));
    assert_eq!(app.media_store.live_assets().await.len(), 1);

    // A second upload removes the previous custom asset.
    let form = reqwest::multipart::Form::new()
        .part("avatar", avatar_part(vec![0x89, 0x50, 0x4E], "image/png"));
    let response = app
        .client
        .put(format!("{}/api/profile", app.address))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body = body_json(response).await;
    assert_ne!(body["user"]["avatar"].as_str().unwrap(), first_avatar);
    assert_eq!(app.media_store.live_assets().await.len(), 1);
}

#[tokio::test]
async fn non_image_avatars_are_rejected() {
    let app = TestApp::spawn().await;
    let token = app.register_verified_user("ann@example.com", "pw123456").await;

    let form = reqwest::multipart::Form::new()
        .part("avatar", avatar_part(b"plain text".to_vec(), "text/plain"));
    let response = app
        .client
        .put(format!("{}/api/profile", app.address))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    assert_eq!(app.media_store.live_assets().await.len(), 0);
}

#[tokio::test]
async fn oversized_avatars_are_rejected() {
    let app = TestApp::spawn().await;
    let token = app.register_verified_user("ann@example.com", "pw123456").await;

    let form = reqwest::multipart::Form::new()
        .part("avatar", avatar_part(vec![0u8; 513 * 1024], "image/png"));
    let response = app
        .client
        .put(format!("{}/api/profile", app.address))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    assert_eq!(app.media_store.live_assets().await.len(), 0);
}
