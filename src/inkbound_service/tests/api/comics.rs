use crate::helpers::{body_json, TestApp};
use serde_json::json;

#[tokio::test]
async fn comic_routes_are_gated_by_the_bearer_token() {
    let app = TestApp::spawn().await;

    assert_eq!(app.get("/api/comic/reading-list").await.status(), 401);
    assert_eq!(
        app.post_json("/api/comic/update-progress", &json!({ "slug": "x", "chapter": "1" }))
            .await
            .status(),
        401
    );
    assert_eq!(app.get("/api/comic/favorites").await.status(), 401);
}

#[tokio::test]
async fn progress_upserts_keep_one_row_with_the_latest_chapter() {
    let app = TestApp::spawn().await;
    let token = app.register_verified_user("ann@example.com", "pw123456").await;

    let response = app
        .post_json_authed(
            "/api/comic/update-progress",
            &token,
            &json!({ "slug": "one-piece", "chapter": "12" }),
        )
        .await;
    assert_eq!(response.status(), 200);

    let response = app
        .post_json_authed(
            "/api/comic/update-progress",
            &token,
            &json!({ "slug": "one-piece", "chapter": "13" }),
        )
        .await;
    assert_eq!(response.status(), 200);

    let response = app
        .get_authed("/api/comic/last-chapter/one-piece", &token)
        .await;
    assert_eq!(response.status(), 200);
    let body = body_json(response).await;
    assert_eq!(body["data"]["lastReadChapter"], "13");

    let response = app.get_authed("/api/comic/reading-list", &token).await;
    let body = body_json(response).await;
    assert_eq!(body["pagination"]["totalItems"], 1);
}

#[tokio::test]
async fn update_progress_requires_slug_and_chapter() {
    let app = TestApp::spawn().await;
    let token = app.register_verified_user("ann@example.com", "pw123456").await;

    let response = app
        .post_json_authed(
            "/api/comic/update-progress",
            &token,
            &json!({ "slug": "one-piece" }),
        )
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn last_chapter_for_an_untracked_comic_is_not_found() {
    let app = TestApp::spawn().await;
    let token = app.register_verified_user("ann@example.com", "pw123456").await;

    let response = app
        .get_authed("/api/comic/last-chapter/never-read", &token)
        .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn reading_list_paginates_and_clamps_bad_inputs() {
    let app = TestApp::spawn().await;
    let token = app.register_verified_user("ann@example.com", "pw123456").await;

    for i in 0..3 {
        app.post_json_authed(
            "/api/comic/update-progress",
            &token,
            &json!({ "slug": format!("comic-{i}"), "chapter": "1" }),
        )
        .await;
    }

    let response = app
        .get_authed("/api/comic/reading-list?page=1&limit=2", &token)
        .await;
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["pagination"]["totalItems"], 3);
    assert_eq!(body["pagination"]["totalPages"], 2);
    assert_eq!(body["pagination"]["itemsPerPage"], 2);

    // page=0&limit=0 behaves as page=1&limit=10.
    let response = app
        .get_authed("/api/comic/reading-list?page=0&limit=0", &token)
        .await;
    let body = body_json(response).await;
    assert_eq!(body["pagination"]["currentPage"], 1);
    assert_eq!(body["pagination"]["itemsPerPage"], 10);
    assert_eq!(body["pagination"]["totalPages"], 1);
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn reading_lists_are_scoped_to_the_caller() {
    let app = TestApp::spawn().await;
    let ann = app.register_verified_user("ann@example.com", "pw123456").await;
    let bob = app.register_verified_user("bob@example.com", "pw123456").await;

    app.post_json_authed(
        "/api/comic/update-progress",
        &ann,
        &json!({ "slug": "anns-comic", "chapter": "1" }),
    )
    .await;

    let response = app.get_authed("/api/comic/reading-list", &bob).await;
    let body = body_json(response).await;
    assert_eq!(body["pagination"]["totalItems"], 0);
}

#[tokio::test]
async fn favorites_track_the_optional_chapter() {
    let app = TestApp::spawn().await;
    let token = app.register_verified_user("ann@example.com", "pw123456").await;

    // Without a chapter both read fields stay null.
    let response = app
        .post_json_authed("/api/comic/favorites", &token, &json!({ "slug": "one-piece" }))
        .await;
    assert_eq!(response.status(), 200);
    let body = body_json(response).await;
    assert_eq!(body["data"]["lastReadChapter"], serde_json::Value::Null);
    assert_eq!(body["data"]["lastReadAt"], serde_json::Value::Null);

    // Supplying a chapter later sets both.
    let response = app
        .post_json_authed(
            "/api/comic/favorites",
            &token,
            &json!({ "slug": "one-piece", "chapter": "42" }),
        )
        .await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["lastReadChapter"], "42");
    assert!(body["data"]["lastReadAt"].is_string());

    let response = app.get_authed("/api/comic/favorites", &token).await;
    let body = body_json(response).await;
    assert_eq!(body["count"], 1);
}

#[tokio::test]
async fn add_favorite_requires_a_slug() {
    let app = TestApp::spawn().await;
    let token = app.register_verified_user("ann@example.com", "pw123456").await;

    let response = app
        .post_json_authed("/api/comic/favorites", &token, &json!({ "chapter": "1" }))
        .await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn removing_a_favorite_works_once() {
    let app = TestApp::spawn().await;
    let token = app.register_verified_user("ann@example.com", "pw123456").await;

    app.post_json_authed("/api/comic/favorites", &token, &json!({ "slug": "one-piece" }))
        .await;

    let response = app
        .delete_authed("/api/comic/favorites/one-piece", &token)
        .await;
    assert_eq!(response.status(), 200);
    let body = body_json(response).await;
    assert_eq!(body["data"]["slug"], "one-piece");

    let response = app
        .delete_authed("/api/comic/favorites/one-piece", &token)
        .await;
    assert_eq!(response.status(), 404);

    let response = app.get_authed("/api/comic/favorites", &token).await;
    let body = body_json(response).await;
    assert_eq!(body["count"], 0);
}
