//! Integration tests for the Instagram post resource (physical deletion).

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

const POSTS: &str = "/api/instagram-posts";

#[tokio::test]
async fn test_physical_delete_removes_record() {
    let app = helpers::TestApp::new().await;
    let id = app
        .create(
            POSTS,
            json!({ "title": "Launch", "description": "New range", "likes": 3 }),
        )
        .await;

    let response = app.request("DELETE", &format!("{POSTS}/{id}"), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!(id));

    let response = app.request("GET", &format!("{POSTS}/{id}"), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let all = app.request("GET", &format!("{POSTS}/All"), None).await;
    assert_eq!(all.status, StatusCode::OK);
    assert!(!all.contains_id(&id));

    let response = app.request("DELETE", &format!("{POSTS}/{id}"), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_post() {
    let app = helpers::TestApp::new().await;
    let id = app
        .create(POSTS, json!({ "title": "Draft", "likes": 0 }))
        .await;

    let response = app
        .request(
            "PUT",
            &format!("{POSTS}/{id}"),
            Some(json!({ "id": id, "title": "Final", "likes": 10 })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["title"], "Final");
    assert_eq!(response.body["likes"], 10);

    let response = app.request("GET", POSTS, None).await;
    assert_eq!(response.len(), 1);
    assert_eq!(response.body[0]["likes"], 10);
}

#[tokio::test]
async fn test_resources_do_not_share_records() {
    let app = helpers::TestApp::new().await;
    let id = app.create(POSTS, json!({ "title": "Solo" })).await;

    let response = app
        .request("GET", &format!("/api/products/{id}"), None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
