//! Integration tests for the category resource.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

const CATEGORIES: &str = "/api/categories";

#[tokio::test]
async fn test_category_soft_delete() {
    let app = helpers::TestApp::new().await;
    let kept = app.create(CATEGORIES, json!({ "name": "Kitchen" })).await;
    let removed = app.create(CATEGORIES, json!({ "name": "Garden" })).await;

    let response = app
        .request("DELETE", &format!("{CATEGORIES}/{removed}"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let live = app.request("GET", CATEGORIES, None).await;
    assert_eq!(live.len(), 1);
    assert!(live.contains_id(&kept));

    let all = app.request("GET", &format!("{CATEGORIES}/All"), None).await;
    assert_eq!(all.len(), 2);
    assert!(all.contains_id(&removed));
}

#[tokio::test]
async fn test_product_references_category() {
    let app = helpers::TestApp::new().await;
    let category = app.create(CATEGORIES, json!({ "name": "Office" })).await;

    let product = app
        .create(
            "/api/products",
            json!({ "name": "Chair", "category_id": category, "cost": 9.5 }),
        )
        .await;

    let response = app
        .request("GET", &format!("/api/products/{product}"), None)
        .await;
    assert_eq!(response.body["category_id"], category.as_str());
}

#[tokio::test]
async fn test_update_ignores_is_deleted_flag() {
    let app = helpers::TestApp::new().await;
    let id = app.create(CATEGORIES, json!({ "name": "Bath" })).await;

    let response = app
        .request(
            "PUT",
            &format!("{CATEGORIES}/{id}"),
            Some(json!({ "id": id, "name": "Bathroom", "is_deleted": true })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "Bathroom");
    assert_eq!(response.body["is_deleted"], false);

    let live = app.request("GET", CATEGORIES, None).await;
    assert!(live.contains_id(&id));
}

#[tokio::test]
async fn test_blank_category_name_is_rejected() {
    let app = helpers::TestApp::new().await;

    for body in [json!({ "name": "   " }), json!({})] {
        let response = app.request("POST", CATEGORIES, Some(body)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error_code(), Some("INVALID_ARGUMENT"));
    }

    let all = app.request("GET", &format!("{CATEGORIES}/All"), None).await;
    assert_eq!(all.len(), 0);
}

#[tokio::test]
async fn test_rename_to_blank_is_rejected() {
    let app = helpers::TestApp::new().await;
    let id = app.create(CATEGORIES, json!({ "name": "Hall" })).await;

    let response = app
        .request(
            "PUT",
            &format!("{CATEGORIES}/{id}"),
            Some(json!({ "id": id, "name": "" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("INVALID_ARGUMENT"));

    let response = app.request("GET", &format!("{CATEGORIES}/{id}"), None).await;
    assert_eq!(response.body["name"], "Hall");
}
