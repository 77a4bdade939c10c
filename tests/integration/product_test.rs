//! Integration tests for the product resource (logical deletion).

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

const PRODUCTS: &str = "/api/products";

#[tokio::test]
async fn test_product_lifecycle() {
    let app = helpers::TestApp::new().await;

    let id = app
        .create(
            PRODUCTS,
            json!({ "name": "Desk", "description": "Oak", "cost": 120.5 }),
        )
        .await;

    let response = app.request("GET", &format!("{PRODUCTS}/{id}"), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "Desk");
    assert_eq!(response.body["cost"], 120.5);
    assert_eq!(response.body["is_deleted"], false);

    let response = app
        .request(
            "PUT",
            &format!("{PRODUCTS}/{id}"),
            Some(json!({ "id": id, "name": "Desk XL", "description": "Oak", "cost": 150.0 })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "Desk XL");

    let response = app
        .request("DELETE", &format!("{PRODUCTS}/{id}"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!(id));

    let response = app.request("GET", PRODUCTS, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.contains_id(&id));

    let response = app.request("GET", &format!("{PRODUCTS}/All"), None).await;
    assert_eq!(response.status, StatusCode::OK);
    let stored = response
        .body
        .as_array()
        .and_then(|items| items.iter().find(|item| item["id"] == id.as_str()))
        .cloned()
        .expect("soft-deleted product still stored");
    assert_eq!(stored["is_deleted"], true);
    assert_eq!(stored["name"], "Desk XL");

    let response = app.request("GET", &format!("{PRODUCTS}/{id}"), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let app = helpers::TestApp::new().await;
    let id = app.create(PRODUCTS, json!({ "name": "Lamp", "cost": 9.5 })).await;

    for _ in 0..2 {
        let response = app
            .request("DELETE", &format!("{PRODUCTS}/{id}"), None)
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, json!(id));
    }
}

#[tokio::test]
async fn test_list_preserves_insertion_order() {
    let app = helpers::TestApp::new().await;
    let first = app.create(PRODUCTS, json!({ "name": "First", "cost": 9.5 })).await;
    let second = app.create(PRODUCTS, json!({ "name": "Second", "cost": 9.5 })).await;

    let response = app.request("GET", PRODUCTS, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.len(), 2);
    assert_eq!(response.body[0]["id"], first.as_str());
    assert_eq!(response.body[1]["id"], second.as_str());
}

#[tokio::test]
async fn test_update_with_mismatched_id_is_rejected() {
    let app = helpers::TestApp::new().await;
    let id = app.create(PRODUCTS, json!({ "name": "Chair", "cost": 9.5 })).await;

    let response = app
        .request(
            "PUT",
            &format!("{PRODUCTS}/{id}"),
            Some(json!({ "id": "00000000-0000-0000-0000-000000000001", "name": "Stool" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("IDENTIFIER_MISMATCH"));

    let response = app.request("GET", &format!("{PRODUCTS}/{id}"), None).await;
    assert_eq!(response.body["name"], "Chair");
}

#[tokio::test]
async fn test_update_without_id_is_format_mismatch() {
    let app = helpers::TestApp::new().await;
    let id = app.create(PRODUCTS, json!({ "name": "Chair", "cost": 9.5 })).await;

    let response = app
        .request(
            "PUT",
            &format!("{PRODUCTS}/{id}"),
            Some(json!({ "name": "Stool" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("FORMAT_MISMATCH"));
}

#[tokio::test]
async fn test_update_with_non_uuid_body_id_is_format_mismatch() {
    let app = helpers::TestApp::new().await;
    let id = app.create(PRODUCTS, json!({ "name": "Chair", "cost": 9.5 })).await;

    let response = app
        .request(
            "PUT",
            &format!("{PRODUCTS}/{id}"),
            Some(json!({ "id": 42, "name": "Stool" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("FORMAT_MISMATCH"));
}

#[tokio::test]
async fn test_missing_body_is_invalid_argument() {
    let app = helpers::TestApp::new().await;

    let response = app.raw_request("POST", PRODUCTS, String::new()).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("INVALID_ARGUMENT"));

    let response = app.raw_request("POST", PRODUCTS, "null".to_string()).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("INVALID_ARGUMENT"));

    let response = app.raw_request("POST", PRODUCTS, "{not json".to_string()).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("INVALID_ARGUMENT"));
}

#[tokio::test]
async fn test_unknown_and_malformed_ids() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "GET",
            &format!("{PRODUCTS}/00000000-0000-0000-0000-999999999999"),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), Some("NOT_FOUND"));

    let response = app
        .request(
            "DELETE",
            &format!("{PRODUCTS}/00000000-0000-0000-0000-999999999999"),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request("GET", &format!("{PRODUCTS}/not-a-uuid"), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("INVALID_ARGUMENT"));
}

#[tokio::test]
async fn test_update_after_delete_is_not_found() {
    let app = helpers::TestApp::new().await;
    let id = app.create(PRODUCTS, json!({ "name": "Shelf", "cost": 9.5 })).await;
    app.request("DELETE", &format!("{PRODUCTS}/{id}"), None)
        .await;

    let response = app
        .request(
            "PUT",
            &format!("{PRODUCTS}/{id}"),
            Some(json!({ "id": id, "name": "Shelf 2", "cost": 9.5 })),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_client_supplied_id_is_kept() {
    let app = helpers::TestApp::new().await;
    let id = "5b0f3c1e-2a4d-4e8f-9c61-7d2a3b4c5d6e";

    let created = app
        .create(PRODUCTS, json!({ "id": id, "name": "Rug", "cost": 9.5 }))
        .await;
    assert_eq!(created, id);

    let response = app
        .request("POST", PRODUCTS, Some(json!({ "id": id, "name": "Rug", "cost": 9.5 })))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_product_needs_name_and_positive_cost() {
    let app = helpers::TestApp::new().await;

    for body in [
        json!({ "name": " ", "cost": 5.0 }),
        json!({ "name": "Free", "cost": 0.0 }),
        json!({ "name": "Refund", "cost": -3.0 }),
    ] {
        let response = app.request("POST", PRODUCTS, Some(body)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error_code(), Some("INVALID_ARGUMENT"));
    }

    let all = app.request("GET", &format!("{PRODUCTS}/All"), None).await;
    assert_eq!(all.len(), 0);
}
