//! End-to-end API tests over the in-memory store

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{create_user, create_user_stock, memory_app, send};

const MISSING_ID: &str = "00000000-0000-0000-0000-000000000000";

// ============================================================================
// Users
// ============================================================================

#[tokio::test]
async fn test_create_user_returns_201_with_envelope() {
    let app = memory_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users",
        Some(json!({ "name": "Alice", "age": 30, "signup_ts": "2024-01-02T03:04:05Z" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "Alice");
    assert_eq!(body["data"]["age"], 30);
    assert!(body["data"]["signup_ts"].is_string());
    assert!(body["data"]["created_at"].is_string());
}

#[tokio::test]
async fn test_lowercase_name_is_rejected() {
    let app = memory_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users",
        Some(json!({ "name": "alice" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (_, list) = send(&app, Method::GET, "/api/users", None).await;
    assert_eq!(list["data"]["total"], 0);
}

#[tokio::test]
async fn test_age_out_of_range_is_rejected() {
    let app = memory_app();

    for age in [-1, 151, 1000] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/users",
            Some(json!({ "name": "Alice", "age": age })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "age {}", age);
    }

    for age in [0, 150] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/users",
            Some(json!({ "name": "Alice", "age": age })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "age {}", age);
    }
}

#[tokio::test]
async fn test_missing_name_is_a_client_error() {
    let app = memory_app();

    let (status, _) = send(&app, Method::POST, "/api/users", Some(json!({ "age": 3 }))).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_name_length_limit() {
    let app = memory_app();

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/users",
        Some(json!({ "name": format!("A{}", "b".repeat(99)) })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users",
        Some(json!({ "name": format!("A{}", "b".repeat(100)) })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_get_missing_user_is_404() {
    let app = memory_app();

    let (status, body) = send(&app, Method::GET, &format!("/api/users/{}", MISSING_ID), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains(MISSING_ID));
}

#[tokio::test]
async fn test_list_users_paginates() {
    let app = memory_app();
    for name in ["Ann", "Ben", "Cat"] {
        create_user(&app, name, None).await;
    }

    let (status, body) = send(&app, Method::GET, "/api/users?skip=1&limit=1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 3);
    assert_eq!(body["data"]["skip"], 1);
    assert_eq!(body["data"]["limit"], 1);
    assert_eq!(body["data"]["data"][0]["name"], "Ben");
}

#[tokio::test]
async fn test_update_user_is_partial() {
    let app = memory_app();
    let id = create_user(&app, "Alice", Some(30)).await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/users/{}", id),
        Some(json!({ "age": 31 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Alice");
    assert_eq!(body["data"]["age"], 31);

    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/api/users/{}", id),
        Some(json!({ "name": "lower" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/api/users/{}", MISSING_ID),
        Some(json!({ "age": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_user_cascades_to_stocks() {
    let app = memory_app();
    let alice = create_user(&app, "Alice", None).await;
    let bob = create_user(&app, "Bob", None).await;

    let aapl = create_user_stock(&app, &alice, "AAPL", 200.5, 10).await;
    create_user_stock(&app, &alice, "GOOG", 1500.0, 2).await;
    let msft = create_user_stock(&app, &bob, "MSFT", 300.0, 1).await;

    let (status, body) = send(&app, Method::DELETE, &format!("/api/users/{}", alice), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = send(&app, Method::GET, &format!("/api/stocks/{}", aapl), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, Method::GET, "/api/stocks", None).await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["data"][0]["id"], msft.as_str());

    let (status, _) = send(&app, Method::DELETE, &format!("/api/users/{}", alice), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Stocks
// ============================================================================

#[tokio::test]
async fn test_create_stock_for_user() {
    let app = memory_app();
    let user = create_user(&app, "Alice", None).await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/users/{}/stocks", user),
        Some(json!({ "name": "AAPL", "price": 200.5, "quantity": 10, "tags": ["tech"] })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["user_id"], user.as_str());
    assert_eq!(body["data"]["is_active"], true);
    assert_eq!(body["data"]["tags"], json!(["tech"]));

    let (status, body) = send(&app, Method::GET, &format!("/api/users/{}/stocks", user), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 1);
}

#[tokio::test]
async fn test_create_stock_for_missing_user_is_404() {
    let app = memory_app();

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/users/{}/stocks", MISSING_ID),
        Some(json!({ "name": "AAPL", "price": 1.0, "quantity": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/stocks",
        Some(json!({ "name": "AAPL", "price": 1.0, "quantity": 1, "user_id": MISSING_ID })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, &format!("/api/users/{}/stocks", MISSING_ID), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_positive_price_or_quantity_is_rejected() {
    let app = memory_app();

    for (price, quantity) in [(0.0, 1), (-10.0, 1), (10.0, 0), (10.0, -1)] {
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/stocks",
            Some(json!({ "name": "AAPL", "price": price, "quantity": quantity })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{} x {}", price, quantity);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    let (_, body) = send(&app, Method::GET, "/api/stocks", None).await;
    assert_eq!(body["data"]["total"], 0);
}

#[tokio::test]
async fn test_stock_lifecycle() {
    let app = memory_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/stocks",
        Some(json!({ "name": "TSLA", "price": 250.0, "quantity": 4 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["data"]["user_id"].is_null());
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/stocks/{}", id),
        Some(json!({ "is_active": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_active"], false);
    assert_eq!(body["data"]["price"], 250.0);

    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/api/stocks/{}", id),
        Some(json!({ "price": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/stocks/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &format!("/api/stocks/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_stock_is_404() {
    let app = memory_app();
    let uri = format!("/api/stocks/{}", MISSING_ID);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::PATCH, &uri, Some(json!({ "quantity": 2 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_stocks_filters() {
    let app = memory_app();
    let alice = create_user(&app, "Alice", None).await;
    let bob = create_user(&app, "Bob", None).await;
    create_user_stock(&app, &alice, "AAPL", 10.0, 1).await;
    create_user_stock(&app, &bob, "GOOG", 20.0, 1).await;

    let (status, body) = send(&app, Method::GET, &format!("/api/stocks?user_id={}", bob), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["data"][0]["name"], "GOOG");

    let (_, body) = send(&app, Method::GET, "/api/stocks?is_active=false", None).await;
    assert_eq!(body["data"]["total"], 0);
}

#[tokio::test]
async fn test_price_above_cap_is_rejected() {
    let app = memory_app();
    let user = create_user(&app, "Alice", None).await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/users/{}/stocks", user),
        Some(json!({ "name": "BIG", "price": 1e308, "quantity": 10 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let id = create_user_stock(&app, &user, "BIG", 1_000_000_000.0, i32::MAX as i64).await;
    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/api/stocks/{}", id),
        Some(json!({ "price": 1e308 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = send(&app, Method::GET, &format!("/api/users/{}/portfolio", user), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["total_value"].is_number());
}

#[tokio::test]
async fn test_tag_length_limit() {
    let app = memory_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/stocks",
        Some(json!({ "name": "AAPL", "price": 1.0, "quantity": 1, "tags": ["x".repeat(32)] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/stocks",
        Some(json!({ "name": "AAPL", "price": 1.0, "quantity": 1, "tags": ["x".repeat(33)] })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/api/stocks/{}", id),
        Some(json!({ "tags": ["x".repeat(33)] })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, body) = send(&app, Method::GET, &format!("/api/stocks/{}", id), None).await;
    assert_eq!(body["data"]["tags"], json!(["x".repeat(32)]));
}

// ============================================================================
// Portfolio
// ============================================================================

#[tokio::test]
async fn test_portfolio_summary() {
    let app = memory_app();
    let user = create_user(&app, "Alice", None).await;
    create_user_stock(&app, &user, "AAPL", 200.5, 10).await;
    create_user_stock(&app, &user, "GOOG", 1500.0, 2).await;

    let (status, body) = send(&app, Method::GET, &format!("/api/users/{}/portfolio", user), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_value"], 200.5 * 10.0 + 1500.0 * 2.0);
    assert_eq!(body["data"]["is_complete"], true);
    assert_eq!(body["data"]["stocks"].as_array().unwrap().len(), 2);

    let (status, _) = send(&app, Method::GET, &format!("/api/users/{}/portfolio", MISSING_ID), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_portfolio_is_not_complete() {
    let app = memory_app();
    let user = create_user(&app, "Alice", None).await;

    let (status, body) = send(&app, Method::GET, &format!("/api/users/{}/portfolio", user), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_value"], 0.0);
    assert_eq!(body["data"]["is_complete"], false);
}

// ============================================================================
// Service endpoints
// ============================================================================

#[tokio::test]
async fn test_health_reports_memory_store() {
    let app = memory_app();

    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"], "memory");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = memory_app();

    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/users/{id}"].is_object());
    assert!(body["paths"]["/api/stocks"].is_object());
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    let app = memory_app();
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "trace-123")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.headers()["x-request-id"], "trace-123");
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
}
