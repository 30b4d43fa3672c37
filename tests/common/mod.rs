//! Shared helpers for driving the router in-process

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use portfolio_server::routes::app_router;
use portfolio_server::state::AppState;
use portfolio_server::store::MemoryStore;

pub fn memory_app() -> Router {
    app_router(AppState::new(MemoryStore::new().into()))
}

/// Send one request and decode the JSON body, `Value::Null` when empty
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

pub async fn create_user(app: &Router, name: &str, age: Option<i64>) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/users",
        Some(serde_json::json!({ "name": name, "age": age })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["data"]["id"].as_str().unwrap().to_string()
}

pub async fn create_user_stock(app: &Router, user_id: &str, symbol: &str, price: f64, quantity: i64) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        &format!("/api/users/{}/stocks", user_id),
        Some(serde_json::json!({ "name": symbol, "price": price, "quantity": quantity })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["data"]["id"].as_str().unwrap().to_string()
}
