//! API integration tests against the in-memory event store

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use event_service::{api, repository::Repository, services::Services, AppConfig, AppState};

fn app() -> Router {
    let state = AppState {
        config: Arc::new(AppConfig::default()),
        services: Arc::new(Services::new(Repository::in_memory())),
    };
    api::create_router(state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(format!("/api/v1{}", uri));
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, event) = send(app, Method::POST, "/events", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    event
}

#[tokio::test]
async fn test_health_check() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_create_and_get_event() {
    let app = app();
    let created = create(
        &app,
        json!({
            "eventName": "Jazz Night",
            "tags": ["jazz"],
            "ticketPrice": "25.00",
            "eventDateTime": "2030-05-01T20:00:00Z",
            "durationMinutes": 120
        }),
    )
    .await;

    let id = created["id"].as_str().expect("id assigned");
    let (status, fetched) = send(&app, Method::GET, &format!("/events/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
    assert_eq!(fetched["eventName"], "Jazz Night");
}

#[tokio::test]
async fn test_unknown_event_is_404() {
    let app = app();
    let uri = format!("/events/{}", uuid::Uuid::new_v4());

    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NoSuchEvent");

    let (status, _) = send(&app, Method::PUT, &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::PATCH, &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_id_is_400() {
    let app = app();
    let (status, _) = send(&app, Method::GET, "/events/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_keeps_path_id() {
    let app = app();
    let created = create(&app, json!({ "eventName": "a" })).await;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/events/{}", id),
        Some(json!({ "id": uuid::Uuid::new_v4(), "eventName": "b" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], id.as_str());
    assert_eq!(updated["eventName"], "b");
}

#[tokio::test]
async fn test_partial_update_and_delete() {
    let app = app();
    let created = create(
        &app,
        json!({ "eventName": "a", "tags": ["rock"], "durationMinutes": 60 }),
    )
    .await;
    let uri = format!("/events/{}", created["id"].as_str().unwrap());

    let (status, merged) = send(
        &app,
        Method::PATCH,
        &uri,
        Some(json!({ "durationMinutes": 0, "ticketPrice": "12.50" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(merged["eventName"], "a");
    assert_eq!(merged["tags"], json!(["rock"]));
    assert_eq!(merged["durationMinutes"], 60);
    assert_eq!(merged["ticketPrice"], "12.50");

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, all) = send(&app, Method::GET, "/events", None).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn test_partial_update_with_explicit_nulls() {
    let app = app();
    let created = create(
        &app,
        json!({ "eventName": "a", "tags": ["rock"], "durationMinutes": 60 }),
    )
    .await;
    let uri = format!("/events/{}", created["id"].as_str().unwrap());

    let (status, merged) = send(
        &app,
        Method::PATCH,
        &uri,
        Some(json!({
            "eventName": "b",
            "tags": null,
            "ticketPrice": null,
            "durationMinutes": null
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(merged["eventName"], "b");
    assert_eq!(merged["tags"], json!(["rock"]));
    assert_eq!(merged["durationMinutes"], 60);
}

#[tokio::test]
async fn test_tag_query() {
    let app = app();
    create(&app, json!({ "eventName": "a", "tags": ["jazz"] })).await;
    create(&app, json!({ "eventName": "b", "tags": ["blues"] })).await;

    let (status, found) = send(&app, Method::GET, "/events/tag?tag=JAZZ", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["eventName"], "a");

    let (status, found) = send(&app, Method::GET, "/events/tag", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found, json!([]));

    let (status, found) = send(&app, Method::GET, "/events/tag?tag=", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found, json!([]));
}

#[tokio::test]
async fn test_price_range_query() {
    let app = app();
    create(&app, json!({ "eventName": "low", "ticketPrice": "10" })).await;
    create(&app, json!({ "eventName": "high", "ticketPrice": "20" })).await;
    create(&app, json!({ "eventName": "out", "ticketPrice": "20.01" })).await;

    let (status, found) = send(
        &app,
        Method::GET,
        "/events/price-range?min_price=10&max_price=20",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = found
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["eventName"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["low", "high"]);

    let (status, found) = send(
        &app,
        Method::GET,
        "/events/price-range?min_price=100&max_price=50",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found, json!([]));

    let (status, found) = send(&app, Method::GET, "/events/price-range?min_price=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found, json!([]));
}

#[tokio::test]
async fn test_date_range_and_upcoming_queries() {
    let app = app();
    create(&app, json!({ "eventName": "past", "eventDateTime": "2000-01-01T00:00:00Z" })).await;
    create(&app, json!({ "eventName": "future", "eventDateTime": "2999-01-01T00:00:00Z" })).await;

    let (status, found) = send(&app, Method::GET, "/events/upcoming", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["eventName"], "future");

    let (status, found) = send(
        &app,
        Method::GET,
        "/events/date-range?start=2000-01-01T00:00:00Z&end=2000-01-01T00:00:00Z",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["eventName"], "past");

    let (status, found) = send(
        &app,
        Method::GET,
        "/events/date-range?start=2999-01-01T00:00:00Z&end=2000-01-01T00:00:00Z",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found, json!([]));
}

#[tokio::test]
async fn test_update_price() {
    let app = app();
    let created = create(&app, json!({ "eventName": "a", "ticketPrice": "10" })).await;
    let uri = format!("/events/{}/price", created["id"].as_str().unwrap());

    let (status, updated) = send(&app, Method::PATCH, &uri, Some(json!({ "price": "35.50" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["ticketPrice"], "35.50");

    let (status, _) = send(&app, Method::PATCH, &uri, Some(json!({ "price": "-1" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, fetched) = send(
        &app,
        Method::GET,
        &format!("/events/{}", created["id"].as_str().unwrap()),
        None,
    )
    .await;
    assert_eq!(fetched["ticketPrice"], "35.50");

    let unknown = format!("/events/{}/price", uuid::Uuid::new_v4());
    let (status, _) = send(&app, Method::PATCH, &unknown, Some(json!({ "price": "10" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
