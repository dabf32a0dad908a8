//! Handler tests for the Events domain
//!
//! Drive `handlers::router` with `oneshot` against the in-memory repository:
//! - status codes and `{"error": ...}` bodies
//! - id assignment through the HTTP surface
//! - update merge semantics

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_events::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::TestDataBuilder;
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    Router::new().nest(
        "/events",
        handlers::router(EventService::new(InMemoryEventRepository::new())),
    )
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn demo() -> Value {
    json!({ "name": "Demo", "date": "2024-01-01", "description": "x" })
}

#[tokio::test]
async fn test_demo_scenario() {
    let app = app();

    let (status, first) = send(&app, "POST", "/events", Some(demo())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        first,
        json!({ "id": "1", "name": "Demo", "date": "2024-01-01", "description": "x" })
    );

    let (status, second) = send(&app, "POST", "/events", Some(demo())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(second["id"], "2");

    let (status, fetched) = send(&app, "GET", "/events/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, first);

    let (status, body) = send(&app, "DELETE", "/events/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, "GET", "/events/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Event not found" }));
}

#[tokio::test]
async fn test_create_without_id_uses_max_numeric_plus_one() {
    let app = app();
    let builder = TestDataBuilder::from_test_name("create_max_plus_one");

    for (n, id) in [(1, "7"), (2, "abc"), (3, "3")] {
        let (status, _) = send(
            &app,
            "POST",
            "/events",
            Some(builder.event_json_with_id(id, n)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, created) = send(&app, "POST", "/events", Some(builder.event_json(4))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], "8");
}

#[tokio::test]
async fn test_create_with_numeric_id_stores_it_as_text() {
    let app = app();
    let mut payload = demo();
    payload["id"] = json!(5);

    let (status, created) = send(&app, "POST", "/events", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], "5");

    let (status, fetched) = send(&app, "GET", "/events/5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (_, next) = send(&app, "POST", "/events", Some(demo())).await;
    assert_eq!(next["id"], "6");
}

#[tokio::test]
async fn test_create_only_non_numeric_ids_starts_at_one() {
    let app = app();
    let mut payload = demo();
    payload["id"] = json!("alpha");
    send(&app, "POST", "/events", Some(payload)).await;

    let (_, created) = send(&app, "POST", "/events", Some(demo())).await;
    assert_eq!(created["id"], "1");
}

#[tokio::test]
async fn test_create_duplicate_id_is_409_and_keeps_original() {
    let app = app();
    let builder = TestDataBuilder::from_test_name("duplicate_id");

    let original = builder.event_json_with_id("5", 1);
    let (status, _) = send(&app, "POST", "/events", Some(original.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        "POST",
        "/events",
        Some(builder.event_json_with_id("5", 2)),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({ "error": "Event with this ID already exists" }));

    let (_, stored) = send(&app, "GET", "/events/5", None).await;
    assert_eq!(stored["name"], original["name"]);
}

#[tokio::test]
async fn test_create_missing_or_empty_field_is_400_without_mutation() {
    let app = app();
    let expected = json!({ "error": "Missing required fields: name, date, description" });

    let bad_payloads = [
        json!({ "date": "2024-01-01", "description": "x" }),
        json!({ "name": "Demo", "description": "x" }),
        json!({ "name": "Demo", "date": "2024-01-01" }),
        json!({ "name": "", "date": "2024-01-01", "description": "x" }),
        json!({ "name": "Demo", "date": "2024-01-01", "description": null }),
        json!({}),
    ];

    for payload in bad_payloads {
        let (status, body) = send(&app, "POST", "/events", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, expected);
    }

    let (_, list) = send(&app, "GET", "/events", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_create_without_body_is_400() {
    let app = app();

    let (status, body) = send(&app, "POST", "/events", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields: name, date, description");

    let request = Request::builder()
        .method("POST")
        .uri("/events")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_returns_all() {
    let app = app();
    let builder = TestDataBuilder::from_test_name("list_all");

    for n in 0..3 {
        send(&app, "POST", "/events", Some(builder.event_json(n))).await;
    }

    let (status, list) = send(&app, "GET", "/events", None).await;
    assert_eq!(status, StatusCode::OK);

    let mut ids: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect();
    ids.sort();
    assert_eq!(ids, ["1", "2", "3"]);
}

#[tokio::test]
async fn test_absent_id_is_404_everywhere() {
    let app = app();
    let not_found = json!({ "error": "Event not found" });

    let (status, body) = send(&app, "GET", "/events/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, not_found);

    let (status, body) = send(&app, "PUT", "/events/missing", Some(json!({ "name": "X" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, not_found);

    let (status, body) = send(&app, "DELETE", "/events/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, not_found);
}

#[tokio::test]
async fn test_update_changes_only_given_fields() {
    let app = app();
    send(&app, "POST", "/events", Some(demo())).await;

    let (status, updated) = send(&app, "PUT", "/events/1", Some(json!({ "name": "X" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        updated,
        json!({ "id": "1", "name": "X", "date": "2024-01-01", "description": "x" })
    );

    let (_, fetched) = send(&app, "GET", "/events/1", None).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn test_update_with_empty_object_leaves_record_unchanged() {
    let app = app();
    let (_, created) = send(&app, "POST", "/events", Some(demo())).await;

    let (status, updated) = send(&app, "PUT", "/events/1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated, created);
}

#[tokio::test]
async fn test_update_cannot_change_id() {
    let app = app();
    send(&app, "POST", "/events", Some(demo())).await;

    let (status, updated) = send(
        &app,
        "PUT",
        "/events/1",
        Some(json!({ "id": "99", "description": "y" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], "1");
    assert_eq!(updated["description"], "y");

    let (status, _) = send(&app, "GET", "/events/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_without_body_is_400() {
    let app = app();
    send(&app, "POST", "/events", Some(demo())).await;

    let (status, body) = send(&app, "PUT", "/events/1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Request body is missing" }));

    let (status, body) = send(&app, "PUT", "/events/1", Some(json!([1, 2]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Request body is missing");
}

#[tokio::test]
async fn test_second_delete_is_404() {
    let app = app();
    send(&app, "POST", "/events", Some(demo())).await;

    let (status, _) = send(&app, "DELETE", "/events/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "DELETE", "/events/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Event not found");
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let app = app();
    let builder = TestDataBuilder::from_test_name("round_trip");
    let payload = builder.event_json_with_id("evt-1", 1);

    let (status, created) = send(&app, "POST", "/events", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created, payload);

    let (status, fetched) = send(&app, "GET", "/events/evt-1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, payload);
}
