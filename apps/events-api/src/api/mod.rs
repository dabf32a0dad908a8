//! HTTP API routes

pub mod events;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Events under `/events`, readiness at `/ready`.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/events", events::router(state))
        .merge(health::router(state.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, EventsConfig, StoreKind};
    use crate::state::Store;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use core_config::{Environment, app_info, server::ServerConfig};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn memory_state() -> AppState {
        AppState {
            config: Config {
                app: app_info!(),
                environment: Environment::Development,
                server: ServerConfig::default(),
                events: EventsConfig {
                    store: StoreKind::Memory,
                    collection: "Events".to_string(),
                },
                mongodb: None,
            },
            store: Store::Memory,
        }
    }

    async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn test_ready_with_memory_store() {
        let app = routes(&memory_state());
        let (status, body) = call(
            &app,
            Request::builder().uri("/ready").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ready", "memory": "connected" }));
    }

    #[tokio::test]
    async fn test_events_are_served_at_root_paths() {
        let app = routes(&memory_state());

        let (status, created) = call(
            &app,
            Request::builder()
                .method("POST")
                .uri("/events")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"name":"Demo","date":"2024-01-01","description":"x"}"#,
                ))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["id"], "1");

        let (status, list) = call(
            &app,
            Request::builder().uri("/events").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list, json!([created]));
    }
}
