//! Readiness endpoint

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use serde_json::Value;

use crate::state::{AppState, Store};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// 200 when the store answers a ping, 503 otherwise.
async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let checks: Vec<(&str, HealthCheckFuture)> = match &state.store {
        Store::Mongo { client, .. } => vec![(
            "mongodb",
            Box::pin(async move {
                let status = database::mongodb::check_health_detailed(client).await;
                tracing::debug!(response_time_ms = status.response_time_ms, "MongoDB ping");
                if status.healthy {
                    Ok(())
                } else {
                    Err(status.message.unwrap_or_else(|| "unhealthy".to_string()))
                }
            }),
        )],
        Store::Memory => vec![("memory", Box::pin(async { Ok(()) }))],
    };

    run_health_checks(checks).await
}
