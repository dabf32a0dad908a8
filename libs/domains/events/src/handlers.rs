use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::errors::responses::{
    BadRequestResponse, ConflictResponse, InternalServerErrorResponse, NotFoundResponse,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{EventError, EventResult};
use crate::models::{CreateEvent, Event, UpdateEvent};
use crate::repository::EventRepository;
use crate::service::EventService;

/// OpenAPI documentation for the Events API
#[derive(OpenApi)]
#[openapi(
    paths(list_events, create_event, get_event, update_event, delete_event),
    components(
        schemas(Event, CreateEvent, UpdateEvent),
        responses(
            BadRequestResponse,
            NotFoundResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Events", description = "Event management endpoints")
    )
)]
pub struct ApiDoc;

/// Events router. Mount it under `/events`.
pub fn router<R: EventRepository + 'static>(service: EventService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/{id}", get(get_event).put(update_event).delete(delete_event))
        .with_state(shared_service)
}

/// List all events
#[utoipa::path(
    get,
    path = "",
    tag = "Events",
    responses(
        (status = 200, description = "All stored events", body = Vec<Event>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_events<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
) -> EventResult<Json<Vec<Event>>> {
    let events = service.list_events().await?;
    Ok(Json(events))
}

/// Create an event
///
/// `id` is optional; when omitted the next numeric id is assigned.
#[utoipa::path(
    post,
    path = "",
    tag = "Events",
    request_body = CreateEvent,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, response = BadRequestResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    body: Result<Json<CreateEvent>, JsonRejection>,
) -> EventResult<impl IntoResponse> {
    let Json(input) = body.map_err(|rejection| {
        tracing::debug!(%rejection, "Unreadable create body");
        EventError::missing_fields()
    })?;

    let event = service.create_event(input).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Get an event by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Events",
    params(
        ("id" = String, Path, description = "Event id")
    ),
    responses(
        (status = 200, description = "Event found", body = Event),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    Path(id): Path<String>,
) -> EventResult<Json<Event>> {
    let event = service.get_event(&id).await?;
    Ok(Json(event))
}

/// Update an event
///
/// Fields present in the body replace the stored ones; the rest are kept.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Events",
    params(
        ("id" = String, Path, description = "Event id")
    ),
    request_body = UpdateEvent,
    responses(
        (status = 200, description = "Event updated", body = Event),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    Path(id): Path<String>,
    body: Result<Json<UpdateEvent>, JsonRejection>,
) -> EventResult<Json<Event>> {
    let Json(input) = body.map_err(|rejection| {
        tracing::debug!(%rejection, "Unreadable update body");
        EventError::missing_body()
    })?;

    let event = service.update_event(&id, input).await?;
    Ok(Json(event))
}

/// Delete an event
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Events",
    params(
        ("id" = String, Path, description = "Event id")
    ),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_event<R: EventRepository>(
    State(service): State<Arc<EventService<R>>>,
    Path(id): Path<String>,
) -> EventResult<impl IntoResponse> {
    service.delete_event(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
