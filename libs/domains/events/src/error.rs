//! Event domain error types

use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;

/// Server code for a unique index violation.
const DUPLICATE_KEY_CODE: i32 = 11000;

pub const MISSING_FIELDS: &str = "Missing required fields: name, date, description";
pub const MISSING_BODY: &str = "Request body is missing";
pub const ALREADY_EXISTS: &str = "Event with this ID already exists";
pub const NOT_FOUND: &str = "Event not found";

/// Event domain errors.
///
/// The payload of the client-facing variants is the message returned to the
/// caller; the payload of the server-side ones is only ever logged.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type EventResult<T> = Result<T, EventError>;

impl EventError {
    pub fn missing_fields() -> Self {
        Self::Validation(MISSING_FIELDS.to_string())
    }

    pub fn missing_body() -> Self {
        Self::Validation(MISSING_BODY.to_string())
    }

    pub fn already_exists() -> Self {
        Self::Conflict(ALREADY_EXISTS.to_string())
    }

    pub fn not_found() -> Self {
        Self::NotFound(NOT_FOUND.to_string())
    }
}

/// True when the store rejected a write because the key is already taken.
pub fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY_CODE
    )
}

impl From<mongodb::error::Error> for EventError {
    fn from(err: mongodb::error::Error) -> Self {
        if is_duplicate_key(&err) {
            return Self::already_exists();
        }
        Self::Store(err.to_string())
    }
}

impl From<mongodb::bson::de::Error> for EventError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        Self::Store(format!("BSON deserialization error: {}", err))
    }
}

impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::Validation(msg) => AppError::BadRequest(msg),
            EventError::Conflict(msg) => AppError::Conflict(msg),
            EventError::NotFound(msg) => AppError::NotFound(msg),
            EventError::Store(msg) => AppError::Store(msg),
            EventError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
