use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::any::Any;

use super::{ErrorCode, ErrorResponse};

/// Fallback handler for unknown routes.
pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(ErrorCode::NotFound.default_message())),
    )
        .into_response()
}

/// Turns a handler panic into the generic 500 response.
///
/// Meant for `tower_http::catch_panic::CatchPanicLayer::custom`. The panic
/// payload is logged; the client only sees `{"error": "Internal server error"}`.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!(
        error_code = ErrorCode::InternalError.code(),
        error_kind = ErrorCode::InternalError.as_str(),
        backtrace = %std::backtrace::Backtrace::force_capture(),
        "Unhandled panic while serving request: {}",
        detail
    );

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(ErrorCode::InternalError.default_message())),
    )
        .into_response()
}
