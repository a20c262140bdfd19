use crate::errors::{ErrorCode, error_response};
use axum::response::Response;
use std::any::Any;

pub const PANIC_MESSAGE: &str = "An unexpected error occurred.";

/// Response factory for `tower_http::catch_panic::CatchPanicLayer::custom`.
///
/// Logs the panic payload and answers 500 without exposing it.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };

    tracing::error!(
        error_code = ErrorCode::InternalServerError.code(),
        panic = detail,
        "Request handler panicked"
    );

    error_response(ErrorCode::InternalServerError, PANIC_MESSAGE)
}
