use axum::response::Response;

use super::{ErrorCode, error_response};

/// Router fallback for unknown paths.
pub async fn not_found() -> Response {
    error_response(
        ErrorCode::RouteNotFound,
        ErrorCode::RouteNotFound.default_message(),
    )
}

/// Fallback for a known path hit with an unsupported method.
pub async fn method_not_allowed() -> Response {
    error_response(
        ErrorCode::MethodNotAllowed,
        ErrorCode::MethodNotAllowed.default_message(),
    )
}
