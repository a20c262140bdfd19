use crate::errors::{ErrorCode, error_response};
use axum::{
    extract::Request,
    http::{Method, header},
    middleware::Next,
    response::Response,
};

/// Message returned when a write request does not declare a JSON body.
pub const JSON_CONTENT_TYPE_MESSAGE: &str = "Content-Type must be application/json";

fn is_json(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}

/// Rejects `POST`, `PUT` and `PATCH` requests whose `Content-Type` essence is
/// not `application/json` with 415. Parameters such as `charset` are allowed.
pub async fn require_json_content_type(request: Request, next: Next) -> Response {
    let is_write = matches!(*request.method(), Method::POST | Method::PUT | Method::PATCH);

    if is_write {
        let content_type = request
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        if !is_json(content_type) {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                content_type,
                "Rejected write request without JSON content type"
            );
            return error_response(ErrorCode::UnsupportedMediaType, JSON_CONTENT_TYPE_MESSAGE);
        }
    }

    next.run(request).await
}
