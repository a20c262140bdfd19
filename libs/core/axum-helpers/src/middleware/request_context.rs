use axum::{
    extract::{FromRequestParts, Request},
    http::{HeaderValue, request::Parts},
    middleware::Next,
    response::Response,
};
use std::convert::Infallible;
use std::time::Instant;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Per-request id and start time, inserted by [`request_context`].
#[derive(Debug, Clone, Copy)]
pub struct RequestContext {
    pub request_id: Uuid,
    pub started_at: Option<Instant>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::started_at(Instant::now())
    }

    pub fn started_at(started_at: Instant) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            started_at: Some(started_at),
        }
    }

    /// Context for code paths that bypassed the middleware: fresh id, no timing.
    pub fn detached() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            started_at: None,
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.started_at
            .map(|t| t.elapsed().as_millis() as u64)
            .unwrap_or(0)
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<RequestContext>()
            .copied()
            .unwrap_or_else(RequestContext::detached))
    }
}

/// Assigns a request id, records it on the current span and echoes it in
/// the `X-Request-ID` response header.
pub async fn request_context(mut request: Request, next: Next) -> Response {
    let ctx = RequestContext::new();
    tracing::Span::current().record("request_id", tracing::field::display(ctx.request_id));
    request.extensions_mut().insert(ctx);

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&ctx.request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use axum::{Router, body::Body, http::StatusCode, middleware, routing::get};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route(
                "/",
                get(|ctx: RequestContext| async move { ctx.request_id.to_string() }),
            )
            .layer(middleware::from_fn(request_context))
    }

    #[tokio::test]
    async fn test_header_matches_extracted_context() {
        let response = app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let header = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        let body = response.into_body().collect().await.unwrap().to_bytes();

        assert!(Uuid::parse_str(&header).is_ok());
        assert_eq!(header, String::from_utf8(body.to_vec()).unwrap());
    }

    #[tokio::test]
    async fn test_each_request_gets_a_new_id() {
        let first = app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let second = app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_ne!(
            first.headers().get(REQUEST_ID_HEADER),
            second.headers().get(REQUEST_ID_HEADER)
        );
    }

    #[tokio::test]
    async fn test_missing_middleware_yields_detached_context() {
        let (mut parts, _) = Request::get("/").body(()).unwrap().into_parts();
        let ctx = RequestContext::from_request_parts(&mut parts, &()).await.unwrap();
        assert!(ctx.started_at.is_none());
        assert_eq!(ctx.elapsed_ms(), 0);
    }
}
