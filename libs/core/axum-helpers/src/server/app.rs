use super::shutdown::{ShutdownCoordinator, coordinated_shutdown};
use crate::errors::handlers::{method_not_allowed, not_found};
use crate::middleware::{
    create_cors_layer, create_permissive_cors_layer, panic_response, request_context,
    require_json_content_type, security_headers,
};
use axum::{Router, extract::Request, middleware};
use core_config::{Environment, server::ServerConfig};
use std::io;
use std::time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;

fn cors_layer(server_config: &ServerConfig, environment: &Environment) -> io::Result<CorsLayer> {
    match &server_config.cors_allowed_origins {
        Some(origins) => {
            info!(?origins, "CORS configured with allowed origins");
            create_cors_layer(origins)
        }
        None if environment.is_production() => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "CORS_ALLOWED_ORIGIN is required in production. Example: CORS_ALLOWED_ORIGIN=https://shop.example.com",
        )),
        None => {
            warn!("CORS_ALLOWED_ORIGIN not set, allowing any origin");
            Ok(create_permissive_cors_layer())
        }
    }
}

/// Wraps `apis` (nested under `/api`) with docs, fallbacks and the HTTP layer stack.
///
/// Served alongside the API:
/// - Swagger UI at `/swagger-ui`, Redoc at `/redoc`, RapiDoc at `/rapidoc`, Scalar at `/scalar`
/// - the OpenAPI document at `/api-docs/openapi.json`
///
/// Unknown paths answer `ROUTE_NOT_FOUND`, known paths with the wrong method
/// answer `METHOD_NOT_ALLOWED`. Every response carries `X-Request-ID`.
///
/// Health endpoints are not included; merge [`health_router`](super::health_router)
/// and the app's own readiness route into the result.
///
/// # Errors
/// Fails when `CORS_ALLOWED_ORIGIN` is invalid, or unset in production.
pub fn create_router<T>(
    apis: Router,
    server_config: &ServerConfig,
    environment: &Environment,
) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    use utoipa_rapidoc::RapiDoc;
    use utoipa_redoc::{Redoc, Servable as RedocServable};
    use utoipa_scalar::{Scalar, Servable as ScalarServable};
    use utoipa_swagger_ui::SwaggerUi;

    let cors = cors_layer(server_config, environment)?;

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .nest("/api", apis)
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found);

    Ok(with_http_layers(router).layer(cors).layer(CompressionLayer::new()))
}

/// Request-scoped layers shared by the full router and by tests that build
/// routers directly: panic catching, JSON guard, request context, tracing and
/// security headers.
pub fn with_http_layers(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn(require_json_content_type))
        .layer(middleware::from_fn(request_context))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                    )
                })
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
}

/// Runs the server until a shutdown signal arrives, then runs `cleanup`
/// bounded by `shutdown_timeout`.
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let (coordinator, _rx) = ShutdownCoordinator::new();
    let mut shutdown_rx = coordinator.subscribe();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let cleanup_handle = tokio::spawn(async move {
        let _ = shutdown_rx.recv().await;

        info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
        match tokio::time::timeout(shutdown_timeout, cleanup).await {
            Ok(_) => info!("Cleanup completed successfully"),
            Err(_) => warn!(
                "Cleanup exceeded timeout of {:?}, forcing shutdown",
                shutdown_timeout
            ),
        }
    });

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(coordinated_shutdown(coordinator))
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    cleanup_handle.await.ok();

    serve_result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::REQUEST_ID_HEADER;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[derive(OpenApi)]
    #[openapi(info(title = "test"))]
    struct EmptyDoc;

    fn router() -> Router {
        let apis = Router::new().route("/v1/things", get(|| async { "things" }));
        create_router::<EmptyDoc>(apis, &ServerConfig::default(), &Environment::Development)
            .unwrap()
    }

    async fn code_of(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        body["error"]["code"].as_str().unwrap_or_default().to_string()
    }

    #[tokio::test]
    async fn test_api_routes_are_nested_and_tagged() {
        let response = router()
            .oneshot(Request::get("/api/v1/things").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
        assert_eq!(response.headers().get("x-frame-options").unwrap(), "DENY");
    }

    #[tokio::test]
    async fn test_unknown_route_is_route_not_found() {
        let response = router()
            .oneshot(Request::get("/api/v1/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
        assert_eq!(code_of(response).await, "ROUTE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_wrong_method_is_405() {
        let response = router()
            .oneshot(
                Request::delete("/api/v1/things")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let response = router()
            .oneshot(
                Request::get("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_production_requires_cors_origins() {
        let result = create_router::<EmptyDoc>(
            Router::new(),
            &ServerConfig::default(),
            &Environment::Production,
        );
        assert!(result.is_err());

        let configured =
            ServerConfig::default().with_cors_origins(vec!["https://shop.example.com".into()]);
        assert!(
            create_router::<EmptyDoc>(Router::new(), &configured, &Environment::Production)
                .is_ok()
        );
    }
}
