use axum::Router;
use domain_catalog::{categories, media, products, variants};

pub mod health;

use crate::state::AppState;

/// API version prefix, below the `/api` prefix added by `create_router`
pub const API_PREFIX: &str = "/v1";

/// Creates the API routes without the `/api` prefix.
///
/// Returns a stateless Router (all sub-routers have state already applied).
pub fn routes(state: &AppState) -> Router {
    let v1 = Router::new()
        .nest("/products", products::handlers::router(state.products.clone()))
        .nest(
            "/categories",
            categories::handlers::router(state.categories.clone()),
        )
        .nest("/variants", variants::handlers::router(state.variants.clone()))
        .nest("/media", media::handlers::router(state.media.clone()));

    Router::new().nest(API_PREFIX, v1)
}

/// `/ready`, checking the database connection.
pub fn ready_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
