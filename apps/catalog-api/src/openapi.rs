//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the Catalog API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "1.0.0",
        description = "Products, categories, variants and media of the e-commerce catalog",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/v1/products", api = domain_catalog::products::handlers::ApiDoc),
        (path = "/api/v1/categories", api = domain_catalog::categories::handlers::ApiDoc),
        (path = "/api/v1/variants", api = domain_catalog::variants::handlers::ApiDoc),
        (path = "/api/v1/media", api = domain_catalog::media::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
