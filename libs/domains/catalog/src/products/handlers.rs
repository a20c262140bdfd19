use axum::{Router, extract::State, http::StatusCode, routing::get};
use axum_helpers::{
    ApiResponse, Envelope, IdPath, PageRequest, PaginationQuery, RequestContext, ValidatedJson,
    errors::responses::{
        BadRequestFormatResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse, UnsupportedMediaTypeResponse,
    },
    send_paginated, send_success,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CatalogResult;
use crate::products::models::{CreateProduct, Product, ProductStatus};
use crate::products::repository::ProductRepository;
use crate::products::service::ProductService;

const TAG: &str = "products";

/// OpenAPI documentation for the Products API
#[derive(OpenApi)]
#[openapi(
    paths(list_products, create_product, get_product, update_product, delete_product),
    components(
        schemas(Product, CreateProduct, ProductStatus),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestFormatResponse,
            UnsupportedMediaTypeResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Product catalog endpoints"))
)]
pub struct ApiDoc;

pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(Arc::new(service))
}

/// List products
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(PaginationQuery),
    responses(
        (status = 200, description = "One page of products", body = ApiResponse<Vec<Product>>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ctx: RequestContext,
    page: PageRequest,
) -> CatalogResult<Envelope<Vec<Product>>> {
    let (products, total) = service.list_products(page).await?;
    Ok(send_paginated(&ctx, StatusCode::OK, products, page, total))
}

/// Create a product
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 415, response = UnsupportedMediaTypeResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ctx: RequestContext,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> CatalogResult<Envelope<Product>> {
    let product = service.create_product(input).await?;
    Ok(send_success(&ctx, StatusCode::CREATED, product))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<Product>),
        (status = 400, response = BadRequestFormatResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ctx: RequestContext,
    IdPath(id): IdPath,
) -> CatalogResult<Envelope<Product>> {
    let product = service.get_product(id).await?;
    Ok(send_success(&ctx, StatusCode::OK, product))
}

/// Replace a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(("id" = i64, Path, description = "Product id")),
    request_body = CreateProduct,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 415, response = UnsupportedMediaTypeResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ctx: RequestContext,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> CatalogResult<Envelope<Product>> {
    let product = service.update_product(id, input).await?;
    Ok(send_success(&ctx, StatusCode::OK, product))
}

/// Delete a product along with its variants and media
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, response = BadRequestFormatResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> CatalogResult<StatusCode> {
    service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
