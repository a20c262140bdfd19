use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
};
use axum_helpers::{
    ApiResponse, Envelope, IdPath, PageRequest, PaginationQuery, RequestContext, ValidatedJson,
    errors::responses::{
        BadRequestFormatResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse, UnsupportedMediaTypeResponse,
    },
    send_paginated, send_success,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CatalogResult;
use crate::variants::models::{CreateVariant, UpdateStock, UpdateVariant, Variant};
use crate::variants::repository::VariantRepository;
use crate::variants::service::VariantService;

const TAG: &str = "variants";

/// OpenAPI documentation for the Variants API
#[derive(OpenApi)]
#[openapi(
    paths(
        create_variant,
        get_variant,
        get_variant_by_sku,
        list_product_variants,
        list_active_product_variants,
        update_variant,
        update_stock,
        activate_variant,
        deactivate_variant,
        delete_variant,
    ),
    components(
        schemas(Variant, CreateVariant, UpdateVariant, UpdateStock),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestFormatResponse,
            ConflictResponse,
            UnsupportedMediaTypeResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Product variants, stock and activation"))
)]
pub struct ApiDoc;

pub fn router<R: VariantRepository + 'static>(service: VariantService<R>) -> Router {
    Router::new()
        .route("/", post(create_variant))
        .route(
            "/{id}",
            get(get_variant).put(update_variant).delete(delete_variant),
        )
        .route("/{id}/stock", put(update_stock))
        .route("/{id}/activate", put(activate_variant))
        .route("/{id}/deactivate", put(deactivate_variant))
        .route("/sku/{sku}", get(get_variant_by_sku))
        .route("/product/{product_id}", get(list_product_variants))
        .route(
            "/product/{product_id}/active",
            get(list_active_product_variants),
        )
        .with_state(Arc::new(service))
}

/// Create a variant
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateVariant,
    responses(
        (status = 201, description = "Variant created", body = ApiResponse<Variant>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 415, response = UnsupportedMediaTypeResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_variant<R: VariantRepository>(
    State(service): State<Arc<VariantService<R>>>,
    ctx: RequestContext,
    ValidatedJson(input): ValidatedJson<CreateVariant>,
) -> CatalogResult<Envelope<Variant>> {
    let variant = service.create_variant(input).await?;
    Ok(send_success(&ctx, StatusCode::CREATED, variant))
}

/// Get a variant by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = i64, Path, description = "Variant id")),
    responses(
        (status = 200, description = "Variant found", body = ApiResponse<Variant>),
        (status = 400, response = BadRequestFormatResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_variant<R: VariantRepository>(
    State(service): State<Arc<VariantService<R>>>,
    ctx: RequestContext,
    IdPath(id): IdPath,
) -> CatalogResult<Envelope<Variant>> {
    let variant = service.get_variant(id).await?;
    Ok(send_success(&ctx, StatusCode::OK, variant))
}

/// Get a variant by SKU
#[utoipa::path(
    get,
    path = "/sku/{sku}",
    tag = TAG,
    params(("sku" = String, Path, description = "Stock keeping unit")),
    responses(
        (status = 200, description = "Variant found", body = ApiResponse<Variant>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_variant_by_sku<R: VariantRepository>(
    State(service): State<Arc<VariantService<R>>>,
    ctx: RequestContext,
    Path(sku): Path<String>,
) -> CatalogResult<Envelope<Variant>> {
    let variant = service.get_variant_by_sku(&sku).await?;
    Ok(send_success(&ctx, StatusCode::OK, variant))
}

/// List variants of a product
#[utoipa::path(
    get,
    path = "/product/{product_id}",
    tag = TAG,
    params(("product_id" = i64, Path, description = "Product id"), PaginationQuery),
    responses(
        (status = 200, description = "One page of variants", body = ApiResponse<Vec<Variant>>),
        (status = 400, response = BadRequestFormatResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_product_variants<R: VariantRepository>(
    State(service): State<Arc<VariantService<R>>>,
    ctx: RequestContext,
    IdPath(product_id): IdPath,
    page: PageRequest,
) -> CatalogResult<Envelope<Vec<Variant>>> {
    let (variants, total) = service
        .list_product_variants(product_id, false, page)
        .await?;
    Ok(send_paginated(&ctx, StatusCode::OK, variants, page, total))
}

/// List active variants of a product
#[utoipa::path(
    get,
    path = "/product/{product_id}/active",
    tag = TAG,
    params(("product_id" = i64, Path, description = "Product id"), PaginationQuery),
    responses(
        (status = 200, description = "One page of active variants", body = ApiResponse<Vec<Variant>>),
        (status = 400, response = BadRequestFormatResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_active_product_variants<R: VariantRepository>(
    State(service): State<Arc<VariantService<R>>>,
    ctx: RequestContext,
    IdPath(product_id): IdPath,
    page: PageRequest,
) -> CatalogResult<Envelope<Vec<Variant>>> {
    let (variants, total) = service
        .list_product_variants(product_id, true, page)
        .await?;
    Ok(send_paginated(&ctx, StatusCode::OK, variants, page, total))
}

/// Replace a variant
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(("id" = i64, Path, description = "Variant id")),
    request_body = UpdateVariant,
    responses(
        (status = 200, description = "Variant updated", body = ApiResponse<Variant>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 415, response = UnsupportedMediaTypeResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_variant<R: VariantRepository>(
    State(service): State<Arc<VariantService<R>>>,
    ctx: RequestContext,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateVariant>,
) -> CatalogResult<Envelope<Variant>> {
    let variant = service.update_variant(id, input).await?;
    Ok(send_success(&ctx, StatusCode::OK, variant))
}

/// Set the absolute stock quantity
#[utoipa::path(
    put,
    path = "/{id}/stock",
    tag = TAG,
    params(("id" = i64, Path, description = "Variant id")),
    request_body = UpdateStock,
    responses(
        (status = 200, description = "Stock updated", body = ApiResponse<Variant>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 415, response = UnsupportedMediaTypeResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_stock<R: VariantRepository>(
    State(service): State<Arc<VariantService<R>>>,
    ctx: RequestContext,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateStock>,
) -> CatalogResult<Envelope<Variant>> {
    let variant = service.update_stock(id, input).await?;
    Ok(send_success(&ctx, StatusCode::OK, variant))
}

/// Activate a variant
#[utoipa::path(
    put,
    path = "/{id}/activate",
    tag = TAG,
    params(("id" = i64, Path, description = "Variant id")),
    responses(
        (status = 200, description = "Variant activated", body = ApiResponse<Variant>),
        (status = 404, response = NotFoundResponse),
        (status = 415, response = UnsupportedMediaTypeResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn activate_variant<R: VariantRepository>(
    State(service): State<Arc<VariantService<R>>>,
    ctx: RequestContext,
    IdPath(id): IdPath,
) -> CatalogResult<Envelope<Variant>> {
    let variant = service.activate_variant(id).await?;
    Ok(send_success(&ctx, StatusCode::OK, variant))
}

/// Deactivate a variant
#[utoipa::path(
    put,
    path = "/{id}/deactivate",
    tag = TAG,
    params(("id" = i64, Path, description = "Variant id")),
    responses(
        (status = 200, description = "Variant deactivated", body = ApiResponse<Variant>),
        (status = 404, response = NotFoundResponse),
        (status = 415, response = UnsupportedMediaTypeResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn deactivate_variant<R: VariantRepository>(
    State(service): State<Arc<VariantService<R>>>,
    ctx: RequestContext,
    IdPath(id): IdPath,
) -> CatalogResult<Envelope<Variant>> {
    let variant = service.deactivate_variant(id).await?;
    Ok(send_success(&ctx, StatusCode::OK, variant))
}

/// Delete a variant
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = i64, Path, description = "Variant id")),
    responses(
        (status = 204, description = "Variant deleted"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_variant<R: VariantRepository>(
    State(service): State<Arc<VariantService<R>>>,
    IdPath(id): IdPath,
) -> CatalogResult<StatusCode> {
    service.delete_variant(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
