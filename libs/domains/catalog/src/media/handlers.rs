use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
};
use axum_extra::extract::WithRejection;
use axum_helpers::{
    AppError, ApiResponse, ApplicationError, Envelope, ErrorCode, IdPath, PageRequest,
    PaginationQuery, RequestContext, ValidatedJson,
    errors::responses::{
        BadRequestFormatResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse, UnsupportedMediaTypeResponse,
    },
    send_paginated, send_success,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CatalogResult;
use crate::media::models::{CreateMedia, Media, UpdateMedia};
use crate::media::repository::MediaRepository;
use crate::media::service::MediaService;

const TAG: &str = "media";

/// OpenAPI documentation for the Media API
#[derive(OpenApi)]
#[openapi(
    paths(
        create_media,
        get_media,
        list_product_media,
        get_primary_media,
        set_primary_media,
        list_variant_media,
        update_media,
        delete_media,
    ),
    components(
        schemas(Media, CreateMedia, UpdateMedia),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestFormatResponse,
            ConflictResponse,
            UnsupportedMediaTypeResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Product images and other media"))
)]
pub struct ApiDoc;

pub fn router<R: MediaRepository + 'static>(service: MediaService<R>) -> Router {
    Router::new()
        .route("/", post(create_media))
        .route(
            "/{id}",
            get(get_media).put(update_media).delete(delete_media),
        )
        .route("/product/{product_id}", get(list_product_media))
        .route("/product/{product_id}/primary", get(get_primary_media))
        .route(
            "/product/{product_id}/primary/{media_id}",
            put(set_primary_media),
        )
        .route("/variant/{variant_id}", get(list_variant_media))
        .with_state(Arc::new(service))
}

/// Create a media item
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateMedia,
    responses(
        (status = 201, description = "Media created", body = ApiResponse<Media>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 415, response = UnsupportedMediaTypeResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_media<R: MediaRepository>(
    State(service): State<Arc<MediaService<R>>>,
    ctx: RequestContext,
    ValidatedJson(input): ValidatedJson<CreateMedia>,
) -> CatalogResult<Envelope<Media>> {
    let media = service.create_media(input).await?;
    Ok(send_success(&ctx, StatusCode::CREATED, media))
}

/// Get a media item by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = i64, Path, description = "Media id")),
    responses(
        (status = 200, description = "Media found", body = ApiResponse<Media>),
        (status = 400, response = BadRequestFormatResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_media<R: MediaRepository>(
    State(service): State<Arc<MediaService<R>>>,
    ctx: RequestContext,
    IdPath(id): IdPath,
) -> CatalogResult<Envelope<Media>> {
    let media = service.get_media(id).await?;
    Ok(send_success(&ctx, StatusCode::OK, media))
}

/// List media of a product ordered by position
#[utoipa::path(
    get,
    path = "/product/{product_id}",
    tag = TAG,
    params(("product_id" = i64, Path, description = "Product id"), PaginationQuery),
    responses(
        (status = 200, description = "One page of media", body = ApiResponse<Vec<Media>>),
        (status = 400, response = BadRequestFormatResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_product_media<R: MediaRepository>(
    State(service): State<Arc<MediaService<R>>>,
    ctx: RequestContext,
    IdPath(product_id): IdPath,
    page: PageRequest,
) -> CatalogResult<Envelope<Vec<Media>>> {
    let (media, total) = service.list_product_media(product_id, page).await?;
    Ok(send_paginated(&ctx, StatusCode::OK, media, page, total))
}

/// Get the primary media item of a product
#[utoipa::path(
    get,
    path = "/product/{product_id}/primary",
    tag = TAG,
    params(("product_id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Primary media", body = ApiResponse<Media>),
        (status = 400, response = BadRequestFormatResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_primary_media<R: MediaRepository>(
    State(service): State<Arc<MediaService<R>>>,
    ctx: RequestContext,
    IdPath(product_id): IdPath,
) -> CatalogResult<Envelope<Media>> {
    let media = service.get_primary_media(product_id).await?;
    Ok(send_success(&ctx, StatusCode::OK, media))
}

/// Make a media item the product's only primary item
#[utoipa::path(
    put,
    path = "/product/{product_id}/primary/{media_id}",
    tag = TAG,
    params(
        ("product_id" = i64, Path, description = "Product id"),
        ("media_id" = i64, Path, description = "Media id")
    ),
    responses(
        (status = 200, description = "Primary media set", body = ApiResponse<Media>),
        (status = 400, response = BadRequestFormatResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn set_primary_media<R: MediaRepository>(
    State(service): State<Arc<MediaService<R>>>,
    ctx: RequestContext,
    WithRejection(Path((product_id, media_id)), _): WithRejection<Path<(i64, i64)>, AppError>,
) -> Result<Envelope<Media>, AppError> {
    if product_id <= 0 || media_id <= 0 {
        return Err(ApplicationError::new(
            ErrorCode::InvalidFieldFormat,
            format!("Invalid id: {}/{}", product_id, media_id),
        )
        .into());
    }

    let media = service.set_primary_media(product_id, media_id).await?;
    Ok(send_success(&ctx, StatusCode::OK, media))
}

/// List media attached to a variant
#[utoipa::path(
    get,
    path = "/variant/{variant_id}",
    tag = TAG,
    params(("variant_id" = i64, Path, description = "Variant id"), PaginationQuery),
    responses(
        (status = 200, description = "One page of media", body = ApiResponse<Vec<Media>>),
        (status = 400, response = BadRequestFormatResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_variant_media<R: MediaRepository>(
    State(service): State<Arc<MediaService<R>>>,
    ctx: RequestContext,
    IdPath(variant_id): IdPath,
    page: PageRequest,
) -> CatalogResult<Envelope<Vec<Media>>> {
    let (media, total) = service.list_variant_media(variant_id, page).await?;
    Ok(send_paginated(&ctx, StatusCode::OK, media, page, total))
}

/// Replace a media item
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(("id" = i64, Path, description = "Media id")),
    request_body = UpdateMedia,
    responses(
        (status = 200, description = "Media updated", body = ApiResponse<Media>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 415, response = UnsupportedMediaTypeResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_media<R: MediaRepository>(
    State(service): State<Arc<MediaService<R>>>,
    ctx: RequestContext,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateMedia>,
) -> CatalogResult<Envelope<Media>> {
    let media = service.update_media(id, input).await?;
    Ok(send_success(&ctx, StatusCode::OK, media))
}

/// Delete a media item
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = i64, Path, description = "Media id")),
    responses(
        (status = 204, description = "Media deleted"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_media<R: MediaRepository>(
    State(service): State<Arc<MediaService<R>>>,
    IdPath(id): IdPath,
) -> CatalogResult<StatusCode> {
    service.delete_media(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
