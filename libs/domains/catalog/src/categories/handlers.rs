use axum::{Router, extract::State, http::StatusCode, routing::get};
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

use crate::categories::models::{Category, CreateCategory};
use crate::categories::repository::CategoryRepository;
use crate::categories::service::CategoryService;
use crate::error::CatalogResult;

const TAG: &str = "categories";

/// OpenAPI documentation for the Categories API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_categories,
        list_root_categories,
        create_category,
        get_category,
        list_subcategories,
        update_category,
        delete_category,
    ),
    components(
        schemas(Category, CreateCategory),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestFormatResponse,
            ConflictResponse,
            UnsupportedMediaTypeResponse,
            InternalServerErrorResponse
        )
    ),
    tags((name = TAG, description = "Two-level category hierarchy"))
)]
pub struct ApiDoc;

pub fn router<R: CategoryRepository + 'static>(service: CategoryService<R>) -> Router {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route("/root", get(list_root_categories))
        .route(
            "/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
        .route("/{id}/subcategories", get(list_subcategories))
        .with_state(Arc::new(service))
}

/// List all categories
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(PaginationQuery),
    responses(
        (status = 200, description = "One page of categories", body = ApiResponse<Vec<Category>>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    ctx: RequestContext,
    page: PageRequest,
) -> CatalogResult<Envelope<Vec<Category>>> {
    let (categories, total) = service.list_categories(page).await?;
    Ok(send_paginated(&ctx, StatusCode::OK, categories, page, total))
}

/// List root categories
#[utoipa::path(
    get,
    path = "/root",
    tag = TAG,
    params(PaginationQuery),
    responses(
        (status = 200, description = "One page of root categories", body = ApiResponse<Vec<Category>>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_root_categories<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    ctx: RequestContext,
    page: PageRequest,
) -> CatalogResult<Envelope<Vec<Category>>> {
    let (categories, total) = service.list_root_categories(page).await?;
    Ok(send_paginated(&ctx, StatusCode::OK, categories, page, total))
}

/// Create a category
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<Category>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 415, response = UnsupportedMediaTypeResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    ctx: RequestContext,
    ValidatedJson(input): ValidatedJson<CreateCategory>,
) -> CatalogResult<Envelope<Category>> {
    let category = service.create_category(input).await?;
    Ok(send_success(&ctx, StatusCode::CREATED, category))
}

/// Get a category by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = i64, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<Category>),
        (status = 400, response = BadRequestFormatResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    ctx: RequestContext,
    IdPath(id): IdPath,
) -> CatalogResult<Envelope<Category>> {
    let category = service.get_category(id).await?;
    Ok(send_success(&ctx, StatusCode::OK, category))
}

/// List direct children of a category
#[utoipa::path(
    get,
    path = "/{id}/subcategories",
    tag = TAG,
    params(("id" = i64, Path, description = "Parent category id"), PaginationQuery),
    responses(
        (status = 200, description = "One page of subcategories", body = ApiResponse<Vec<Category>>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_subcategories<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    ctx: RequestContext,
    IdPath(id): IdPath,
    page: PageRequest,
) -> CatalogResult<Envelope<Vec<Category>>> {
    let (categories, total) = service.list_subcategories(id, page).await?;
    Ok(send_paginated(&ctx, StatusCode::OK, categories, page, total))
}

/// Replace a category
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(("id" = i64, Path, description = "Category id")),
    request_body = CreateCategory,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<Category>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 415, response = UnsupportedMediaTypeResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    ctx: RequestContext,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<CreateCategory>,
) -> CatalogResult<Envelope<Category>> {
    let category = service.update_category(id, input).await?;
    Ok(send_success(&ctx, StatusCode::OK, category))
}

/// Delete a category without subcategories
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = i64, Path, description = "Category id")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    IdPath(id): IdPath,
) -> CatalogResult<StatusCode> {
    service.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
