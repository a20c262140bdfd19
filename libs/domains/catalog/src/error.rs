use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ApplicationError, ErrorCode};
use sea_orm::DbErr;
use strum::Display;
use thiserror::Error;
use validator::ValidationErrors;

/// Catalog entity kinds, used to pick the matching `*_NOT_FOUND` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Resource {
    Product,
    Category,
    Variant,
    Media,
}

impl Resource {
    fn not_found_code(self) -> ErrorCode {
        match self {
            Resource::Product => ErrorCode::ProductNotFound,
            Resource::Category => ErrorCode::CategoryNotFound,
            Resource::Variant => ErrorCode::VariantNotFound,
            Resource::Media => ErrorCode::MediaNotFound,
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{resource} with id {id} not found")]
    NotFound { resource: Resource, id: i64 },

    #[error("Variant with SKU '{0}' not found")]
    SkuNotFound(String),

    #[error("Product {0} has no primary media")]
    PrimaryMediaNotFound(i64),

    #[error("Media {media_id} does not belong to product {product_id}")]
    MediaNotInProduct { product_id: i64, media_id: i64 },

    #[error("parent category does not exist")]
    ParentCategoryNotFound,

    #[error("cannot delete category with subcategories")]
    CategoryHasSubcategories,

    #[error("{0}")]
    InvalidHierarchy(&'static str),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Variant with SKU '{0}' already exists")]
    DuplicateSku(String),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Database(#[from] DbErr),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    pub fn not_found(resource: Resource, id: i64) -> Self {
        Self::NotFound { resource, id }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        let message = err.to_string();
        let app_err = match err {
            CatalogError::NotFound { resource, id } => {
                ApplicationError::new(resource.not_found_code(), message).with_context("id", id)
            }
            CatalogError::SkuNotFound(sku) => {
                ApplicationError::new(ErrorCode::VariantNotFound, message).with_context("sku", sku)
            }
            CatalogError::PrimaryMediaNotFound(product_id) => {
                ApplicationError::new(ErrorCode::MediaNotFound, message)
                    .with_context("product_id", product_id)
            }
            CatalogError::MediaNotInProduct {
                product_id,
                media_id,
            } => ApplicationError::new(ErrorCode::MediaNotFound, message)
                .with_context("product_id", product_id)
                .with_context("media_id", media_id),
            CatalogError::ParentCategoryNotFound => {
                ApplicationError::new(ErrorCode::ParentCategoryNotFound, message)
            }
            CatalogError::CategoryHasSubcategories => {
                ApplicationError::new(ErrorCode::CategoryHasSubcategories, message)
            }
            CatalogError::InvalidHierarchy(_) => {
                ApplicationError::new(ErrorCode::InvalidCategoryHierarchy, message)
            }
            CatalogError::MissingField(field) => {
                ApplicationError::new(ErrorCode::MissingRequiredField, message)
                    .with_context("field", field)
            }
            CatalogError::DuplicateSku(sku) => {
                ApplicationError::new(ErrorCode::DbDuplicateKey, message).with_context("sku", sku)
            }
            CatalogError::Validation(errors) => return AppError::Validation(errors),
            CatalogError::Database(db_err) => return AppError::Database(db_err),
        };
        AppError::Application(app_err)
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
