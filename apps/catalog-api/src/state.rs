//! Application state management

use domain_catalog::categories::{CategoryService, PgCategoryRepository};
use domain_catalog::media::{MediaService, PgMediaRepository};
use domain_catalog::products::{PgProductRepository, ProductService};
use domain_catalog::variants::{PgVariantRepository, VariantService};
use sea_orm::DatabaseConnection;

use crate::config::Config;

/// Shared application state
///
/// Services hold their repository behind an `Arc`, so cloning the state only
/// bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: DatabaseConnection,
    pub products: ProductService<PgProductRepository>,
    pub categories: CategoryService<PgCategoryRepository>,
    pub variants: VariantService<PgVariantRepository>,
    pub media: MediaService<PgMediaRepository>,
}

impl AppState {
    pub fn new(config: Config, db: DatabaseConnection) -> Self {
        Self {
            products: ProductService::new(PgProductRepository::new(db.clone())),
            categories: CategoryService::new(PgCategoryRepository::new(db.clone())),
            variants: VariantService::new(PgVariantRepository::new(db.clone())),
            media: MediaService::new(PgMediaRepository::new(db.clone())),
            config,
            db,
        }
    }
}
