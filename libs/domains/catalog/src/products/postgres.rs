use async_trait::async_trait;
use axum_helpers::PageRequest;
use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder};

use crate::error::CatalogResult;
use crate::paging;
use crate::products::entity;
use crate::products::models::{Product, ProductData};
use crate::products::repository::ProductRepository;

#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, data: ProductData) -> CatalogResult<Product> {
        let now = Utc::now();
        let model = entity::ActiveModel {
            id: NotSet,
            name: Set(data.name),
            description: Set(data.description),
            short_description: Set(data.short_description),
            status: Set(data.status),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&self.db)
        .await?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> CatalogResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, page: PageRequest) -> CatalogResult<(Vec<Product>, u64)> {
        let query = entity::Entity::find().order_by_asc(entity::Column::Id);
        paging::fetch_page(&self.db, query, page).await
    }

    async fn update(&self, id: i64, data: ProductData) -> CatalogResult<Option<Product>> {
        let Some(model) = entity::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::ActiveModel = model.into();
        active.name = Set(data.name);
        active.description = Set(data.description);
        active.short_description = Set(data.short_description);
        active.status = Set(data.status);
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;

        tracing::info!(product_id = id, "Updated product");
        Ok(Some(updated.into()))
    }

    async fn delete(&self, id: i64) -> CatalogResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
