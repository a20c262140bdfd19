use async_trait::async_trait;
use axum_helpers::PageRequest;
use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::error::CatalogResult;
use crate::paging;
use crate::variants::entity;
use crate::variants::models::{Variant, VariantData};
use crate::variants::repository::VariantRepository;

#[derive(Clone)]
pub struct PgVariantRepository {
    db: DatabaseConnection,
}

impl PgVariantRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: i64) -> CatalogResult<Option<entity::Model>> {
        Ok(entity::Entity::find_by_id(id).one(&self.db).await?)
    }
}

#[async_trait]
impl VariantRepository for PgVariantRepository {
    async fn create(&self, data: VariantData) -> CatalogResult<Variant> {
        let now = Utc::now();
        let model = entity::ActiveModel {
            id: NotSet,
            product_id: Set(data.product_id),
            sku: Set(data.sku),
            price: Set(data.price),
            stock_quantity: Set(data.stock_quantity),
            is_active: Set(data.is_active),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&self.db)
        .await?;

        tracing::info!(variant_id = model.id, sku = %model.sku, "Created variant");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> CatalogResult<Option<Variant>> {
        Ok(self.find_model(id).await?.map(Into::into))
    }

    async fn get_by_sku(&self, sku: &str) -> CatalogResult<Option<Variant>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Sku.eq(sku))
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn list_by_product(
        &self,
        product_id: i64,
        active_only: bool,
        page: PageRequest,
    ) -> CatalogResult<(Vec<Variant>, u64)> {
        let mut query = entity::Entity::find().filter(entity::Column::ProductId.eq(product_id));
        if active_only {
            query = query.filter(entity::Column::IsActive.eq(true));
        }

        paging::fetch_page(&self.db, query.order_by_asc(entity::Column::Id), page).await
    }

    async fn update(&self, id: i64, data: VariantData) -> CatalogResult<Option<Variant>> {
        let Some(model) = self.find_model(id).await? else {
            return Ok(None);
        };

        let mut active: entity::ActiveModel = model.into();
        active.sku = Set(data.sku);
        active.price = Set(data.price);
        active.stock_quantity = Set(data.stock_quantity);
        active.is_active = Set(data.is_active);
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;

        tracing::info!(variant_id = id, "Updated variant");
        Ok(Some(updated.into()))
    }

    async fn update_stock(&self, id: i64, quantity: i32) -> CatalogResult<Option<Variant>> {
        let Some(model) = self.find_model(id).await? else {
            return Ok(None);
        };

        let mut active: entity::ActiveModel = model.into();
        active.stock_quantity = Set(quantity);
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;

        tracing::info!(variant_id = id, quantity, "Updated variant stock");
        Ok(Some(updated.into()))
    }

    async fn delete(&self, id: i64) -> CatalogResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(variant_id = id, "Deleted variant");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
