use async_trait::async_trait;
use axum_helpers::PageRequest;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::CatalogResult;
use crate::memory::{Table, paginate};
use crate::variants::models::{Variant, VariantData};

/// Repository trait for Variant persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VariantRepository: Send + Sync {
    async fn create(&self, data: VariantData) -> CatalogResult<Variant>;

    async fn get_by_id(&self, id: i64) -> CatalogResult<Option<Variant>>;

    async fn get_by_sku(&self, sku: &str) -> CatalogResult<Option<Variant>>;

    /// Variants of one product ordered by id; `active_only` drops inactive ones
    async fn list_by_product(
        &self,
        product_id: i64,
        active_only: bool,
        page: PageRequest,
    ) -> CatalogResult<(Vec<Variant>, u64)>;

    async fn update(&self, id: i64, data: VariantData) -> CatalogResult<Option<Variant>>;

    /// Sets an absolute stock quantity
    async fn update_stock(&self, id: i64, quantity: i32) -> CatalogResult<Option<Variant>>;

    async fn delete(&self, id: i64) -> CatalogResult<bool>;
}

/// In-memory implementation of VariantRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryVariantRepository {
    variants: Arc<RwLock<Table<Variant>>>,
}

impl InMemoryVariantRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VariantRepository for InMemoryVariantRepository {
    async fn create(&self, data: VariantData) -> CatalogResult<Variant> {
        let mut variants = self.variants.write().await;
        let now = Utc::now();

        let variant = variants.insert_with(|id| Variant {
            id,
            product_id: data.product_id,
            sku: data.sku,
            price: data.price,
            stock_quantity: data.stock_quantity,
            is_active: data.is_active,
            created_at: now,
            updated_at: now,
        });

        tracing::info!(variant_id = variant.id, sku = %variant.sku, "Created variant");
        Ok(variant)
    }

    async fn get_by_id(&self, id: i64) -> CatalogResult<Option<Variant>> {
        Ok(self.variants.read().await.get(id))
    }

    async fn get_by_sku(&self, sku: &str) -> CatalogResult<Option<Variant>> {
        let variants = self.variants.read().await;
        Ok(variants.rows.values().find(|v| v.sku == sku).cloned())
    }

    async fn list_by_product(
        &self,
        product_id: i64,
        active_only: bool,
        page: PageRequest,
    ) -> CatalogResult<(Vec<Variant>, u64)> {
        let variants = self.variants.read().await;
        let rows = variants
            .rows
            .values()
            .filter(|v| v.product_id == product_id && (!active_only || v.is_active))
            .cloned()
            .collect();
        Ok(paginate(rows, page))
    }

    async fn update(&self, id: i64, data: VariantData) -> CatalogResult<Option<Variant>> {
        let mut variants = self.variants.write().await;
        let Some(variant) = variants.rows.get_mut(&id) else {
            return Ok(None);
        };

        variant.sku = data.sku;
        variant.price = data.price;
        variant.stock_quantity = data.stock_quantity;
        variant.is_active = data.is_active;
        variant.updated_at = Utc::now();

        tracing::info!(variant_id = id, "Updated variant");
        Ok(Some(variant.clone()))
    }

    async fn update_stock(&self, id: i64, quantity: i32) -> CatalogResult<Option<Variant>> {
        let mut variants = self.variants.write().await;
        let Some(variant) = variants.rows.get_mut(&id) else {
            return Ok(None);
        };

        variant.stock_quantity = quantity;
        variant.updated_at = Utc::now();

        tracing::info!(variant_id = id, quantity, "Updated variant stock");
        Ok(Some(variant.clone()))
    }

    async fn delete(&self, id: i64) -> CatalogResult<bool> {
        let removed = self.variants.write().await.rows.remove(&id).is_some();
        if removed {
            tracing::info!(variant_id = id, "Deleted variant");
        }
        Ok(removed)
    }
}
