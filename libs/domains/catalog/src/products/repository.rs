use async_trait::async_trait;
use axum_helpers::PageRequest;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::CatalogResult;
use crate::memory::{Table, paginate};
use crate::products::models::{Product, ProductData};

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, data: ProductData) -> CatalogResult<Product>;

    async fn get_by_id(&self, id: i64) -> CatalogResult<Option<Product>>;

    /// One page ordered by id, plus the total row count
    async fn list(&self, page: PageRequest) -> CatalogResult<(Vec<Product>, u64)>;

    /// Replaces all mutable fields; `None` if the product does not exist
    async fn update(&self, id: i64, data: ProductData) -> CatalogResult<Option<Product>>;

    async fn delete(&self, id: i64) -> CatalogResult<bool>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<Table<Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, data: ProductData) -> CatalogResult<Product> {
        let mut products = self.products.write().await;
        let now = Utc::now();

        let product = products.insert_with(|id| Product {
            id,
            name: data.name,
            description: data.description,
            short_description: data.short_description,
            status: data.status,
            created_at: now,
            updated_at: now,
        });

        tracing::info!(product_id = product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: i64) -> CatalogResult<Option<Product>> {
        Ok(self.products.read().await.get(id))
    }

    async fn list(&self, page: PageRequest) -> CatalogResult<(Vec<Product>, u64)> {
        let products = self.products.read().await;
        Ok(paginate(products.rows.values().cloned().collect(), page))
    }

    async fn update(&self, id: i64, data: ProductData) -> CatalogResult<Option<Product>> {
        let mut products = self.products.write().await;
        let Some(product) = products.rows.get_mut(&id) else {
            return Ok(None);
        };

        product.name = data.name;
        product.description = data.description;
        product.short_description = data.short_description;
        product.status = data.status;
        product.updated_at = Utc::now();

        tracing::info!(product_id = id, "Updated product");
        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: i64) -> CatalogResult<bool> {
        let removed = self.products.write().await.rows.remove(&id).is_some();
        if removed {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::products::models::ProductStatus;

    fn data(name: &str) -> ProductData {
        ProductData {
            name: name.to_string(),
            description: String::new(),
            short_description: String::new(),
            status: ProductStatus::Active,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = InMemoryProductRepository::new();
        let first = repo.create(data("Desk")).await.unwrap();
        let second = repo.create(data("Chair")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create(data("Desk")).await.unwrap();

        let updated = repo
            .update(
                created.id,
                ProductData {
                    status: ProductStatus::Inactive,
                    ..data("Standing desk")
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "Standing desk");
        assert_eq!(updated.status, ProductStatus::Inactive);
        assert_eq!(updated.created_at, created.created_at);
        assert!(repo.update(99, data("Ghost")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_and_delete() {
        let repo = InMemoryProductRepository::new();
        for i in 0..3 {
            repo.create(data(&format!("Product {i}"))).await.unwrap();
        }

        let (items, total) = repo.list(PageRequest::new(1, 2)).await.unwrap();
        assert_eq!(total, 3);
        assert_eq!(items.len(), 2);

        assert!(repo.delete(1).await.unwrap());
        assert!(!repo.delete(1).await.unwrap());
        assert_eq!(repo.list(PageRequest::default()).await.unwrap().1, 2);
    }
}
