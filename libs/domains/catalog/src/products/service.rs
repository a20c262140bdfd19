use axum_helpers::PageRequest;
use std::sync::Arc;
use validator::Validate;

use crate::error::{CatalogError, CatalogResult, Resource};
use crate::products::models::{CreateProduct, Product, ProductData, ProductStatus, UpdateProduct};
use crate::products::repository::ProductRepository;

/// Service layer for Product business logic
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn create_product(&self, input: CreateProduct) -> CatalogResult<Product> {
        let data = Self::resolve(input)?;
        self.repository.create(data).await
    }

    pub async fn get_product(&self, id: i64) -> CatalogResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::not_found(Resource::Product, id))
    }

    pub async fn list_products(&self, page: PageRequest) -> CatalogResult<(Vec<Product>, u64)> {
        self.repository.list(page).await
    }

    /// Full replace: omitted optional fields fall back to their defaults.
    pub async fn update_product(&self, id: i64, input: UpdateProduct) -> CatalogResult<Product> {
        let data = Self::resolve(input)?;
        self.repository
            .update(id, data)
            .await?
            .ok_or(CatalogError::not_found(Resource::Product, id))
    }

    pub async fn delete_product(&self, id: i64) -> CatalogResult<()> {
        if !self.repository.delete(id).await? {
            return Err(CatalogError::not_found(Resource::Product, id));
        }
        Ok(())
    }

    fn resolve(input: CreateProduct) -> CatalogResult<ProductData> {
        input.validate()?;

        let status = match input.status.as_deref() {
            Some(raw) => raw.parse().unwrap_or_default(),
            None => ProductStatus::default(),
        };

        Ok(ProductData {
            name: input.name.ok_or(CatalogError::MissingField("name"))?,
            description: input.description.unwrap_or_default(),
            short_description: input.short_description.unwrap_or_default(),
            status,
        })
    }
}
