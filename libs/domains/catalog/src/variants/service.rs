use axum_helpers::PageRequest;
use std::sync::Arc;
use validator::Validate;

use crate::error::{CatalogError, CatalogResult, Resource};
use crate::variants::models::{CreateVariant, UpdateStock, UpdateVariant, Variant, VariantData};
use crate::variants::repository::VariantRepository;

/// Service layer for Variant business logic
pub struct VariantService<R: VariantRepository> {
    repository: Arc<R>,
}

impl<R: VariantRepository> Clone for VariantService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: VariantRepository> VariantService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn create_variant(&self, input: CreateVariant) -> CatalogResult<Variant> {
        input.validate()?;

        let data = VariantData {
            product_id: input.product_id.ok_or(CatalogError::MissingField("productId"))?,
            sku: input.sku.ok_or(CatalogError::MissingField("sku"))?,
            price: input.price.ok_or(CatalogError::MissingField("price"))?,
            stock_quantity: input.stock_quantity.unwrap_or(0),
            is_active: input.is_active.unwrap_or(true),
        };

        self.ensure_sku_free(&data.sku, None).await?;
        self.repository.create(data).await
    }

    pub async fn get_variant(&self, id: i64) -> CatalogResult<Variant> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::not_found(Resource::Variant, id))
    }

    pub async fn get_variant_by_sku(&self, sku: &str) -> CatalogResult<Variant> {
        self.repository
            .get_by_sku(sku)
            .await?
            .ok_or_else(|| CatalogError::SkuNotFound(sku.to_string()))
    }

    pub async fn list_product_variants(
        &self,
        product_id: i64,
        active_only: bool,
        page: PageRequest,
    ) -> CatalogResult<(Vec<Variant>, u64)> {
        self.repository
            .list_by_product(product_id, active_only, page)
            .await
    }

    /// Full replace of the mutable fields; the owning product is kept.
    pub async fn update_variant(&self, id: i64, input: UpdateVariant) -> CatalogResult<Variant> {
        input.validate()?;
        let existing = self.get_variant(id).await?;

        let data = VariantData {
            product_id: existing.product_id,
            sku: input.sku.ok_or(CatalogError::MissingField("sku"))?,
            price: input.price.ok_or(CatalogError::MissingField("price"))?,
            stock_quantity: input.stock_quantity.unwrap_or(0),
            is_active: input.is_active.unwrap_or(true),
        };

        self.ensure_sku_free(&data.sku, Some(id)).await?;
        self.save(id, data).await
    }

    pub async fn update_stock(&self, id: i64, input: UpdateStock) -> CatalogResult<Variant> {
        input.validate()?;
        let quantity = input.quantity.ok_or(CatalogError::MissingField("quantity"))?;

        self.repository
            .update_stock(id, quantity)
            .await?
            .ok_or(CatalogError::not_found(Resource::Variant, id))
    }

    pub async fn activate_variant(&self, id: i64) -> CatalogResult<Variant> {
        self.set_active(id, true).await
    }

    pub async fn deactivate_variant(&self, id: i64) -> CatalogResult<Variant> {
        self.set_active(id, false).await
    }

    pub async fn delete_variant(&self, id: i64) -> CatalogResult<()> {
        if !self.repository.delete(id).await? {
            return Err(CatalogError::not_found(Resource::Variant, id));
        }
        Ok(())
    }

    async fn set_active(&self, id: i64, is_active: bool) -> CatalogResult<Variant> {
        let variant = self.get_variant(id).await?;
        if variant.is_active == is_active {
            return Ok(variant);
        }

        let data = VariantData {
            is_active,
            ..variant.to_data()
        };
        self.save(id, data).await
    }

    async fn save(&self, id: i64, data: VariantData) -> CatalogResult<Variant> {
        self.repository
            .update(id, data)
            .await?
            .ok_or(CatalogError::not_found(Resource::Variant, id))
    }

    async fn ensure_sku_free(&self, sku: &str, owner: Option<i64>) -> CatalogResult<()> {
        match self.repository.get_by_sku(sku).await? {
            Some(existing) if Some(existing.id) != owner => {
                Err(CatalogError::DuplicateSku(sku.to_string()))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variants::repository::MockVariantRepository;
    use chrono::Utc;
    use mockall::predicate::*;

    fn variant(id: i64, sku: &str, is_active: bool) -> Variant {
        Variant {
            id,
            product_id: 1,
            sku: sku.to_string(),
            price: 19.99,
            stock_quantity: 3,
            is_active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn create_input(sku: &str) -> CreateVariant {
        CreateVariant {
            product_id: Some(1),
            sku: Some(sku.to_string()),
            price: Some(19.99),
            stock_quantity: None,
            is_active: None,
        }
    }

    #[tokio::test]
    async fn test_create_variant_defaults() {
        let mut mock_repo = MockVariantRepository::new();
        mock_repo.expect_get_by_sku().returning(|_| Ok(None));
        mock_repo
            .expect_create()
            .withf(|data| data.stock_quantity == 0 && data.is_active)
            .times(1)
            .returning(|data| Ok(variant(1, &data.sku, data.is_active)));

        let service = VariantService::new(mock_repo);
        let created = service.create_variant(create_input("SKU-1")).await.unwrap();
        assert_eq!(created.sku, "SKU-1");
    }

    #[tokio::test]
    async fn test_duplicate_sku_is_rejected() {
        let mut mock_repo = MockVariantRepository::new();
        mock_repo
            .expect_get_by_sku()
            .withf(|sku| sku == "SKU-1")
            .returning(|sku| Ok(Some(variant(7, sku, true))));
        mock_repo.expect_create().never();

        let service = VariantService::new(mock_repo);
        let result = service.create_variant(create_input("SKU-1")).await;
        assert!(matches!(result, Err(CatalogError::DuplicateSku(sku)) if sku == "SKU-1"));
    }

    #[tokio::test]
    async fn test_update_may_keep_own_sku() {
        let mut mock_repo = MockVariantRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(eq(7))
            .returning(|id| Ok(Some(variant(id, "SKU-1", true))));
        mock_repo
            .expect_get_by_sku()
            .returning(|sku| Ok(Some(variant(7, sku, true))));
        mock_repo
            .expect_update()
            .withf(|id, data| *id == 7 && data.product_id == 1 && data.price == 5.0)
            .returning(|id, data| {
                Ok(Some(Variant {
                    price: data.price,
                    ..variant(id, &data.sku, data.is_active)
                }))
            });

        let service = VariantService::new(mock_repo);
        let updated = service
            .update_variant(
                7,
                UpdateVariant {
                    sku: Some("SKU-1".into()),
                    price: Some(5.0),
                    stock_quantity: Some(1),
                    is_active: Some(true),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.price, 5.0);
    }

    #[tokio::test]
    async fn test_deactivate_writes_flag() {
        let mut mock_repo = MockVariantRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(|id| Ok(Some(variant(id, "SKU-1", true))));
        mock_repo
            .expect_update()
            .withf(|_, data| !data.is_active)
            .times(1)
            .returning(|id, data| Ok(Some(variant(id, &data.sku, data.is_active))));

        let service = VariantService::new(mock_repo);
        let variant = service.deactivate_variant(3).await.unwrap();
        assert!(!variant.is_active);
    }

    #[tokio::test]
    async fn test_activate_missing_variant_is_not_found() {
        let mut mock_repo = MockVariantRepository::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));

        let service = VariantService::new(mock_repo);
        let result = service.activate_variant(404).await;
        assert!(matches!(
            result,
            Err(CatalogError::NotFound {
                resource: Resource::Variant,
                id: 404
            })
        ));
    }

    #[tokio::test]
    async fn test_negative_stock_is_rejected() {
        let mut mock_repo = MockVariantRepository::new();
        mock_repo.expect_update_stock().never();

        let service = VariantService::new(mock_repo);
        let result = service
            .update_stock(1, UpdateStock { quantity: Some(-3) })
            .await;
        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }
}
