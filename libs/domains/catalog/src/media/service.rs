use axum_helpers::PageRequest;
use std::sync::Arc;
use validator::Validate;

use crate::error::{CatalogError, CatalogResult, Resource};
use crate::media::models::{CreateMedia, Media, MediaData, UpdateMedia};
use crate::media::repository::MediaRepository;

/// Service layer for Media business logic
pub struct MediaService<R: MediaRepository> {
    repository: Arc<R>,
}

impl<R: MediaRepository> Clone for MediaService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: MediaRepository> MediaService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn create_media(&self, input: CreateMedia) -> CatalogResult<Media> {
        input.validate()?;

        let data = MediaData {
            product_id: input.product_id.ok_or(CatalogError::MissingField("productId"))?,
            variant_id: input.variant_id,
            media_type: input.media_type.ok_or(CatalogError::MissingField("mediaType"))?,
            url: input.url.ok_or(CatalogError::MissingField("url"))?,
            alt: input.alt.unwrap_or_default(),
            position: input.position.unwrap_or(0),
            is_primary: input.is_primary.unwrap_or(false),
        };

        self.repository.create(data).await
    }

    pub async fn get_media(&self, id: i64) -> CatalogResult<Media> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::not_found(Resource::Media, id))
    }

    pub async fn list_product_media(
        &self,
        product_id: i64,
        page: PageRequest,
    ) -> CatalogResult<(Vec<Media>, u64)> {
        self.repository.list_by_product(product_id, page).await
    }

    pub async fn list_variant_media(
        &self,
        variant_id: i64,
        page: PageRequest,
    ) -> CatalogResult<(Vec<Media>, u64)> {
        self.repository.list_by_variant(variant_id, page).await
    }

    pub async fn get_primary_media(&self, product_id: i64) -> CatalogResult<Media> {
        self.repository
            .get_primary(product_id)
            .await?
            .ok_or(CatalogError::PrimaryMediaNotFound(product_id))
    }

    pub async fn set_primary_media(&self, product_id: i64, media_id: i64) -> CatalogResult<Media> {
        self.repository
            .set_primary(product_id, media_id)
            .await?
            .ok_or(CatalogError::MediaNotInProduct {
                product_id,
                media_id,
            })
    }

    /// Full replace; the owning product is kept.
    pub async fn update_media(&self, id: i64, input: UpdateMedia) -> CatalogResult<Media> {
        input.validate()?;
        let existing = self.get_media(id).await?;

        let data = MediaData {
            product_id: existing.product_id,
            variant_id: input.variant_id,
            media_type: input.media_type.ok_or(CatalogError::MissingField("mediaType"))?,
            url: input.url.ok_or(CatalogError::MissingField("url"))?,
            alt: input.alt.unwrap_or_default(),
            position: input.position.unwrap_or(0),
            is_primary: input.is_primary.unwrap_or(false),
        };

        self.repository
            .update(id, data)
            .await?
            .ok_or(CatalogError::not_found(Resource::Media, id))
    }

    pub async fn delete_media(&self, id: i64) -> CatalogResult<()> {
        if !self.repository.delete(id).await? {
            return Err(CatalogError::not_found(Resource::Media, id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::repository::MockMediaRepository;
    use chrono::Utc;
    use mockall::predicate::*;

    fn media(id: i64, product_id: i64, is_primary: bool) -> Media {
        Media {
            id,
            product_id,
            variant_id: None,
            media_type: "image".to_string(),
            url: "https://cdn.example.com/a.jpg".to_string(),
            alt: String::new(),
            position: 0,
            is_primary,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_media_defaults() {
        let mut mock_repo = MockMediaRepository::new();
        mock_repo
            .expect_create()
            .withf(|data| data.position == 0 && !data.is_primary && data.alt.is_empty())
            .times(1)
            .returning(|data| Ok(media(1, data.product_id, data.is_primary)));

        let service = MediaService::new(mock_repo);
        let created = service
            .create_media(CreateMedia {
                product_id: Some(4),
                media_type: Some("image".into()),
                url: Some("https://cdn.example.com/a.jpg".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(created.product_id, 4);
    }

    #[tokio::test]
    async fn test_create_media_requires_product() {
        let mut mock_repo = MockMediaRepository::new();
        mock_repo.expect_create().never();

        let service = MediaService::new(mock_repo);
        let result = service
            .create_media(CreateMedia {
                media_type: Some("image".into()),
                url: Some("https://cdn.example.com/a.jpg".into()),
                ..Default::default()
            })
            .await;
        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }

    #[tokio::test]
    async fn test_primary_missing() {
        let mut mock_repo = MockMediaRepository::new();
        mock_repo
            .expect_get_primary()
            .with(eq(9))
            .returning(|_| Ok(None));

        let service = MediaService::new(mock_repo);
        let result = service.get_primary_media(9).await;
        assert!(matches!(result, Err(CatalogError::PrimaryMediaNotFound(9))));
    }

    #[tokio::test]
    async fn test_set_primary_for_foreign_media() {
        let mut mock_repo = MockMediaRepository::new();
        mock_repo
            .expect_set_primary()
            .with(eq(1), eq(5))
            .returning(|_, _| Ok(None));

        let service = MediaService::new(mock_repo);
        let result = service.set_primary_media(1, 5).await;
        assert!(matches!(
            result,
            Err(CatalogError::MediaNotInProduct {
                product_id: 1,
                media_id: 5
            })
        ));
    }

    #[tokio::test]
    async fn test_update_keeps_product() {
        let mut mock_repo = MockMediaRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(|id| Ok(Some(media(id, 3, false))));
        mock_repo
            .expect_update()
            .withf(|id, data| *id == 2 && data.product_id == 3 && data.is_primary)
            .times(1)
            .returning(|id, data| Ok(Some(media(id, data.product_id, data.is_primary))));

        let service = MediaService::new(mock_repo);
        let updated = service
            .update_media(
                2,
                UpdateMedia {
                    media_type: Some("image".into()),
                    url: Some("https://cdn.example.com/b.jpg".into()),
                    is_primary: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.is_primary);
        assert_eq!(updated.product_id, 3);
    }

    #[tokio::test]
    async fn test_delete_missing_media() {
        let mut mock_repo = MockMediaRepository::new();
        mock_repo.expect_delete().returning(|_| Ok(false));

        let service = MediaService::new(mock_repo);
        let result = service.delete_media(8).await;
        assert!(matches!(
            result,
            Err(CatalogError::NotFound {
                resource: Resource::Media,
                id: 8
            })
        ));
    }
}
