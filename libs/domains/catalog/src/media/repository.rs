use async_trait::async_trait;
use axum_helpers::PageRequest;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::CatalogResult;
use crate::media::models::{Media, MediaData};
use crate::memory::{Table, paginate};

/// Repository trait for Media persistence
///
/// Every write that sets `is_primary` must clear the flag on the product's
/// other media atomically with the write itself.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaRepository: Send + Sync {
    async fn create(&self, data: MediaData) -> CatalogResult<Media>;

    async fn get_by_id(&self, id: i64) -> CatalogResult<Option<Media>>;

    /// Media of a product ordered by position, then id
    async fn list_by_product(
        &self,
        product_id: i64,
        page: PageRequest,
    ) -> CatalogResult<(Vec<Media>, u64)>;

    /// Media of a variant ordered by position, then id
    async fn list_by_variant(
        &self,
        variant_id: i64,
        page: PageRequest,
    ) -> CatalogResult<(Vec<Media>, u64)>;

    async fn get_primary(&self, product_id: i64) -> CatalogResult<Option<Media>>;

    /// Makes `media_id` the only primary media of `product_id`.
    /// `None` (and no change) if the media does not belong to the product.
    async fn set_primary(&self, product_id: i64, media_id: i64) -> CatalogResult<Option<Media>>;

    async fn update(&self, id: i64, data: MediaData) -> CatalogResult<Option<Media>>;

    async fn delete(&self, id: i64) -> CatalogResult<bool>;
}

/// In-memory implementation of MediaRepository (for development/testing)
///
/// Primary-flag changes happen under a single write lock.
#[derive(Debug, Default, Clone)]
pub struct InMemoryMediaRepository {
    media: Arc<RwLock<Table<Media>>>,
}

impl InMemoryMediaRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn page_where(
        &self,
        page: PageRequest,
        keep: impl Fn(&Media) -> bool,
    ) -> (Vec<Media>, u64) {
        let media = self.media.read().await;
        let mut rows: Vec<Media> = media.rows.values().filter(|m| keep(m)).cloned().collect();
        rows.sort_by_key(|m| (m.position, m.id));
        paginate(rows, page)
    }
}

fn clear_primary(table: &mut Table<Media>, product_id: i64, except: Option<i64>) {
    for media in table.rows.values_mut() {
        if media.product_id == product_id && media.is_primary && Some(media.id) != except {
            media.is_primary = false;
            media.updated_at = Utc::now();
        }
    }
}

#[async_trait]
impl MediaRepository for InMemoryMediaRepository {
    async fn create(&self, data: MediaData) -> CatalogResult<Media> {
        let mut media = self.media.write().await;
        if data.is_primary {
            clear_primary(&mut media, data.product_id, None);
        }

        let now = Utc::now();
        let created = media.insert_with(|id| Media {
            id,
            product_id: data.product_id,
            variant_id: data.variant_id,
            media_type: data.media_type,
            url: data.url,
            alt: data.alt,
            position: data.position,
            is_primary: data.is_primary,
            created_at: now,
            updated_at: now,
        });

        tracing::info!(media_id = created.id, product_id = created.product_id, "Created media");
        Ok(created)
    }

    async fn get_by_id(&self, id: i64) -> CatalogResult<Option<Media>> {
        Ok(self.media.read().await.get(id))
    }

    async fn list_by_product(
        &self,
        product_id: i64,
        page: PageRequest,
    ) -> CatalogResult<(Vec<Media>, u64)> {
        Ok(self.page_where(page, |m| m.product_id == product_id).await)
    }

    async fn list_by_variant(
        &self,
        variant_id: i64,
        page: PageRequest,
    ) -> CatalogResult<(Vec<Media>, u64)> {
        Ok(self
            .page_where(page, |m| m.variant_id == Some(variant_id))
            .await)
    }

    async fn get_primary(&self, product_id: i64) -> CatalogResult<Option<Media>> {
        let media = self.media.read().await;
        Ok(media
            .rows
            .values()
            .find(|m| m.product_id == product_id && m.is_primary)
            .cloned())
    }

    async fn set_primary(&self, product_id: i64, media_id: i64) -> CatalogResult<Option<Media>> {
        let mut media = self.media.write().await;
        match media.rows.get(&media_id) {
            Some(target) if target.product_id == product_id => {}
            _ => return Ok(None),
        }

        clear_primary(&mut media, product_id, Some(media_id));

        let Some(target) = media.rows.get_mut(&media_id) else {
            return Ok(None);
        };
        target.is_primary = true;
        target.updated_at = Utc::now();

        tracing::info!(media_id, product_id, "Set primary media");
        Ok(Some(target.clone()))
    }

    async fn update(&self, id: i64, data: MediaData) -> CatalogResult<Option<Media>> {
        let mut media = self.media.write().await;
        if !media.rows.contains_key(&id) {
            return Ok(None);
        }

        if data.is_primary {
            clear_primary(&mut media, data.product_id, Some(id));
        }

        let Some(item) = media.rows.get_mut(&id) else {
            return Ok(None);
        };
        item.variant_id = data.variant_id;
        item.media_type = data.media_type;
        item.url = data.url;
        item.alt = data.alt;
        item.position = data.position;
        item.is_primary = data.is_primary;
        item.updated_at = Utc::now();

        tracing::info!(media_id = id, "Updated media");
        Ok(Some(item.clone()))
    }

    async fn delete(&self, id: i64) -> CatalogResult<bool> {
        let removed = self.media.write().await.rows.remove(&id).is_some();
        if removed {
            tracing::info!(media_id = id, "Deleted media");
        }
        Ok(removed)
    }
}
