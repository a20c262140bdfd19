use async_trait::async_trait;
use axum_helpers::PageRequest;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::categories::models::{Category, CategoryData};
use crate::error::CatalogResult;
use crate::memory::{Table, paginate};

/// Repository trait for Category persistence
///
/// Hierarchy rules live in the service; implementations only store what
/// they are given.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, data: CategoryData) -> CatalogResult<Category>;

    async fn get_by_id(&self, id: i64) -> CatalogResult<Option<Category>>;

    async fn list(&self, page: PageRequest) -> CatalogResult<(Vec<Category>, u64)>;

    /// Categories without a parent
    async fn list_roots(&self, page: PageRequest) -> CatalogResult<(Vec<Category>, u64)>;

    async fn list_children(
        &self,
        parent_id: i64,
        page: PageRequest,
    ) -> CatalogResult<(Vec<Category>, u64)>;

    async fn count_children(&self, parent_id: i64) -> CatalogResult<u64>;

    async fn update(&self, id: i64, data: CategoryData) -> CatalogResult<Option<Category>>;

    async fn delete(&self, id: i64) -> CatalogResult<bool>;
}

/// In-memory implementation of CategoryRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCategoryRepository {
    categories: Arc<RwLock<Table<Category>>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn page_where(
        &self,
        page: PageRequest,
        keep: impl Fn(&Category) -> bool,
    ) -> (Vec<Category>, u64) {
        let categories = self.categories.read().await;
        let rows = categories.rows.values().filter(|c| keep(c)).cloned().collect();
        paginate(rows, page)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn create(&self, data: CategoryData) -> CatalogResult<Category> {
        let mut categories = self.categories.write().await;
        let now = Utc::now();

        let category = categories.insert_with(|id| Category {
            id,
            name: data.name,
            description: data.description,
            depth: data.depth,
            parent_id: data.parent_id,
            created_at: now,
            updated_at: now,
        });

        tracing::info!(category_id = category.id, depth = category.depth, "Created category");
        Ok(category)
    }

    async fn get_by_id(&self, id: i64) -> CatalogResult<Option<Category>> {
        Ok(self.categories.read().await.get(id))
    }

    async fn list(&self, page: PageRequest) -> CatalogResult<(Vec<Category>, u64)> {
        Ok(self.page_where(page, |_| true).await)
    }

    async fn list_roots(&self, page: PageRequest) -> CatalogResult<(Vec<Category>, u64)> {
        Ok(self.page_where(page, Category::is_root).await)
    }

    async fn list_children(
        &self,
        parent_id: i64,
        page: PageRequest,
    ) -> CatalogResult<(Vec<Category>, u64)> {
        Ok(self
            .page_where(page, |c| c.parent_id == Some(parent_id))
            .await)
    }

    async fn count_children(&self, parent_id: i64) -> CatalogResult<u64> {
        let categories = self.categories.read().await;
        Ok(categories
            .rows
            .values()
            .filter(|c| c.parent_id == Some(parent_id))
            .count() as u64)
    }

    async fn update(&self, id: i64, data: CategoryData) -> CatalogResult<Option<Category>> {
        let mut categories = self.categories.write().await;
        let Some(category) = categories.rows.get_mut(&id) else {
            return Ok(None);
        };

        category.name = data.name;
        category.description = data.description;
        category.parent_id = data.parent_id;
        category.depth = data.depth;
        category.updated_at = Utc::now();

        tracing::info!(category_id = id, "Updated category");
        Ok(Some(category.clone()))
    }

    async fn delete(&self, id: i64) -> CatalogResult<bool> {
        let removed = self.categories.write().await.rows.remove(&id).is_some();
        if removed {
            tracing::info!(category_id = id, "Deleted category");
        }
        Ok(removed)
    }
}
