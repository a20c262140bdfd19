use axum_helpers::PageRequest;
use std::sync::Arc;
use validator::Validate;

use crate::categories::models::{
    CHILD_DEPTH, Category, CategoryData, CreateCategory, ROOT_DEPTH, UpdateCategory,
};
use crate::categories::repository::CategoryRepository;
use crate::error::{CatalogError, CatalogResult, Resource};

/// Service layer for Category business logic
///
/// Keeps the hierarchy two levels deep: a parent must be a root, and a
/// category that already has children cannot be moved under another one.
pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
}

impl<R: CategoryRepository> Clone for CategoryService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn create_category(&self, input: CreateCategory) -> CatalogResult<Category> {
        let data = self.resolve(None, input).await?;
        self.repository.create(data).await
    }

    pub async fn get_category(&self, id: i64) -> CatalogResult<Category> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::not_found(Resource::Category, id))
    }

    pub async fn list_categories(&self, page: PageRequest) -> CatalogResult<(Vec<Category>, u64)> {
        self.repository.list(page).await
    }

    pub async fn list_root_categories(
        &self,
        page: PageRequest,
    ) -> CatalogResult<(Vec<Category>, u64)> {
        self.repository.list_roots(page).await
    }

    pub async fn list_subcategories(
        &self,
        parent_id: i64,
        page: PageRequest,
    ) -> CatalogResult<(Vec<Category>, u64)> {
        self.get_category(parent_id).await?;
        self.repository.list_children(parent_id, page).await
    }

    pub async fn update_category(&self, id: i64, input: UpdateCategory) -> CatalogResult<Category> {
        self.get_category(id).await?;
        let data = self.resolve(Some(id), input).await?;
        self.repository
            .update(id, data)
            .await?
            .ok_or(CatalogError::not_found(Resource::Category, id))
    }

    pub async fn delete_category(&self, id: i64) -> CatalogResult<()> {
        if self.repository.count_children(id).await? > 0 {
            return Err(CatalogError::CategoryHasSubcategories);
        }

        if !self.repository.delete(id).await? {
            return Err(CatalogError::not_found(Resource::Category, id));
        }
        Ok(())
    }

    /// Validates input and derives depth. `id` is the category being updated, if any.
    async fn resolve(&self, id: Option<i64>, input: CreateCategory) -> CatalogResult<CategoryData> {
        input.validate()?;

        let name = input
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(CatalogError::MissingField("category name"))?
            .to_string();

        let depth = match input.parent_id {
            None => ROOT_DEPTH,
            Some(parent_id) => {
                self.check_parent(id, parent_id).await?;
                CHILD_DEPTH
            }
        };

        Ok(CategoryData {
            name,
            description: input.description.unwrap_or_default(),
            parent_id: input.parent_id,
            depth,
        })
    }

    async fn check_parent(&self, id: Option<i64>, parent_id: i64) -> CatalogResult<()> {
        if id == Some(parent_id) {
            return Err(CatalogError::InvalidHierarchy(
                "category cannot be its own parent",
            ));
        }

        let parent = self
            .repository
            .get_by_id(parent_id)
            .await?
            .ok_or(CatalogError::ParentCategoryNotFound)?;

        if !parent.is_root() {
            return Err(CatalogError::InvalidHierarchy(
                "parent category must be a root category",
            ));
        }

        if let Some(id) = id {
            if self.repository.count_children(id).await? > 0 {
                return Err(CatalogError::InvalidHierarchy(
                    "category with subcategories cannot have a parent",
                ));
            }
        }

        Ok(())
    }
}
