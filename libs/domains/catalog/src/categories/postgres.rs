use async_trait::async_trait;
use axum_helpers::PageRequest;
use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Select,
};

use crate::categories::entity;
use crate::categories::models::{Category, CategoryData};
use crate::categories::repository::CategoryRepository;
use crate::error::CatalogResult;
use crate::paging;

#[derive(Clone)]
pub struct PgCategoryRepository {
    db: DatabaseConnection,
}

impl PgCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn fetch_page(
        &self,
        query: Select<entity::Entity>,
        page: PageRequest,
    ) -> CatalogResult<(Vec<Category>, u64)> {
        paging::fetch_page(&self.db, query.order_by_asc(entity::Column::Id), page).await
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn create(&self, data: CategoryData) -> CatalogResult<Category> {
        let now = Utc::now();
        let model = entity::ActiveModel {
            id: NotSet,
            name: Set(data.name),
            description: Set(data.description),
            depth: Set(data.depth),
            parent_id: Set(data.parent_id),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&self.db)
        .await?;

        tracing::info!(category_id = model.id, depth = model.depth, "Created category");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> CatalogResult<Option<Category>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, page: PageRequest) -> CatalogResult<(Vec<Category>, u64)> {
        self.fetch_page(entity::Entity::find(), page).await
    }

    async fn list_roots(&self, page: PageRequest) -> CatalogResult<(Vec<Category>, u64)> {
        let query = entity::Entity::find().filter(entity::Column::ParentId.is_null());
        self.fetch_page(query, page).await
    }

    async fn list_children(
        &self,
        parent_id: i64,
        page: PageRequest,
    ) -> CatalogResult<(Vec<Category>, u64)> {
        let query = entity::Entity::find().filter(entity::Column::ParentId.eq(parent_id));
        self.fetch_page(query, page).await
    }

    async fn count_children(&self, parent_id: i64) -> CatalogResult<u64> {
        let count = entity::Entity::find()
            .filter(entity::Column::ParentId.eq(parent_id))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    async fn update(&self, id: i64, data: CategoryData) -> CatalogResult<Option<Category>> {
        let Some(model) = entity::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::ActiveModel = model.into();
        active.name = Set(data.name);
        active.description = Set(data.description);
        active.depth = Set(data.depth);
        active.parent_id = Set(data.parent_id);
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;

        tracing::info!(category_id = id, "Updated category");
        Ok(Some(updated.into()))
    }

    async fn delete(&self, id: i64) -> CatalogResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(category_id = id, "Deleted category");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn test_list_far_page_is_empty_not_a_panic() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![BTreeMap::from([("num_items", Value::from(2i64))])]])
            .into_connection();
        let repo = PgCategoryRepository::new(db);

        let page = PageRequest::from_raw(Some("4611686018427387905"), Some("4"));
        let (items, total) = repo.list(page).await.unwrap();

        assert!(items.is_empty());
        assert_eq!(total, 2);
    }
}
