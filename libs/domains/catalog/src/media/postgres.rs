use async_trait::async_trait;
use axum_helpers::PageRequest;
use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Select, TransactionTrait,
};

use crate::error::CatalogResult;
use crate::paging;
use crate::media::entity;
use crate::media::models::{Media, MediaData};
use crate::media::repository::MediaRepository;

/// PostgreSQL implementation of MediaRepository
///
/// Writes touching `is_primary` run in a transaction together with the
/// clearing of the product's previous primary item.
#[derive(Clone)]
pub struct PgMediaRepository {
    db: DatabaseConnection,
}

impl PgMediaRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn fetch_page(
        &self,
        query: Select<entity::Entity>,
        page: PageRequest,
    ) -> CatalogResult<(Vec<Media>, u64)> {
        let query = query
            .order_by_asc(entity::Column::Position)
            .order_by_asc(entity::Column::Id);
        paging::fetch_page(&self.db, query, page).await
    }
}

async fn clear_primary<C: ConnectionTrait>(
    conn: &C,
    product_id: i64,
    except: Option<i64>,
) -> CatalogResult<()> {
    let mut query = entity::Entity::update_many()
        .col_expr(entity::Column::IsPrimary, Expr::value(false))
        .col_expr(entity::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(entity::Column::ProductId.eq(product_id))
        .filter(entity::Column::IsPrimary.eq(true));
    if let Some(id) = except {
        query = query.filter(entity::Column::Id.ne(id));
    }

    query.exec(conn).await?;
    Ok(())
}

#[async_trait]
impl MediaRepository for PgMediaRepository {
    async fn create(&self, data: MediaData) -> CatalogResult<Media> {
        let txn = self.db.begin().await?;
        if data.is_primary {
            clear_primary(&txn, data.product_id, None).await?;
        }

        let now = Utc::now();
        let model = entity::ActiveModel {
            id: NotSet,
            product_id: Set(data.product_id),
            variant_id: Set(data.variant_id),
            media_type: Set(data.media_type),
            url: Set(data.url),
            alt: Set(data.alt),
            position: Set(data.position),
            is_primary: Set(data.is_primary),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;

        tracing::info!(media_id = model.id, product_id = model.product_id, "Created media");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> CatalogResult<Option<Media>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list_by_product(
        &self,
        product_id: i64,
        page: PageRequest,
    ) -> CatalogResult<(Vec<Media>, u64)> {
        let query = entity::Entity::find().filter(entity::Column::ProductId.eq(product_id));
        self.fetch_page(query, page).await
    }

    async fn list_by_variant(
        &self,
        variant_id: i64,
        page: PageRequest,
    ) -> CatalogResult<(Vec<Media>, u64)> {
        let query = entity::Entity::find().filter(entity::Column::VariantId.eq(variant_id));
        self.fetch_page(query, page).await
    }

    async fn get_primary(&self, product_id: i64) -> CatalogResult<Option<Media>> {
        let model = entity::Entity::find()
            .filter(entity::Column::ProductId.eq(product_id))
            .filter(entity::Column::IsPrimary.eq(true))
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn set_primary(&self, product_id: i64, media_id: i64) -> CatalogResult<Option<Media>> {
        let txn = self.db.begin().await?;

        let Some(model) = entity::Entity::find_by_id(media_id)
            .filter(entity::Column::ProductId.eq(product_id))
            .one(&txn)
            .await?
        else {
            txn.rollback().await?;
            return Ok(None);
        };

        clear_primary(&txn, product_id, Some(media_id)).await?;

        let mut active: entity::ActiveModel = model.into();
        active.is_primary = Set(true);
        active.updated_at = Set(Utc::now().into());
        let updated = active.update(&txn).await?;

        txn.commit().await?;

        tracing::info!(media_id, product_id, "Set primary media");
        Ok(Some(updated.into()))
    }

    async fn update(&self, id: i64, data: MediaData) -> CatalogResult<Option<Media>> {
        let txn = self.db.begin().await?;

        let Some(model) = entity::Entity::find_by_id(id).one(&txn).await? else {
            txn.rollback().await?;
            return Ok(None);
        };

        if data.is_primary {
            clear_primary(&txn, model.product_id, Some(id)).await?;
        }

        let mut active: entity::ActiveModel = model.into();
        active.variant_id = Set(data.variant_id);
        active.media_type = Set(data.media_type);
        active.url = Set(data.url);
        active.alt = Set(data.alt);
        active.position = Set(data.position);
        active.is_primary = Set(data.is_primary);
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&txn).await?;
        txn.commit().await?;

        tracing::info!(media_id = id, "Updated media");
        Ok(Some(updated.into()))
    }

    async fn delete(&self, id: i64) -> CatalogResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(media_id = id, "Deleted media");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
