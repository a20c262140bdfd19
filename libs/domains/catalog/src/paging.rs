use axum_helpers::PageRequest;
use sea_orm::{
    DatabaseConnection, EntityTrait, FromQueryResult, PaginatorTrait, QuerySelect, Select,
};

use crate::error::CatalogResult;

/// Largest OFFSET PostgreSQL accepts (bigint).
const MAX_OFFSET: u64 = i64::MAX as u64;

/// Counts the rows matched by `query` and loads the requested page of them.
///
/// Pages whose offset does not fit a bigint are past any real table and come
/// back empty without a second round trip.
pub(crate) async fn fetch_page<E, T>(
    db: &DatabaseConnection,
    query: Select<E>,
    page: PageRequest,
) -> CatalogResult<(Vec<T>, u64)>
where
    E: EntityTrait,
    E::Model: FromQueryResult + Into<T> + Send + Sync + 'static,
{
    let total = query.clone().count(db).await?;

    let offset = page.offset();
    if offset > MAX_OFFSET {
        return Ok((Vec::new(), total));
    }

    let models = query.offset(offset).limit(page.limit).all(db).await?;
    Ok((models.into_iter().map(Into::into).collect(), total))
}
