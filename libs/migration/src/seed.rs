//! Demo catalog data for local environments.

use sea_orm::{ConnectionTrait, DbErr, Statement};
use sea_orm_migration::prelude::*;

use crate::m20260301_000000_create_catalog_tables::Products;

/// `(name, description, short_description)`, all seeded as `active`.
pub const DEMO_PRODUCTS: &[(&str, &str, &str)] = &[
    ("iPhone 15", "Latest Apple iPhone", "Apple flagship"),
    ("Samsung Galaxy S24", "Flagship Android phone", "Samsung flagship"),
];

/// Inserts [`DEMO_PRODUCTS`] when the products table is empty.
///
/// Returns the number of rows inserted, so a second run reports 0.
pub async fn seed_demo_products<C: ConnectionTrait>(db: &C) -> Result<u64, DbErr> {
    let backend = db.get_database_backend();

    let existing = db
        .query_one_raw(Statement::from_string(
            backend,
            "SELECT COUNT(*) AS n FROM products",
        ))
        .await?
        .map(|row| row.try_get::<i64>("", "n"))
        .transpose()?
        .unwrap_or(0);
    if existing > 0 {
        return Ok(0);
    }

    let mut insert = Query::insert();
    insert.into_table(Products::Table).columns([
        Products::Name,
        Products::Description,
        Products::ShortDescription,
        Products::Status,
    ]);
    for (name, description, short_description) in DEMO_PRODUCTS {
        insert.values_panic([
            (*name).into(),
            (*description).into(),
            (*short_description).into(),
            "active".into(),
        ]);
    }

    let result = db.execute_raw(backend.build(&insert)).await?;
    Ok(result.rows_affected())
}
