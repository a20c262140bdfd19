//! PostgreSQL connectivity for the catalog services.
//!
//! # Features
//!
//! - `postgres` (default): SeaORM connection pool, migrations runner, health check
//! - `config`: `PostgresConfig: core_config::FromEnv`
//!
//! ```ignore
//! use database::postgres::{self, PostgresConfig};
//! use database::common::Backoff;
//!
//! let db = postgres::connect_from_config_with_retry(PostgresConfig::from_env()?, Backoff::default()).await?;
//! postgres::run_migrations::<migration::Migrator>(&db, "catalog_api").await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};
