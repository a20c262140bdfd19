//! Two-level category hierarchy: roots (depth 0) and their direct children (depth 1).

pub mod entity;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use models::{Category, CategoryData, CreateCategory, UpdateCategory};
pub use postgres::PgCategoryRepository;
pub use repository::{CategoryRepository, InMemoryCategoryRepository};
pub use service::CategoryService;
