//! Purchasable variants of a product, identified by a unique SKU.

pub mod entity;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use models::{CreateVariant, UpdateStock, UpdateVariant, Variant, VariantData};
pub use postgres::PgVariantRepository;
pub use repository::{InMemoryVariantRepository, VariantRepository};
pub use service::VariantService;
