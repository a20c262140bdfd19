//! Products: plain CRUD with validation.

pub mod entity;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use models::{CreateProduct, Product, ProductData, ProductStatus, UpdateProduct};
pub use postgres::PgProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
