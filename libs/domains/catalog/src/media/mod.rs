//! Product media with a single primary item per product.

pub mod entity;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use models::{CreateMedia, Media, MediaData, UpdateMedia};
pub use postgres::PgMediaRepository;
pub use repository::{InMemoryMediaRepository, MediaRepository};
pub use service::MediaService;
