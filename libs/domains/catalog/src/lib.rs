//! Catalog Domain
//!
//! Products, categories, variants and media, each in its own module with the
//! same layering:
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← axum routes, envelope responses
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← validation, hierarchy and primary-media rules
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← trait + PostgreSQL and in-memory implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← DTOs, sea-orm entities
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalog::categories::{handlers, CategoryService, InMemoryCategoryRepository};
//!
//! let service = CategoryService::new(InMemoryCategoryRepository::new());
//! let router: axum::Router = handlers::router(service);
//! ```

pub mod categories;
pub mod error;
pub mod media;
mod memory;
mod paging;
pub mod products;
pub mod variants;

pub use error::{CatalogError, CatalogResult, Resource};
