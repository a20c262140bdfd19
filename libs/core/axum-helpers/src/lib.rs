//! # Axum Helpers
//!
//! Shared HTTP plumbing for the catalog services.
//!
//! - **[`errors`]**: error code table, [`AppError`] classifier, error bodies
//! - **[`response`]**: the `{data, meta}` success envelope
//! - **[`pagination`]**: page/limit resolution and the pagination block
//! - **[`middleware`]**: request context, JSON content-type guard, panic
//!   catcher, security headers, CORS
//! - **[`extractors`]**: [`IdPath`] and [`ValidatedJson`]
//! - **[`server`]**: router assembly, health endpoints, graceful shutdown

pub mod errors;
pub mod extractors;
pub mod middleware;
pub mod pagination;
pub mod response;
pub mod server;

pub use errors::{AppError, ApplicationError, ErrorCode, ErrorResponse, FieldError};
pub use extractors::{IdPath, ValidatedJson};
pub use middleware::RequestContext;
pub use pagination::{PageRequest, Pagination, PaginationQuery};
pub use response::{API_VERSION, ApiResponse, Envelope, Meta, send_paginated, send_success};
pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, close_postgres,
    create_production_app, create_router, health_router, run_health_checks,
    with_http_layers,
};
