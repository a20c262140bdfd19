//! Custom extractors for Axum handlers.
//!
//! Both reject with [`AppError`](crate::errors::AppError), so malformed
//! input produces the same error body as every other failure.

pub mod id_path;
pub mod validated_json;

pub use id_path::IdPath;
pub use validated_json::ValidatedJson;
