//! Integer id path parameter extractor.

use crate::errors::{AppError, ApplicationError, ErrorCode};
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// Extracts a single positive integer id from the path.
///
/// ```ignore
/// async fn get_product(IdPath(id): IdPath) -> String {
///     format!("product {id}")
/// }
///
/// let app = Router::new().route("/products/{id}", get(get_product));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;

        match raw.parse::<i64>() {
            Ok(id) if id > 0 => Ok(IdPath(id)),
            _ => Err(ApplicationError::new(
                ErrorCode::InvalidFieldFormat,
                format!("Invalid id: {}", raw),
            )
            .into()),
        }
    }
}
