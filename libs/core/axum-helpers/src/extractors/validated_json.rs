//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// Body rejections and `Validate` failures both surface as [`AppError`], so
/// clients get `INVALID_FIELD_FORMAT` for malformed JSON and
/// `VALIDATION_ERROR` with per-field details for rule violations.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct CreateCategory {
///     #[validate(required, length(max = 255))]
///     name: Option<String>,
/// }
///
/// async fn create(ValidatedJson(payload): ValidatedJson<CreateCategory>) -> String {
///     format!("Creating {:?}", payload.name)
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}
