pub mod codes;
pub mod handlers;
pub mod responses;
pub mod validation;

pub use codes::ErrorCode;
pub use validation::{FieldError, field_errors};

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use sea_orm::{ConnAcquireErr, DbErr, SqlErr};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Message sent for any failure whose details must not reach the client.
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal server error occurred.";

/// Error response body.
///
/// ```json
/// {
///   "error": {
///     "code": "VALIDATION_ERROR",
///     "message": "Validation failed.",
///     "fields": [{ "field": "name", "tag": "required", "message": "This field is required." }]
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Machine-readable code, see [`ErrorCode`]
    pub code: String,
    pub message: String,
    /// Present only for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldError>>,
}

/// Error carrying an [`ErrorCode`] plus caller-supplied context.
///
/// ```rust
/// use axum_helpers::errors::{ApplicationError, ErrorCode};
///
/// let err = ApplicationError::new(ErrorCode::RateLimitExceeded, "slow down")
///     .with_context("retry_after", 30);
/// assert_eq!(err.code, ErrorCode::RateLimitExceeded);
/// ```
pub struct ApplicationError {
    pub code: ErrorCode,
    pub message: String,
    pub context: BTreeMap<String, Value>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ApplicationError {
    /// An empty message falls back to the code's default message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.is_empty() {
            code.default_message().to_string()
        } else {
            message
        };

        Self {
            code,
            message,
            context: BTreeMap::new(),
            source: None,
        }
    }

    pub fn from_code(code: ErrorCode) -> Self {
        Self::new(code, code.default_message())
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}

impl fmt::Debug for ApplicationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplicationError")
            .field("code", &self.code)
            .field("message", &self.message)
            .field("context", &self.context)
            .field("source", &self.source.as_ref().map(|s| s.to_string()))
            .finish()
    }
}

impl fmt::Display for ApplicationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApplicationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

/// Boundary error for every handler.
///
/// The variant order mirrors classification priority: coded application
/// errors first, then validation, extraction, database and finally anything
/// unexpected.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error(transparent)]
    Application(#[from] ApplicationError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("JSON extraction error: {0}")]
    JsonRejection(#[from] JsonRejection),

    #[error("Path extraction error: {0}")]
    PathRejection(#[from] PathRejection),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Unexpected error: {0}")]
    Unexpected(eyre::Report),
}

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        Self::Unexpected(err)
    }
}

impl From<ErrorCode> for AppError {
    fn from(code: ErrorCode) -> Self {
        Self::Application(ApplicationError::from_code(code))
    }
}

/// Result of classifying an [`AppError`]: everything needed to build the response.
#[derive(Debug, Clone, PartialEq)]
pub struct Classified {
    pub status: StatusCode,
    pub code: ErrorCode,
    pub message: String,
    pub fields: Option<Vec<FieldError>>,
    pub retry_after: Option<String>,
}

impl Classified {
    fn from_code(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status: code.status(),
            code,
            message: message.into(),
            fields: None,
            retry_after: None,
        }
    }
}

/// Maps a sea-orm error onto the database section of the code table.
pub fn classify_db_error(err: &DbErr) -> ErrorCode {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => return ErrorCode::DbDuplicateKey,
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => return ErrorCode::DbForeignKeyViolation,
        _ => {}
    }

    match err {
        DbErr::ConnectionAcquire(ConnAcquireErr::Timeout) => ErrorCode::DbTimeout,
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => ErrorCode::DbConnectionFailed,
        _ => ErrorCode::DbQueryFailed,
    }
}

fn retry_after(err: &ApplicationError) -> Option<String> {
    if !err.code.is_retryable() {
        return None;
    }

    match err.context.get("retry_after")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl AppError {
    /// Pure mapping from error to status, code, message and field details.
    pub fn classify(&self) -> Classified {
        match self {
            AppError::Application(err) => Classified {
                retry_after: retry_after(err),
                ..Classified::from_code(err.code, err.message.clone())
            },
            AppError::Validation(errors) => Classified {
                fields: Some(field_errors(errors)),
                ..Classified::from_code(
                    ErrorCode::ValidationError,
                    ErrorCode::ValidationError.default_message(),
                )
            },
            AppError::JsonRejection(JsonRejection::MissingJsonContentType(_)) => {
                Classified::from_code(
                    ErrorCode::UnsupportedMediaType,
                    ErrorCode::UnsupportedMediaType.default_message(),
                )
            }
            AppError::JsonRejection(rejection) => {
                Classified::from_code(ErrorCode::InvalidFieldFormat, rejection.body_text())
            }
            AppError::PathRejection(rejection) => {
                Classified::from_code(ErrorCode::InvalidFieldFormat, rejection.body_text())
            }
            AppError::Database(err) => {
                let code = classify_db_error(err);
                Classified::from_code(code, code.default_message())
            }
            AppError::Unexpected(_) => {
                Classified::from_code(ErrorCode::InternalServerError, INTERNAL_ERROR_MESSAGE)
            }
        }
    }

    fn log(&self, classified: &Classified) {
        let error_code = classified.code.code();
        let code = classified.code.as_str();

        if classified.status.is_server_error() {
            match self {
                AppError::Application(err) => tracing::error!(
                    error_code,
                    code,
                    context = ?err.context,
                    source = ?std::error::Error::source(err).map(|s| s.to_string()),
                    "{}",
                    err.message
                ),
                AppError::Unexpected(report) => {
                    tracing::error!(error_code, code, "Unexpected error: {:?}", report)
                }
                other => tracing::error!(error_code, code, "{}", other),
            }
        } else if let AppError::Application(err) = self {
            tracing::info!(error_code, code, context = ?err.context, "{}", err.message);
        } else {
            tracing::warn!(error_code, code, "{}", self);
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let classified = self.classify();
        self.log(&classified);
        classified.into_response()
    }
}

impl IntoResponse for Classified {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: ErrorBody {
                code: self.code.as_str().to_string(),
                message: self.message,
                fields: self.fields,
            },
        });

        let mut response = (self.status, body).into_response();
        if let Some(seconds) = self.retry_after.and_then(|s| HeaderValue::from_str(&s).ok()) {
            response.headers_mut().insert(header::RETRY_AFTER, seconds);
        }
        response
    }
}

/// Builds an error response directly from a code and message.
pub fn error_response(code: ErrorCode, message: impl Into<String>) -> Response {
    Classified::from_code(code, message).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use validator::Validate;

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[derive(Validate)]
    struct NewThing {
        #[validate(required, length(min = 3))]
        name: Option<String>,
    }

    #[test]
    fn test_application_error_uses_table_status() {
        let err: AppError =
            ApplicationError::new(ErrorCode::CategoryHasSubcategories, "cannot delete").into();
        let classified = err.classify();
        assert_eq!(classified.status, StatusCode::CONFLICT);
        assert_eq!(classified.message, "cannot delete");
        assert!(classified.retry_after.is_none());
    }

    #[test]
    fn test_empty_message_falls_back_to_default() {
        let err = ApplicationError::new(ErrorCode::DbTimeout, "");
        assert_eq!(err.message, "Database operation timed out.");
    }

    #[tokio::test]
    async fn test_rate_limit_sets_retry_after_header() {
        let err: AppError = ApplicationError::from_code(ErrorCode::RateLimitExceeded)
            .with_context("retry_after", 30)
            .into();
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers().get(header::RETRY_AFTER).unwrap(), "30");
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "RATE_LIMIT_EXCEEDED");
    }

    #[test]
    fn test_retry_after_ignored_for_other_codes() {
        let err: AppError = ApplicationError::from_code(ErrorCode::ServiceOverloaded)
            .with_context("retry_after", "10")
            .into();
        assert!(err.classify().retry_after.is_none());
    }

    #[tokio::test]
    async fn test_validation_error_body_lists_fields() {
        let errors = NewThing { name: None }.validate().unwrap_err();
        let response = AppError::from(errors).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "Validation failed.");
        assert_eq!(body["error"]["fields"][0]["field"], "name");
        assert_eq!(body["error"]["fields"][0]["tag"], "required");
    }

    #[test]
    fn test_database_errors() {
        let duplicate = DbErr::Query(sea_orm::RuntimeErr::Internal(
            "duplicate key value violates unique constraint".into(),
        ));
        assert_eq!(classify_db_error(&duplicate), ErrorCode::DbQueryFailed);

        let timeout = DbErr::ConnectionAcquire(ConnAcquireErr::Timeout);
        assert_eq!(classify_db_error(&timeout), ErrorCode::DbTimeout);

        let closed = DbErr::ConnectionAcquire(ConnAcquireErr::ConnectionClosed);
        assert_eq!(classify_db_error(&closed), ErrorCode::DbConnectionFailed);

        let not_found = DbErr::RecordNotFound("variant".into());
        assert_eq!(
            AppError::from(not_found).classify().status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_unexpected_error_is_not_leaked() {
        let err = AppError::from(eyre::eyre!("password=hunter2 connection refused"));
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "INTERNAL_SERVER_ERROR");
        assert_eq!(body["error"]["message"], INTERNAL_ERROR_MESSAGE);
        assert!(!body.to_string().contains("hunter2"));
        assert!(body["error"].get("fields").is_none());
    }

    #[test]
    fn test_source_is_preserved() {
        let io = std::io::Error::other("disk full");
        let err = ApplicationError::from_code(ErrorCode::FileUploadFailed).with_source(io);
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "disk full");
    }
}
