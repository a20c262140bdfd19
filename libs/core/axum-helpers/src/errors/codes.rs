//! Closed set of machine-readable error codes.
//!
//! Every code carries exactly one HTTP status and one default message, plus an
//! integer used to correlate log lines:
//!
//! | Range | Category |
//! |-------|----------|
//! | 1000  | authentication |
//! | 1100  | authorization |
//! | 1200  | validation and request shape |
//! | 1300  | business rules (generic and catalog) |
//! | 2000  | database |
//! | 3000  | external services |
//! | 4000  | rate limiting |
//! | 4100  | files and media uploads |
//! | 5000  | system |
//! | 5100  | network |
//! | 5200  | concurrency |
//! | 6000  | security |
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.status().as_u16(), 400);
//! assert_eq!(code.default_message(), "Validation failed.");
//! ```

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{EnumIter, EnumString, IntoStaticStr};
use utoipa::ToSchema;

/// Message used when a raw code string is not part of the table.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error.";

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Authentication
    AuthInvalidCredentials,
    AuthTokenExpired,
    AuthUnauthorized,
    AuthTokenInvalid,
    AuthAccountLocked,

    // Authorization
    Forbidden,
    RoleNotAllowed,
    InsufficientPrivileges,

    // Validation and request shape
    ValidationError,
    InvalidFieldFormat,
    MissingRequiredField,
    ValueOutOfRange,
    /// Write request without an `application/json` body
    UnsupportedMediaType,
    RouteNotFound,
    MethodNotAllowed,

    // Business logic
    UserNotFound,
    OrderAlreadyCompleted,
    StockNotAvailable,
    PaymentFailed,
    DuplicateRequest,

    // Catalog
    ProductNotFound,
    CategoryNotFound,
    VariantNotFound,
    MediaNotFound,
    ParentCategoryNotFound,
    InvalidCategoryHierarchy,
    CategoryHasSubcategories,

    // Database
    DbConnectionFailed,
    DbQueryFailed,
    DbDuplicateKey,
    DbForeignKeyViolation,
    DbTimeout,

    // External services
    ThirdPartyApiError,
    ThirdPartyTimeout,
    WebhookFailed,
    PaymentGatewayError,

    // Rate limiting
    RateLimitExceeded,
    TooManyAttempts,
    ServiceOverloaded,

    // Files and media
    FileTooLarge,
    FileTypeNotAllowed,
    FileUploadFailed,

    // System
    InternalServerError,
    ServiceUnavailable,
    Timeout,
    ConfigurationError,

    // Network
    DnsResolutionFailed,
    ConnectionReset,
    SslHandshakeFailed,

    // Concurrency
    OptimisticLockFailed,
    TransactionAborted,
    StaleData,

    // Security
    CsrfTokenInvalid,
    XssDetected,
    SqlInjectionAttempt,
    InvalidSignature,
}

impl ErrorCode {
    /// Wire name, e.g. `"DB_DUPLICATE_KEY"`.
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    fn entry(&self) -> (i32, StatusCode, &'static str) {
        use StatusCode as S;

        match self {
            Self::AuthInvalidCredentials => (1001, S::UNAUTHORIZED, "Invalid credentials provided."),
            Self::AuthTokenExpired => (1002, S::UNAUTHORIZED, "Authentication token has expired."),
            Self::AuthUnauthorized => (1003, S::UNAUTHORIZED, "Unauthorized access."),
            Self::AuthTokenInvalid => (1004, S::UNAUTHORIZED, "Invalid authentication token."),
            Self::AuthAccountLocked => (1005, S::UNAUTHORIZED, "Account is locked."),

            Self::Forbidden => (1101, S::FORBIDDEN, "Access forbidden."),
            Self::RoleNotAllowed => (1102, S::FORBIDDEN, "Role not allowed for this action."),
            Self::InsufficientPrivileges => (1103, S::FORBIDDEN, "Insufficient privileges."),

            Self::ValidationError => (1201, S::BAD_REQUEST, "Validation failed."),
            Self::InvalidFieldFormat => (1202, S::BAD_REQUEST, "Invalid field format."),
            Self::MissingRequiredField => (1203, S::BAD_REQUEST, "Missing required field."),
            Self::ValueOutOfRange => (1204, S::BAD_REQUEST, "Value out of range."),
            Self::UnsupportedMediaType => (
                1205,
                S::UNSUPPORTED_MEDIA_TYPE,
                "Content-Type must be application/json.",
            ),
            Self::RouteNotFound => (1206, S::NOT_FOUND, "Route not found."),
            Self::MethodNotAllowed => (1207, S::METHOD_NOT_ALLOWED, "Method not allowed."),

            Self::UserNotFound => (1301, S::NOT_FOUND, "User not found."),
            Self::OrderAlreadyCompleted => (1302, S::CONFLICT, "Order already completed."),
            Self::StockNotAvailable => (1303, S::BAD_REQUEST, "Stock not available."),
            Self::PaymentFailed => (1304, S::BAD_REQUEST, "Payment failed."),
            Self::DuplicateRequest => (1305, S::CONFLICT, "Duplicate request detected."),
            Self::ProductNotFound => (1310, S::NOT_FOUND, "Product not found."),
            Self::CategoryNotFound => (1311, S::NOT_FOUND, "Category not found."),
            Self::VariantNotFound => (1312, S::NOT_FOUND, "Variant not found."),
            Self::MediaNotFound => (1313, S::NOT_FOUND, "Media not found."),
            Self::ParentCategoryNotFound => {
                (1314, S::BAD_REQUEST, "Parent category does not exist.")
            }
            Self::InvalidCategoryHierarchy => {
                (1315, S::BAD_REQUEST, "Invalid category hierarchy.")
            }
            Self::CategoryHasSubcategories => (
                1316,
                S::CONFLICT,
                "Cannot delete category with subcategories.",
            ),

            Self::DbConnectionFailed => {
                (2001, S::INTERNAL_SERVER_ERROR, "Database connection failed.")
            }
            Self::DbQueryFailed => (2002, S::INTERNAL_SERVER_ERROR, "Database query failed."),
            Self::DbDuplicateKey => (2003, S::CONFLICT, "Duplicate key in database."),
            Self::DbForeignKeyViolation => {
                (2004, S::CONFLICT, "Referenced resource does not exist.")
            }
            Self::DbTimeout => (2005, S::INTERNAL_SERVER_ERROR, "Database operation timed out."),

            Self::ThirdPartyApiError => (3001, S::BAD_GATEWAY, "Third-party API error."),
            Self::ThirdPartyTimeout => {
                (3002, S::GATEWAY_TIMEOUT, "Third-party service timed out.")
            }
            Self::WebhookFailed => (3003, S::BAD_GATEWAY, "Webhook delivery failed."),
            Self::PaymentGatewayError => (3004, S::GATEWAY_TIMEOUT, "Payment gateway error."),

            Self::RateLimitExceeded => (4001, S::TOO_MANY_REQUESTS, "Rate limit exceeded."),
            Self::TooManyAttempts => (4002, S::TOO_MANY_REQUESTS, "Too many attempts."),
            Self::ServiceOverloaded => (4003, S::TOO_MANY_REQUESTS, "Service overloaded."),

            Self::FileTooLarge => (4101, S::PAYLOAD_TOO_LARGE, "File too large."),
            Self::FileTypeNotAllowed => (4102, S::BAD_REQUEST, "File type not allowed."),
            Self::FileUploadFailed => (4103, S::BAD_REQUEST, "File upload failed."),

            Self::InternalServerError => (5001, S::INTERNAL_SERVER_ERROR, "Internal server error."),
            Self::ServiceUnavailable => (5002, S::SERVICE_UNAVAILABLE, "Service unavailable."),
            Self::Timeout => (5003, S::GATEWAY_TIMEOUT, "Operation timed out."),
            Self::ConfigurationError => (5004, S::INTERNAL_SERVER_ERROR, "Configuration error."),

            Self::DnsResolutionFailed => (5101, S::INTERNAL_SERVER_ERROR, "DNS resolution failed."),
            Self::ConnectionReset => (5102, S::INTERNAL_SERVER_ERROR, "Connection reset."),
            Self::SslHandshakeFailed => (5103, S::INTERNAL_SERVER_ERROR, "SSL handshake failed."),

            Self::OptimisticLockFailed => (5201, S::CONFLICT, "Optimistic lock failed."),
            Self::TransactionAborted => (5202, S::CONFLICT, "Transaction aborted."),
            Self::StaleData => (5203, S::CONFLICT, "Stale data detected."),

            Self::CsrfTokenInvalid => (6001, S::BAD_REQUEST, "Invalid CSRF token."),
            Self::XssDetected => (6002, S::BAD_REQUEST, "XSS attack detected."),
            Self::SqlInjectionAttempt => (6003, S::BAD_REQUEST, "SQL injection attempt detected."),
            Self::InvalidSignature => (6004, S::BAD_REQUEST, "Invalid signature."),
        }
    }

    /// Integer code for logs and dashboards.
    pub fn code(&self) -> i32 {
        self.entry().0
    }

    pub fn status(&self) -> StatusCode {
        self.entry().1
    }

    pub fn default_message(&self) -> &'static str {
        self.entry().2
    }

    /// Resolves a wire name to its status and default message.
    ///
    /// Names outside the table resolve to `500` with [`UNKNOWN_ERROR_MESSAGE`].
    pub fn lookup(raw: &str) -> (StatusCode, &'static str) {
        match Self::from_str(raw) {
            Ok(code) => (code.status(), code.default_message()),
            Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, UNKNOWN_ERROR_MESSAGE),
        }
    }

    /// Whether responses for this code may carry a `Retry-After` header.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimitExceeded | Self::TooManyAttempts)
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_code_has_an_error_status_and_message() {
        for code in ErrorCode::iter() {
            let status = code.status();
            assert!(
                status.is_client_error() || status.is_server_error(),
                "{code} maps to non-error status {status}"
            );
            assert!(!code.default_message().is_empty(), "{code} has no message");
        }
    }

    #[test]
    fn test_integer_codes_are_unique() {
        let codes: HashSet<i32> = ErrorCode::iter().map(|c| c.code()).collect();
        assert_eq!(codes.len(), ErrorCode::iter().count());
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(ErrorCode::DbDuplicateKey.as_str(), "DB_DUPLICATE_KEY");
        assert_eq!(ErrorCode::ThirdPartyApiError.as_str(), "THIRD_PARTY_API_ERROR");
        assert_eq!(ErrorCode::SslHandshakeFailed.as_str(), "SSL_HANDSHAKE_FAILED");
        assert_eq!(
            ErrorCode::CategoryHasSubcategories.to_string(),
            "CATEGORY_HAS_SUBCATEGORIES"
        );
    }

    #[test]
    fn test_serde_matches_as_str() {
        for code in ErrorCode::iter() {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
            let back: ErrorCode = serde_json::from_str(&json).unwrap();
            assert_eq!(back, code);
        }
    }

    #[test]
    fn test_selected_table_entries() {
        assert_eq!(ErrorCode::DbDuplicateKey.status(), StatusCode::CONFLICT);
        assert_eq!(ErrorCode::PaymentGatewayError.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(ErrorCode::FileTooLarge.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(ErrorCode::RateLimitExceeded.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(ErrorCode::DbTimeout.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            ErrorCode::UnsupportedMediaType.status(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(ErrorCode::InternalServerError.default_message(), "Internal server error.");
    }

    #[test]
    fn test_lookup() {
        assert_eq!(
            ErrorCode::lookup("DB_DUPLICATE_KEY"),
            (StatusCode::CONFLICT, "Duplicate key in database.")
        );
        assert_eq!(
            ErrorCode::lookup("NOT_A_REAL_CODE"),
            (StatusCode::INTERNAL_SERVER_ERROR, UNKNOWN_ERROR_MESSAGE)
        );
    }

    #[test]
    fn test_retryable_codes() {
        assert!(ErrorCode::RateLimitExceeded.is_retryable());
        assert!(ErrorCode::TooManyAttempts.is_retryable());
        assert!(!ErrorCode::ServiceOverloaded.is_retryable());
    }
}
