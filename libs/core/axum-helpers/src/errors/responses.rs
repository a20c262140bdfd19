//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "error": {
            "code": "INTERNAL_SERVER_ERROR",
            "message": "An internal server error occurred."
        }
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "error": {
            "code": "VALIDATION_ERROR",
            "message": "Validation failed.",
            "fields": [
                { "field": "name", "tag": "required", "message": "This field is required." },
                { "field": "price", "tag": "min", "value": -1, "param": "0", "message": "Value must be at least 0." }
            ]
        }
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Malformed path or body",
    content_type = "application/json",
    example = json!({
        "error": {
            "code": "INVALID_FIELD_FORMAT",
            "message": "Invalid URL: Cannot parse `abc` to a `i64`"
        }
    })
)]
pub struct BadRequestFormatResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "error": {
            "code": "PRODUCT_NOT_FOUND",
            "message": "Product with id 42 not found"
        }
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Conflict with current state",
    content_type = "application/json",
    example = json!({
        "error": {
            "code": "DB_DUPLICATE_KEY",
            "message": "Duplicate key in database."
        }
    })
)]
pub struct ConflictResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Unsupported Media Type",
    content_type = "application/json",
    example = json!({
        "error": {
            "code": "UNSUPPORTED_MEDIA_TYPE",
            "message": "Content-Type must be application/json"
        }
    })
)]
pub struct UnsupportedMediaTypeResponse(pub ErrorResponse);
