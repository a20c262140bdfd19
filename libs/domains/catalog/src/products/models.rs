use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter, sea_query::StringLen};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Whether a product is offered for sale
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProductStatus {
    #[default]
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "inactive")]
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub short_description: String,
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or replacing a product.
///
/// `status` stays a string so an unknown value is reported as a field
/// validation error rather than a malformed body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[validate(required, length(min = 3, max = 255))]
    #[schema(example = "Trail Running Shoe")]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[validate(length(max = 255))]
    #[serde(default)]
    pub short_description: Option<String>,

    #[validate(custom(function = "validate_status"))]
    #[serde(default)]
    #[schema(value_type = Option<ProductStatus>)]
    pub status: Option<String>,
}

/// Update is a full replace, so it takes the same shape as create.
pub type UpdateProduct = CreateProduct;

/// Validated product fields handed to the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductData {
    pub name: String,
    pub description: String,
    pub short_description: String,
    pub status: ProductStatus,
}

fn validate_status(status: &str) -> Result<(), ValidationError> {
    status.parse::<ProductStatus>().map(|_| ()).map_err(|_| {
        let mut err = ValidationError::new("oneof");
        err.add_param("param".into(), &"active inactive");
        err
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_lowercase() {
        assert_eq!("inactive".parse::<ProductStatus>().unwrap(), ProductStatus::Inactive);
        assert_eq!(ProductStatus::Active.to_string(), "active");
        assert_eq!(
            serde_json::to_value(ProductStatus::Inactive).unwrap(),
            serde_json::json!("inactive")
        );
    }

    #[test]
    fn test_unknown_status_fails_validation() {
        let input = CreateProduct {
            name: Some("Lamp".into()),
            status: Some("archived".into()),
            ..Default::default()
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.field_errors()["status"][0].code, "oneof");
    }

    #[test]
    fn test_name_bounds() {
        let short = CreateProduct {
            name: Some("ab".into()),
            ..Default::default()
        };
        assert!(short.validate().is_err());

        let ok = CreateProduct {
            name: Some("abc".into()),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());
    }
}
