use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: i64,
    pub product_id: i64,
    pub sku: String,
    pub price: f64,
    pub stock_quantity: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Variant {
    /// Current state as repository input, for read-modify-write updates.
    pub fn to_data(&self) -> VariantData {
        VariantData {
            product_id: self.product_id,
            sku: self.sku.clone(),
            price: self.price,
            stock_quantity: self.stock_quantity,
            is_active: self.is_active,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVariant {
    #[validate(required)]
    pub product_id: Option<i64>,

    #[validate(required, length(min = 1, max = 100))]
    #[schema(example = "SHOE-42-BLK")]
    pub sku: Option<String>,

    #[validate(required, range(min = 0.0))]
    pub price: Option<f64>,

    #[validate(range(min = 0))]
    #[serde(default, alias = "stock_quantity")]
    pub stock_quantity: Option<i32>,

    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Full replace of a variant. The owning product cannot change.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVariant {
    #[validate(required, length(min = 1, max = 100))]
    pub sku: Option<String>,

    #[validate(required, range(min = 0.0))]
    pub price: Option<f64>,

    #[validate(range(min = 0))]
    #[serde(default, alias = "stock_quantity")]
    pub stock_quantity: Option<i32>,

    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Body of `PUT /variants/{id}/stock`: the new absolute quantity
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateStock {
    #[validate(required, range(min = 0))]
    pub quantity: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariantData {
    pub product_id: i64,
    pub sku: String,
    pub price: f64,
    pub stock_quantity: i32,
    pub is_active: bool,
}
