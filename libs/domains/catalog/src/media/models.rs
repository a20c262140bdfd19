use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: i64,
    pub product_id: i64,
    pub variant_id: Option<i64>,
    pub media_type: String,
    pub url: String,
    pub alt: String,
    pub position: i32,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMedia {
    #[validate(required)]
    pub product_id: Option<i64>,

    #[serde(default)]
    pub variant_id: Option<i64>,

    #[validate(required, length(min = 1, max = 50))]
    #[schema(example = "image")]
    pub media_type: Option<String>,

    #[validate(required, url, length(max = 500))]
    #[schema(example = "https://cdn.example.com/p/42/front.jpg")]
    pub url: Option<String>,

    #[validate(length(max = 255))]
    #[serde(default)]
    pub alt: Option<String>,

    #[validate(range(min = 0))]
    #[serde(default)]
    pub position: Option<i32>,

    /// Setting this clears the flag on every other media item of the product
    #[serde(default)]
    pub is_primary: Option<bool>,
}

/// Full replace of a media item. The owning product cannot change.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMedia {
    #[serde(default)]
    pub variant_id: Option<i64>,

    #[validate(required, length(min = 1, max = 50))]
    pub media_type: Option<String>,

    #[validate(required, url, length(max = 500))]
    pub url: Option<String>,

    #[validate(length(max = 255))]
    #[serde(default)]
    pub alt: Option<String>,

    #[validate(range(min = 0))]
    #[serde(default)]
    pub position: Option<i32>,

    #[serde(default)]
    pub is_primary: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaData {
    pub product_id: i64,
    pub variant_id: Option<i64>,
    pub media_type: String,
    pub url: String,
    pub alt: String,
    pub position: i32,
    pub is_primary: bool,
}
